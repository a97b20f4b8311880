// Admin data operations behind the management screens: user/team listings,
// member removal, and content CRUD. All routes require the admin claim.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::handlers::teams::TeamResponse;
use crate::api::handlers::users::UserResponse;
use crate::api::middleware::auth::AdminAuth;
use crate::domain::content::{Announcement, Category, Theme};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::{ContentRepository, SubmissionRepository, TeamRepository};
use crate::domain::submission::Submission;
use crate::infrastructure::repositories::{
    PostgresContentRepository, PostgresSubmissionRepository, PostgresTeamRepository,
    PostgresUserRepository,
};

/// GET /api/admin/users
pub async fn list_users(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let user_repo = PostgresUserRepository::new(pool);
    let users = user_repo
        .list_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/admin/teams
pub async fn list_teams(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let team_repo = PostgresTeamRepository::new(pool);
    let teams = team_repo
        .list_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// GET /api/admin/submissions
pub async fn list_submissions(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let submission_repo = PostgresSubmissionRepository::new(pool);
    let submissions = submission_repo
        .list_all()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    Ok(Json(submissions))
}

/// DELETE /api/admin/teams/:team_id/members/:user_id
///
/// Unassigns a member; the only exposed transition back to UNASSIGNED.
/// Leaders cannot be removed from their own team.
pub async fn remove_member(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let team_repo = PostgresTeamRepository::new(pool);
    team_repo.remove_member(team_id, user_id).await.map_err(|e| {
        if e.contains("not a removable member") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to remove member: {}", e))
        }
    })?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// POST /api/admin/categories
pub async fn create_category(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Category name cannot be empty"));
    }

    let category = Category {
        id: Uuid::new_v4(),
        name,
    };

    let repo = PostgresContentRepository::new(pool);
    repo.create_category(&category).await.map_err(|e| {
        if e.contains("duplicate") || e.contains("unique") {
            ApiError::conflict("Category already exists")
        } else {
            ApiError::internal_server_error(format!("Failed to create category: {}", e))
        }
    })?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/admin/categories/:id
pub async fn delete_category(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PostgresContentRepository::new(pool);
    repo.delete_category(id).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to delete category: {}", e))
        }
    })?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    pub category_id: Uuid,
    pub name: String,
}

/// POST /api/admin/themes
pub async fn create_theme(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Json(req): Json<CreateThemeRequest>,
) -> Result<(StatusCode, Json<Theme>), ApiError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("Theme name cannot be empty"));
    }

    let theme = Theme {
        id: Uuid::new_v4(),
        category_id: req.category_id,
        name,
    };

    let repo = PostgresContentRepository::new(pool);
    repo.create_theme(&theme).await.map_err(|e| {
        if e.contains("foreign key") {
            ApiError::bad_request("Unknown category")
        } else {
            ApiError::internal_server_error(format!("Failed to create theme: {}", e))
        }
    })?;

    Ok((StatusCode::CREATED, Json(theme)))
}

/// DELETE /api/admin/themes/:id
pub async fn delete_theme(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PostgresContentRepository::new(pool);
    repo.delete_theme(id).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to delete theme: {}", e))
        }
    })?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub body: String,
}

/// POST /api/admin/announcements
pub async fn create_announcement(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::bad_request("Announcement title cannot be empty"));
    }

    let announcement = Announcement {
        id: Uuid::new_v4(),
        title: req.title.trim().to_string(),
        body: req.body,
        posted_at: Utc::now(),
    };

    let repo = PostgresContentRepository::new(pool);
    repo.create_announcement(&announcement)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to create announcement: {}", e)))?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// DELETE /api/admin/announcements/:id
pub async fn delete_announcement(
    State(pool): State<PgPool>,
    AdminAuth(_): AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PostgresContentRepository::new(pool);
    repo.delete_announcement(id).await.map_err(|e| {
        if e.contains("not found") {
            ApiError::not_found(e)
        } else {
            ApiError::internal_server_error(format!("Failed to delete announcement: {}", e))
        }
    })?;
    Ok(StatusCode::NO_CONTENT)
}
