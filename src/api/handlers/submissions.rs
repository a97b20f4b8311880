use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::SubmissionRepository;
use crate::domain::submission::Submission;
use crate::infrastructure::repositories::{PostgresSubmissionRepository, PostgresUserRepository};

/// Request body for the idea submission form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIdeaRequest {
    pub category_id: Uuid,
    pub theme_id: Uuid,
    pub title: String,
    pub summary: String,
}

/// Submit or replace the caller's team's idea
///
/// PUT /api/submissions
pub async fn submit_idea(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
    Json(req): Json<SubmitIdeaRequest>,
) -> Result<Json<Submission>, ApiError> {
    let user_repo = PostgresUserRepository::new(pool.clone());
    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let team_id = user
        .team_id
        .ok_or_else(|| ApiError::bad_request("Join a team before submitting an idea"))?;

    let submission = Submission::new(
        team_id,
        req.category_id,
        req.theme_id,
        req.title,
        req.summary,
        user_id,
    )
    .map_err(ApiError::bad_request)?;

    let submission_repo = PostgresSubmissionRepository::new(pool);
    submission_repo.upsert(&submission).await.map_err(|e| {
        // Foreign key violations mean the category or theme id is bogus.
        if e.contains("foreign key") {
            ApiError::bad_request("Unknown category or theme")
        } else {
            ApiError::internal_server_error(format!("Failed to save submission: {}", e))
        }
    })?;

    Ok(Json(submission))
}

/// The caller's team's current idea, if any
///
/// GET /api/submissions/mine
pub async fn get_my_submission(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
) -> Result<Json<Option<Submission>>, ApiError> {
    let user_repo = PostgresUserRepository::new(pool.clone());
    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let Some(team_id) = user.team_id else {
        return Ok(Json(None));
    };

    let submission_repo = PostgresSubmissionRepository::new(pool);
    let submission = submission_repo
        .find_by_team(team_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    Ok(Json(submission))
}
