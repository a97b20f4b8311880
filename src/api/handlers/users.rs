use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::domain::repositories::user_repository::{User, UserRepository};
use crate::infrastructure::repositories::PostgresUserRepository;

/// Public view of a user record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub institute: Option<String>,
    pub team_id: Option<Uuid>,
    pub profile_complete: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            institute: user.institute.clone(),
            team_id: user.team_id,
            profile_complete: user.profile_complete(),
        }
    }
}

/// Request body for the profile form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub phone: String,
    pub institute: String,
}

/// Current user's profile
///
/// GET /api/users/me
pub async fn get_me(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
) -> Result<Json<UserResponse>, ApiError> {
    let user_repo = PostgresUserRepository::new(pool);
    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Complete or update the caller's profile
///
/// PUT /api/users/me
pub async fn update_profile(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let full_name = req.full_name.trim().to_string();
    let phone = req.phone.trim().to_string();
    let institute = req.institute.trim().to_string();

    if full_name.is_empty() {
        return Err(ApiError::bad_request("Full name cannot be empty"));
    }
    if phone.is_empty() {
        return Err(ApiError::bad_request("Phone cannot be empty"));
    }
    if institute.is_empty() {
        return Err(ApiError::bad_request("Institute cannot be empty"));
    }

    let user_repo = PostgresUserRepository::new(pool);
    user_repo
        .update_profile(user_id, full_name, phone, institute)
        .await
        .map_err(|e| {
            if e.contains("not found") {
                ApiError::not_found(e)
            } else {
                ApiError::internal_server_error(format!("Failed to update profile: {}", e))
            }
        })?;

    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(&user)))
}
