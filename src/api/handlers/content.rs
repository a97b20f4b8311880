// Public, unauthenticated reads: announcements, categories, themes.

use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::content::{Announcement, Category, Theme};
use crate::domain::repositories::ContentRepository;
use crate::infrastructure::repositories::PostgresContentRepository;

/// GET /api/announcements
pub async fn list_announcements(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let repo = PostgresContentRepository::new(pool);
    let announcements = repo
        .list_announcements()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    Ok(Json(announcements))
}

/// GET /api/categories
pub async fn list_categories(State(pool): State<PgPool>) -> Result<Json<Vec<Category>>, ApiError> {
    let repo = PostgresContentRepository::new(pool);
    let categories = repo
        .list_categories()
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    Ok(Json(categories))
}

/// GET /api/categories/:id/themes
pub async fn list_themes(
    State(pool): State<PgPool>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<Theme>>, ApiError> {
    let repo = PostgresContentRepository::new(pool);
    let themes = repo
        .list_themes(category_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;
    Ok(Json(themes))
}
