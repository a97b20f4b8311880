use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;

use crate::api::handlers::{admin, auth, content, submissions, teams, users};

/// Builds the full application router over a connection pool.
///
/// Shared between `main` and the integration tests so both exercise the
/// exact same route table.
pub fn router(pool: PgPool) -> Router {
    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Auth routes
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Profile routes
        .route("/api/users/me", get(users::get_me))
        .route("/api/users/me", put(users::update_profile))
        // Team routes
        .route("/api/teams", post(teams::create_team))
        .route("/api/teams/:id", get(teams::get_team))
        .route("/api/teams/:id/join", post(teams::join_team))
        // Submission routes
        .route("/api/submissions", put(submissions::submit_idea))
        .route("/api/submissions/mine", get(submissions::get_my_submission))
        // Public content
        .route("/api/announcements", get(content::list_announcements))
        .route("/api/categories", get(content::list_categories))
        .route("/api/categories/:id/themes", get(content::list_themes))
        // Admin routes
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/teams", get(admin::list_teams))
        .route("/api/admin/submissions", get(admin::list_submissions))
        .route(
            "/api/admin/teams/:team_id/members/:user_id",
            delete(admin::remove_member),
        )
        .route("/api/admin/categories", post(admin::create_category))
        .route("/api/admin/categories/:id", delete(admin::delete_category))
        .route("/api/admin/themes", post(admin::create_theme))
        .route("/api/admin/themes/:id", delete(admin::delete_theme))
        .route("/api/admin/announcements", post(admin::create_announcement))
        .route(
            "/api/admin/announcements/:id",
            delete(admin::delete_announcement),
        )
        // Shared state
        .with_state(pool)
}
