use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::handlers::users::UserResponse;
use crate::api::middleware::auth::JwtAuth;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{JoinError, Team};
use crate::infrastructure::repositories::{PostgresTeamRepository, PostgresUserRepository};

/// Request body for creating a team
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub leader_email: String,
    pub leader_phone: String,
}

/// Response from team creation and lookup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub team_name: String,
    pub leader_id: Uuid,
    pub leader_email: String,
    pub leader_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<UserResponse>>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            team_name: team.team_name().to_string(),
            leader_id: team.leader_id(),
            leader_email: team.leader_email().to_string(),
            leader_phone: team.leader_phone().to_string(),
            members: None,
        }
    }
}

/// Outcome of a join attempt, shaped for the invite landing page
///
/// `success=false` carries a one-line human-readable reason; `teamName` is
/// present only on commit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

/// Create a new team
///
/// POST /api/teams
///
/// The caller becomes the team's leader and first member; both writes
/// happen in one transaction inside the repository.
pub async fn create_team(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let user_repo = PostgresUserRepository::new(pool.clone());
    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !user.profile_complete() {
        return Err(ApiError::bad_request(
            "Complete your profile before creating a team",
        ));
    }
    if user.team_id.is_some() {
        return Err(ApiError::conflict("You are already on a team"));
    }

    let team = Team::new(req.team_name, user_id, req.leader_email, req.leader_phone)
        .map_err(ApiError::bad_request)?;

    let team_repo = PostgresTeamRepository::new(pool);
    team_repo.create(&team).await.map_err(|e| {
        if e.contains("already") {
            ApiError::conflict(e)
        } else {
            ApiError::internal_server_error(format!("Failed to create team: {}", e))
        }
    })?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// Get a team with its derived member list
///
/// GET /api/teams/:id
pub async fn get_team(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team_repo = PostgresTeamRepository::new(pool.clone());
    let team = team_repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found(format!("Team not found: {}", id)))?;

    let user_repo = PostgresUserRepository::new(pool);
    let members = user_repo
        .find_by_team(id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Database error: {}", e)))?;

    let mut response = TeamResponse::from(&team);
    response.members = Some(members.iter().map(UserResponse::from).collect());

    Ok(Json(response))
}

/// Join a team through an invite link
///
/// POST /api/teams/:id/join
///
/// This is the invite landing flow: it verifies the caller is authenticated
/// (extractor) and profile-complete before the join operation is invoked.
/// The join itself runs as a single transaction in the repository and is
/// the only place the member cap is enforced.
pub async fn join_team(
    State(pool): State<PgPool>,
    JwtAuth(user_id): JwtAuth,
    Path(team_id): Path<Uuid>,
) -> (StatusCode, Json<JoinResponse>) {
    let user_repo = PostgresUserRepository::new(pool.clone());
    let user = match user_repo.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return join_failure(StatusCode::NOT_FOUND, JoinError::UserNotFound.to_string()),
        Err(e) => {
            tracing::error!("failed to load joining user: {}", e);
            return join_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not complete the request, please try again".to_string(),
            );
        }
    };

    if !user.profile_complete() {
        return join_failure(
            StatusCode::BAD_REQUEST,
            "Complete your profile before joining a team".to_string(),
        );
    }

    let team_repo = PostgresTeamRepository::new(pool);
    match team_repo.join(team_id, user_id).await {
        Ok(team_name) => (
            StatusCode::OK,
            Json(JoinResponse {
                success: true,
                message: format!("You have joined {}", team_name),
                team_name: Some(team_name),
            }),
        ),
        Err(e) => {
            let status = match e {
                JoinError::TeamNotFound | JoinError::UserNotFound => StatusCode::NOT_FOUND,
                JoinError::AlreadyOnTeam | JoinError::TeamFull => StatusCode::CONFLICT,
                JoinError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            join_failure(status, e.to_string())
        }
    }
}

fn join_failure(status: StatusCode, message: String) -> (StatusCode, Json<JoinResponse>) {
    (
        status,
        Json(JoinResponse {
            success: false,
            message,
            team_name: None,
        }),
    )
}
