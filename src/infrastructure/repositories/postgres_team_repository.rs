use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::repositories::TeamRepository;
use crate::domain::team::membership::{evaluate_join, JoinError};
use crate::domain::team::Team;

/// Bounded retry budget for serialization conflicts on the join
/// transaction. Exhaustion surfaces as `JoinError::Unknown`.
const MAX_JOIN_ATTEMPTS: u32 = 5;

/// PostgreSQL implementation of TeamRepository
///
/// The join operation runs at SERIALIZABLE isolation so the member-count
/// read, the precondition checks, and the membership write all observe one
/// consistent snapshot. Two concurrent joins against a team with 3 members
/// conflict; Postgres aborts one with a serialization failure, which is
/// retried here without the caller ever seeing it.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    team_name: String,
    leader_id: Uuid,
    leader_email: String,
    leader_phone: String,
    created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team::from_persistence(
            r.id,
            r.team_name,
            r.leader_id,
            r.leader_email,
            r.leader_phone,
            r.created_at,
        )
    }
}

/// True for SQLSTATE 40001 (serialization_failure) and 40P01 (deadlock),
/// the two conflict classes Postgres asks clients to retry.
fn is_transient_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.code().as_deref(), Some("40001") | Some("40P01"))
        }
        _ => false,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One join attempt inside one SERIALIZABLE transaction.
    ///
    /// Outer error: a store-level failure (possibly a retryable conflict,
    /// decided by the caller). Inner error: a terminal domain failure; the
    /// transaction is rolled back by drop and nothing was written.
    async fn try_join(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Result<String, JoinError>, sqlx::Error> {
        let mut tx: Transaction<'_, Postgres> = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let team_name: Option<String> =
            sqlx::query_scalar("SELECT team_name FROM teams WHERE id = $1")
                .bind(team_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(team_name) = team_name else {
            return Ok(Err(JoinError::TeamNotFound));
        };

        let current_team: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT team_id FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(current_team) = current_team else {
            return Ok(Err(JoinError::UserNotFound));
        };

        // The count MUST come from inside this transaction; a count taken
        // outside the snapshot lets two joins both read 3 and overshoot.
        let member_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(&mut *tx)
                .await?;

        if let Err(e) = evaluate_join(current_team, member_count) {
            return Ok(Err(e));
        }

        sqlx::query("UPDATE users SET team_id = $1 WHERE id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Ok(team_name))
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, team: &Team) -> Result<(), String> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| format!("Failed to open transaction: {}", e))?;

        let insert = sqlx::query(
            r#"
            INSERT INTO teams (id, team_name, leader_id, leader_email, leader_phone, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(team.id())
        .bind(team.team_name())
        .bind(team.leader_id())
        .bind(team.leader_email())
        .bind(team.leader_phone())
        .bind(team.created_at())
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            if is_unique_violation(&e) {
                return Err("Team name already taken".to_string());
            }
            return Err(format!("Failed to create team: {}", e));
        }

        // The leader's membership is established here, in the same atomic
        // unit as the team row. A leader already on a team matches no row.
        let assigned = sqlx::query("UPDATE users SET team_id = $1 WHERE id = $2 AND team_id IS NULL")
            .bind(team.id())
            .bind(team.leader_id())
            .execute(&mut *tx)
            .await
            .map_err(|e| format!("Failed to assign leader: {}", e))?;

        if assigned.rows_affected() == 0 {
            return Err("Leader is already on a team".to_string());
        }

        tx.commit()
            .await
            .map_err(|e| format!("Failed to commit team creation: {}", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, team_name, leader_id, leader_email, leader_phone, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find team by id: {}", e))?;

        Ok(row.map(Team::from))
    }

    async fn list_all(&self) -> Result<Vec<Team>, String> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, team_name, leader_id, leader_email, leader_phone, created_at
            FROM teams
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list teams: {}", e))?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn join(&self, team_id: Uuid, user_id: Uuid) -> Result<String, JoinError> {
        for attempt in 1..=MAX_JOIN_ATTEMPTS {
            match self.try_join(team_id, user_id).await {
                Ok(outcome) => return outcome,
                Err(e) if is_transient_conflict(&e) => {
                    tracing::debug!(
                        %team_id,
                        %user_id,
                        attempt,
                        "serialization conflict on team join, retrying"
                    );
                }
                Err(e) => {
                    tracing::error!(%team_id, %user_id, "team join failed: {}", e);
                    return Err(JoinError::Unknown(e.to_string()));
                }
            }
        }

        Err(JoinError::Unknown(
            "too many concurrent joins, transaction retries exhausted".to_string(),
        ))
    }

    async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET team_id = NULL
            WHERE id = $1
              AND team_id = $2
              AND id <> (SELECT leader_id FROM teams WHERE id = $2)
            "#,
        )
        .bind(user_id)
        .bind(team_id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to remove member: {}", e))?;

        if result.rows_affected() == 0 {
            return Err("User is not a removable member of this team".to_string());
        }

        Ok(())
    }
}
