use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::SubmissionRepository;
use crate::domain::submission::Submission;

/// PostgreSQL implementation of SubmissionRepository
///
/// One idea per team: the unique constraint on `team_id` plus upsert
/// semantics make a re-submission replace the previous idea in place.
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    /// Creates a new PostgresSubmissionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn upsert(&self, submission: &Submission) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, team_id, category_id, theme_id, title, summary, submitted_by, submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (team_id) DO UPDATE SET
                category_id = EXCLUDED.category_id,
                theme_id = EXCLUDED.theme_id,
                title = EXCLUDED.title,
                summary = EXCLUDED.summary,
                submitted_by = EXCLUDED.submitted_by,
                submitted_at = EXCLUDED.submitted_at
            "#,
        )
        .bind(submission.id)
        .bind(submission.team_id)
        .bind(submission.category_id)
        .bind(submission.theme_id)
        .bind(&submission.title)
        .bind(&submission.summary)
        .bind(submission.submitted_by)
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save submission: {}", e))?;

        Ok(())
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Option<Submission>, String> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, team_id, category_id, theme_id, title, summary, submitted_by, submitted_at
            FROM submissions
            WHERE team_id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find submission by team: {}", e))
    }

    async fn list_all(&self) -> Result<Vec<Submission>, String> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, team_id, category_id, theme_id, title, summary, submitted_by, submitted_at
            FROM submissions
            ORDER BY submitted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list submissions: {}", e))
    }
}
