use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::submission::Submission;

/// Repository trait for idea submissions (one per team, upsert semantics)
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert the team's idea, replacing any previous one
    async fn upsert(&self, submission: &Submission) -> Result<(), String>;

    /// The team's current idea, if submitted
    async fn find_by_team(&self, team_id: Uuid) -> Result<Option<Submission>, String>;

    /// Every submitted idea (admin view)
    async fn list_all(&self) -> Result<Vec<Submission>, String>;
}
