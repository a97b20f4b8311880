use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team's idea submission
///
/// At most one per team; re-submitting replaces the previous idea. The
/// category and theme references are validated by the database's foreign
/// keys at persistence time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub team_id: Uuid,
    pub category_id: Uuid,
    pub theme_id: Uuid,
    pub title: String,
    pub summary: String,
    pub submitted_by: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Builds a new submission after validating the free-text fields.
    pub fn new(
        team_id: Uuid,
        category_id: Uuid,
        theme_id: Uuid,
        title: String,
        summary: String,
        submitted_by: Uuid,
    ) -> Result<Self, String> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err("Idea title cannot be empty".to_string());
        }
        if summary.trim().is_empty() {
            return Err("Idea summary cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            team_id,
            category_id,
            theme_id,
            title,
            summary,
            submitted_by,
            submitted_at: Utc::now(),
        })
    }
}
