use super::value_objects::TeamName;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Team aggregate root
///
/// Represents a contest team. The team stores no member list: membership is
/// implicit, a user belongs to the team iff the user's `team_id` points at
/// it, and team size is derived by counting those users. The leader's own
/// membership is established at creation time by the repository, in the same
/// transaction that inserts the team row.
///
/// # Invariants
/// - Team name is non-empty and unique across all teams
/// - Leader contact email is well-formed
/// - Derived member count never exceeds the cap (enforced by the join
///   operation, not by this type)
#[derive(Debug, Clone)]
pub struct Team {
    id: Uuid,
    team_name: TeamName,
    leader_id: Uuid,
    leader_email: String,
    leader_phone: String,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new Team aggregate
    ///
    /// # Arguments
    /// * `team_name` - Display name (validated, unique check happens at
    ///   persistence time)
    /// * `leader_id` - The user creating the team; they become its first
    ///   member
    /// * `leader_email` / `leader_phone` - Contact details shown to joiners
    pub fn new(
        team_name: String,
        leader_id: Uuid,
        leader_email: String,
        leader_phone: String,
    ) -> Result<Self, String> {
        let team_name = TeamName::new(team_name)?;

        if !leader_email.contains('@') || leader_email.len() < 3 {
            return Err(format!("Invalid leader email: {}", leader_email));
        }
        if leader_phone.trim().is_empty() {
            return Err("Leader phone cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            team_name,
            leader_id,
            leader_email,
            leader_phone,
            created_at: Utc::now(),
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn team_name(&self) -> &str {
        self.team_name.as_str()
    }

    pub fn leader_id(&self) -> Uuid {
        self.leader_id
    }

    pub fn leader_email(&self) -> &str {
        &self.leader_email
    }

    pub fn leader_phone(&self) -> &str {
        &self.leader_phone
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Bypasses validation since the stored data already passed it.
    /// Only to be used by repository implementations.
    pub fn from_persistence(
        id: Uuid,
        team_name: String,
        leader_id: Uuid,
        leader_email: String,
        leader_phone: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            team_name: TeamName::from_persistence(team_name),
            leader_id,
            leader_email,
            leader_phone,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn create_team_with_valid_fields() {
        let leader_id = leader();
        let team = Team::new(
            "Tinker Cats".to_string(),
            leader_id,
            "lead@example.com".to_string(),
            "9876543210".to_string(),
        )
        .unwrap();

        assert_eq!(team.team_name(), "Tinker Cats");
        assert_eq!(team.leader_id(), leader_id);
        assert_eq!(team.leader_email(), "lead@example.com");
        assert_eq!(team.leader_phone(), "9876543210");
    }

    #[test]
    fn create_team_with_empty_name_fails() {
        let result = Team::new(
            "".to_string(),
            leader(),
            "lead@example.com".to_string(),
            "9876543210".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn create_team_with_bad_email_fails() {
        let result = Team::new(
            "Tinker Cats".to_string(),
            leader(),
            "not-an-email".to_string(),
            "9876543210".to_string(),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid leader email"));
    }

    #[test]
    fn create_team_with_empty_phone_fails() {
        let result = Team::new(
            "Tinker Cats".to_string(),
            leader(),
            "lead@example.com".to_string(),
            "  ".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn from_persistence_round_trip() {
        let id = Uuid::new_v4();
        let leader_id = leader();
        let created_at = Utc::now();

        let team = Team::from_persistence(
            id,
            "Tinker Cats".to_string(),
            leader_id,
            "lead@example.com".to_string(),
            "9876543210".to_string(),
            created_at,
        );

        assert_eq!(team.id(), id);
        assert_eq!(team.team_name(), "Tinker Cats");
        assert_eq!(team.created_at(), created_at);
    }

    #[test]
    fn from_persistence_keeps_stored_name_verbatim() {
        // Reconstruction does not re-validate or rewrite what the database
        // returned, even if the row was edited out of band.
        let team = Team::from_persistence(
            Uuid::new_v4(),
            "  odd stored name  ".to_string(),
            leader(),
            "lead@example.com".to_string(),
            "9876543210".to_string(),
            Utc::now(),
        );

        assert_eq!(team.team_name(), "  odd stored name  ");
    }
}
