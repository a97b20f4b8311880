use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::value_objects::Email;

/// User data for persistence
///
/// `team_id` is the only membership record in the system: a user belongs to
/// a team iff this field is set. It is written by team creation (leader),
/// the join transaction, and admin removal, and by nothing else.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub institute: Option<String>,
    pub team_id: Option<Uuid>,
    pub is_admin: bool,
}

impl User {
    /// A profile is complete once phone and institute are filled in.
    /// Incomplete profiles may not create or join teams.
    pub fn profile_complete(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
            && self
                .institute
                .as_deref()
                .is_some_and(|i| !i.trim().is_empty())
    }
}

/// Repository trait for User records
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> Result<Uuid, String>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, String>;

    /// Update the caller-editable profile fields
    async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: String,
        phone: String,
        institute: String,
    ) -> Result<(), String>;

    /// Find all users whose team_id references the given team
    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<User>, String>;

    /// List every registered user (admin view)
    async fn list_all(&self) -> Result<Vec<User>, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(phone: Option<&str>, institute: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: Email::new("s@example.com").unwrap(),
            password_hash: "hash".to_string(),
            full_name: "Student".to_string(),
            phone: phone.map(String::from),
            institute: institute.map(String::from),
            team_id: None,
            is_admin: false,
        }
    }

    #[test]
    fn profile_complete_with_both_fields() {
        assert!(user(Some("9876543210"), Some("IIT Delhi")).profile_complete());
    }

    #[test]
    fn profile_incomplete_without_phone() {
        assert!(!user(None, Some("IIT Delhi")).profile_complete());
    }

    #[test]
    fn profile_incomplete_without_institute() {
        assert!(!user(Some("9876543210"), None).profile_complete());
    }

    #[test]
    fn blank_fields_do_not_count() {
        assert!(!user(Some("  "), Some("IIT Delhi")).profile_complete());
    }
}
