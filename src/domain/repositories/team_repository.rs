use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::team::{JoinError, Team};

/// Repository trait for the Team aggregate
///
/// `join` is the one operation with a real invariant: the 4-member cap and
/// membership uniqueness must hold under concurrent join attempts, so
/// implementations must evaluate its preconditions and the membership write
/// against a single consistent snapshot.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team and assign the leader to it in the same atomic
    /// unit. Fails if the team name is taken or the leader is already on a
    /// team.
    async fn create(&self, team: &Team) -> Result<(), String>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, String>;

    /// List every team (admin view)
    async fn list_all(&self) -> Result<Vec<Team>, String>;

    /// Atomically join `user_id` to `team_id`
    ///
    /// All preconditions (team exists, user exists, user unassigned, member
    /// count below cap) and the membership write happen in one transaction.
    /// Returns the team's display name on commit. Transient serialization
    /// conflicts are retried internally; the caller never sees them.
    async fn join(&self, team_id: Uuid, user_id: Uuid) -> Result<String, JoinError>;

    /// Unassign a non-leader member from a team (admin operation).
    /// The leader cannot be removed from their own team this way.
    async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), String>;
}
