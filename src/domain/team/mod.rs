// Team domain module
// Contains the team aggregate root, value objects, and the join decision

#![allow(clippy::module_inception)]

pub mod membership;
pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use membership::{JoinError, TEAM_CAP};
pub use team::Team;
