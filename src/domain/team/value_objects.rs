use serde::{Deserialize, Serialize};
use std::fmt;

/// Team name value object
///
/// # Invariants
/// - Not empty after trimming
/// - At most 60 characters
/// - Unique across all teams (enforced by the database, not here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamName(String);

impl TeamName {
    /// Validates and constructs a team name, trimming surrounding
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }
        if name.len() > 60 {
            return Err("Team name must be at most 60 characters".to_string());
        }
        Ok(TeamName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps an already-stored name without re-validating it.
    ///
    /// Only to be used when reconstructing aggregates from persistence;
    /// stored names passed validation on the way in.
    pub(crate) fn from_persistence(name: String) -> Self {
        TeamName(name)
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
