//! Ownership checks run before every mutating store call.

use crate::errors::{BoardError, Result};
use crate::models::User;
use tracing::warn;

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Forbidden,
    AuthRequired,
}

impl Access {
    pub fn into_result(self) -> Result<()> {
        match self {
            Access::Allowed => Ok(()),
            Access::Forbidden => Err(BoardError::Forbidden),
            Access::AuthRequired => Err(BoardError::AuthRequired),
        }
    }
}

/// Checks whether `actor` may mutate a resource owned by `owner_id`.
pub fn check(actor: Option<&User>, owner_id: &str) -> Access {
    match actor {
        None => Access::AuthRequired,
        Some(user) if user.id == owner_id => Access::Allowed,
        Some(user) => {
            warn!("Ownership check failed: {} is not {}", user.id, owner_id);
            Access::Forbidden
        }
    }
}

/// Requires a signed-in actor for operations that create content.
pub fn require_actor(actor: Option<&User>) -> Result<&User> {
    actor.ok_or(BoardError::AuthRequired)
}
