//! In-memory registries owned by one orchestrator instance.
//!
//! - [`RoleRegistry`] - role id → [`Role`](council_domain::Role), last write wins
//! - [`SessionRegistry`] - session id → session slot, sharded so unrelated
//!   sessions never contend

mod roles;
mod sessions;

pub use roles::RoleRegistry;
pub use sessions::{SessionRegistry, SessionSlot};

use council_domain::DomainError;
use thiserror::Error;

/// Registry lookup and validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Participant is not a registered role: {0}")]
    UnknownParticipant(String),

    #[error(transparent)]
    InvalidSession(#[from] DomainError),
}
