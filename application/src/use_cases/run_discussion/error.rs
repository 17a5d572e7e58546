//! Errors of the discussion use case

use crate::ports::generation_gateway::GatewayError;
use crate::ports::memory_store::StoreError;
use crate::registry::RegistryError;
use council_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while creating sessions or running a discussion
///
/// `NotFound`, `InvalidRole` and `InvalidInput` are caller errors raised
/// before any write. The failure variants carry the session, round and role
/// of the step that failed; round `0` is the finalization step.
#[derive(Error, Debug)]
pub enum DiscussionError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation failed (session {session_id}, round {round}, role {role}): {source}")]
    GenerationFailure {
        session_id: String,
        round: usize,
        role: String,
        #[source]
        source: GatewayError,
    },

    #[error("Storage failed (session {session_id}, round {round}, role {role}): {source}")]
    StorageFailure {
        session_id: String,
        round: usize,
        role: String,
        #[source]
        source: StoreError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Discussion cancelled (session {session_id}, round {round})")]
    Cancelled { session_id: String, round: usize },

    #[error("Discussion state error: {0}")]
    State(DomainError),
}

impl DiscussionError {
    pub(crate) fn session_not_found(id: &str) -> Self {
        DiscussionError::NotFound {
            kind: "Session",
            id: id.to_string(),
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            DiscussionError::NotFound { .. }
                | DiscussionError::InvalidRole(_)
                | DiscussionError::InvalidInput(_)
        )
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DiscussionError::Cancelled { .. })
    }

    /// Check if this error is a generation timeout
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            DiscussionError::GenerationFailure { source, .. } if source.is_timeout()
        )
    }
}

impl From<RegistryError> for DiscussionError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::SessionNotFound(id) => DiscussionError::session_not_found(&id),
            RegistryError::RoleNotFound(id) => DiscussionError::NotFound { kind: "Role", id },
            RegistryError::UnknownParticipant(id) => DiscussionError::InvalidRole(id),
            RegistryError::InvalidSession(e) => DiscussionError::InvalidInput(e.to_string()),
        }
    }
}

impl From<DomainError> for DiscussionError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidInput(message) => DiscussionError::InvalidInput(message),
            e if e.is_input_error() => DiscussionError::InvalidInput(e.to_string()),
            e => DiscussionError::State(e),
        }
    }
}
