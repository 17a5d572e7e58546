//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("A session needs at least one participant")]
    NoParticipants,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown message role: {0}")]
    InvalidMessageRole(String),

    #[error("Invalid discussion transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Check if this error was caused by caller input rather than state
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::NoParticipants
                | DomainError::InvalidInput(_)
                | DomainError::InvalidMessageRole(_)
        )
    }
}
