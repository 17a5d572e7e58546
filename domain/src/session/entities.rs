//! Session entity

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A collaborative discussion (Entity)
///
/// The participant list is fixed at creation. Only the narrative state
/// changes afterwards, and only through a discussion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: String,
    theme: String,
    participants: Vec<String>,
    narrative_state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session. Fails if `participants` is empty.
    pub fn new(
        id: impl Into<String>,
        theme: impl Into<String>,
        participants: Vec<String>,
        initial_state: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            theme: theme.into(),
            participants,
            narrative_state: initial_state.into(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Participant role ids in registration (speaking) order
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn narrative_state(&self) -> &str {
        &self.narrative_state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_participant(&self, role_id: &str) -> bool {
        self.participants.iter().any(|p| p == role_id)
    }

    pub fn set_narrative_state(&mut self, state: impl Into<String>) {
        self.narrative_state = state.into();
        self.updated_at = Utc::now();
    }
}
