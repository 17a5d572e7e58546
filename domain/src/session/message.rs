//! Message entity

use crate::core::error::DomainError;
use crate::core::tokens::estimate_tokens;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag of a persisted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(DomainError::InvalidMessageRole(other.to_string())),
        }
    }
}

/// A single line of session history (Entity)
///
/// `token_count` is derived from `content` at construction and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub token_count: usize,
    /// Reserved for vector retrieval; not read by any discussion logic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<u8>>,
}

impl Message {
    pub fn new(
        session_id: impl Into<String>,
        role: MessageRole,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        Self {
            session_id: session_id.into(),
            role,
            token_count: estimate_tokens(&content),
            content,
            timestamp,
            embedding: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<u8>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_count_derived_from_content() {
        let msg = Message::new("s1", MessageRole::User, "twelve chars", Utc::now());
        assert_eq!(msg.token_count, 3);
        assert!(msg.embedding.is_none());
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            assert_eq!(role.as_str().parse::<MessageRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_parse_unknown() {
        let err = "moderator".parse::<MessageRole>().unwrap_err();
        assert_eq!(err, DomainError::InvalidMessageRole("moderator".to_string()));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
