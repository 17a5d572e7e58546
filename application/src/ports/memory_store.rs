//! Memory Store port
//!
//! Durable, append-only message log grouped by session id.

use async_trait::async_trait;
use council_domain::{Message, MessageRole};
use thiserror::Error;

/// Errors raised by a memory store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage query failed: {0}")]
    Query(String),

    #[error("Corrupt stored row: {0}")]
    Corrupt(String),
}

/// Session-scoped message log
///
/// Implementations must commit a write before returning from `append`, so a
/// later `context` in the same run observes it. The store never checks that a
/// session exists; the id is only a grouping key.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Persist one message. Its `token_count` is derived from `content`.
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message, StoreError>;

    /// Persist a prompt/response pair as a user message followed by an
    /// assistant message.
    ///
    /// The default appends twice; stores that support transactions should
    /// write both rows atomically.
    async fn append_exchange(
        &self,
        session_id: &str,
        prompt: &str,
        response: &str,
    ) -> Result<(Message, Message), StoreError> {
        let user = self.append(session_id, MessageRole::User, prompt).await?;
        let assistant = self
            .append(session_id, MessageRole::Assistant, response)
            .await?;
        Ok((user, assistant))
    }

    /// Newest messages that fit in `max_tokens`, in chronological order.
    ///
    /// Messages are never split; see [`council_domain::fit_to_budget`].
    async fn context(
        &self,
        session_id: &str,
        max_tokens: usize,
    ) -> Result<Vec<Message>, StoreError>;

    /// Complete chronological history, unbounded. For audit and export only.
    async fn full_history(&self, session_id: &str) -> Result<Vec<Message>, StoreError>;

    /// Number of persisted messages for the session
    async fn message_count(&self, session_id: &str) -> Result<usize, StoreError>;
}
