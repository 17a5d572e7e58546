//! Discussion parameters - run loop tunables.
//!
//! [`DiscussionParams`] groups the static parameters that control a
//! [`DiscussionOrchestrator`](crate::use_cases::run_discussion::DiscussionOrchestrator)
//! run. These are application-layer concerns, not domain policy.

use council_domain::DEFAULT_FINAL_EDITOR;
use council_domain::discussion::termination::DEFAULT_MESSAGE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discussion run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionParams {
    /// Token budget for the history prepended to each turn's prompt.
    pub max_context_tokens: usize,
    /// Persisted message count at which the default termination policy fires.
    pub consensus_threshold: usize,
    /// Upper bound on a single generation call.
    pub turn_timeout: Duration,
    /// Role that writes the final draft.
    pub final_editor: String,
    /// Round limit used when the caller does not pass one.
    pub default_max_rounds: usize,
}

impl Default for DiscussionParams {
    fn default() -> Self {
        Self {
            max_context_tokens: 4096,
            consensus_threshold: DEFAULT_MESSAGE_THRESHOLD,
            turn_timeout: Duration::from_secs(30),
            final_editor: DEFAULT_FINAL_EDITOR.to_string(),
            default_max_rounds: 3,
        }
    }
}

impl DiscussionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_context_tokens(mut self, tokens: usize) -> Self {
        self.max_context_tokens = tokens;
        self
    }

    pub fn with_consensus_threshold(mut self, threshold: usize) -> Self {
        self.consensus_threshold = threshold;
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn with_final_editor(mut self, role_id: impl Into<String>) -> Self {
        self.final_editor = role_id.into();
        self
    }

    pub fn with_default_max_rounds(mut self, rounds: usize) -> Self {
        self.default_max_rounds = rounds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = DiscussionParams::default();
        assert_eq!(params.max_context_tokens, 4096);
        assert_eq!(params.consensus_threshold, 6);
        assert_eq!(params.turn_timeout, Duration::from_secs(30));
        assert_eq!(params.final_editor, "editor_in_chief");
        assert_eq!(params.default_max_rounds, 3);
    }

    #[test]
    fn test_builder() {
        let params = DiscussionParams::default()
            .with_max_context_tokens(512)
            .with_consensus_threshold(10)
            .with_turn_timeout(Duration::from_millis(250))
            .with_final_editor("editor");

        assert_eq!(params.max_context_tokens, 512);
        assert_eq!(params.consensus_threshold, 10);
        assert_eq!(params.turn_timeout, Duration::from_millis(250));
        assert_eq!(params.final_editor, "editor");
    }
}
