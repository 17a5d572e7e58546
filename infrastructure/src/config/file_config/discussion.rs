//! Discussion configuration from TOML (`[discussion]` section)

use council_application::DiscussionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw discussion configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Round limit when none is given on the command line
    pub max_rounds: usize,
    /// Token budget for the history grounding each turn
    pub max_context_tokens: usize,
    /// Persisted message count that ends the discussion early
    pub consensus_threshold: usize,
    /// Role id that writes the final draft
    pub final_editor: String,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        let params = DiscussionParams::default();
        Self {
            max_rounds: params.default_max_rounds,
            max_context_tokens: params.max_context_tokens,
            consensus_threshold: params.consensus_threshold,
            final_editor: params.final_editor,
        }
    }
}

impl FileDiscussionConfig {
    /// Convert to run parameters; the turn timeout comes from `[gateway]`
    pub fn to_params(&self, turn_timeout: Duration) -> DiscussionParams {
        DiscussionParams::default()
            .with_default_max_rounds(self.max_rounds)
            .with_max_context_tokens(self.max_context_tokens)
            .with_consensus_threshold(self.consensus_threshold)
            .with_final_editor(self.final_editor.clone())
            .with_turn_timeout(turn_timeout)
    }
}
