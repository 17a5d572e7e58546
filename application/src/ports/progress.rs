//! Progress notification port
//!
//! Defines the interface for reporting progress during a discussion run.

use council_domain::{DiscussionState, Role, Round};

/// Callback for progress updates during a discussion run
///
/// Implementations live in the outer layers and can display progress in
/// various ways (console, web UI, etc.)
pub trait DiscussionProgress: Send + Sync {
    /// Called when a round starts, with the number of speakers it will have
    fn on_round_start(&self, round: usize, speakers: usize);

    /// Called after a role's turn has been generated and persisted
    fn on_turn_complete(&self, round: usize, role: &Role);

    /// Called when every speaker of a round has taken their turn
    fn on_round_complete(&self, round: &Round);

    /// Called on every state machine transition
    fn on_state_change(&self, _session_id: &str, _state: DiscussionState) {}

    /// Called before the final editor is asked for the draft
    fn on_finalize_start(&self, _editor: &Role) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DiscussionProgress for NoProgress {
    fn on_round_start(&self, _round: usize, _speakers: usize) {}
    fn on_turn_complete(&self, _round: usize, _role: &Role) {}
    fn on_round_complete(&self, _round: &Round) {}
}
