//! Termination policies
//!
//! A policy is consulted after every completed round. When it is satisfied
//! the run ends early with [`DiscussionOutcome::ConsensusReached`].
//!
//! [`DiscussionOutcome::ConsensusReached`]: super::entities::DiscussionOutcome::ConsensusReached

use super::value_objects::Round;

/// Default number of persisted messages after which a discussion is
/// considered settled.
pub const DEFAULT_MESSAGE_THRESHOLD: usize = 6;

/// What a policy may look at when a round ends
#[derive(Debug, Clone, Copy)]
pub struct TerminationContext<'a> {
    pub session_id: &'a str,
    /// Round that just completed (1-indexed)
    pub round: usize,
    /// Messages persisted for the session so far, across all runs
    pub message_count: usize,
    /// Rounds of the current run so far
    pub discussion_log: &'a [Round],
}

/// Decides whether a discussion may stop before its round limit
pub trait TerminationPolicy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    fn is_satisfied(&self, context: &TerminationContext<'_>) -> bool;
}

/// Stops once the session's persisted message count reaches a threshold.
///
/// This is a volume heuristic, not a semantic agreement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCountThreshold {
    threshold: usize,
}

impl MessageCountThreshold {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for MessageCountThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_THRESHOLD)
    }
}

impl TerminationPolicy for MessageCountThreshold {
    fn name(&self) -> &str {
        "message_count"
    }

    fn is_satisfied(&self, context: &TerminationContext<'_>) -> bool {
        context.message_count >= self.threshold
    }
}

/// Never stops early; every run uses its full round budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverTerminate;

impl TerminationPolicy for NeverTerminate {
    fn name(&self) -> &str {
        "never"
    }

    fn is_satisfied(&self, _context: &TerminationContext<'_>) -> bool {
        false
    }
}
