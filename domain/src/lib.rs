//! Domain layer for story-council
//!
//! This crate contains the core entities, value objects and the pluggable
//! rules of a discussion. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Role**: a named AI persona bound to a backend model and a generation preset
//! - **Session**: a collaborative discussion with a theme, a fixed participant
//!   list and a mutable narrative state
//! - **Message**: one persisted line of a session's append-only history
//! - **Round**: one ordered pass over the eligible participants of a run

pub mod core;
pub mod discussion;
pub mod prompt;
pub mod role;
pub mod session;

// Re-export commonly used types
pub use core::{error::DomainError, tokens::estimate_tokens};
pub use discussion::{
    entities::{DiscussionOutcome, DiscussionRun, DiscussionState},
    narrative::{NarrativeFold, RoundRosterFold},
    termination::{MessageCountThreshold, NeverTerminate, TerminationContext, TerminationPolicy},
    value_objects::{Contribution, DiscussionResult, Round, SessionReport},
};
pub use prompt::{DefaultPromptAssembler, PromptAssembler};
pub use role::entities::{DEFAULT_FINAL_EDITOR, DEFAULT_MODEL, Role};
pub use session::{
    context_window::fit_to_budget,
    entities::Session,
    message::{Message, MessageRole},
};
