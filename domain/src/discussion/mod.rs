//! Discussion domain.
//!
//! - [`entities::DiscussionRun`] - the run state machine
//! - [`value_objects`] - contributions, rounds and run results
//! - [`termination::TerminationPolicy`] - when a run may stop early
//! - [`narrative::NarrativeFold`] - how the narrative state is recomputed after a round

pub mod entities;
pub mod narrative;
pub mod termination;
pub mod value_objects;
