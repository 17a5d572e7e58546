//! Application-level configuration.
//!
//! - [`DiscussionParams`] - tunables of a discussion run (context budget,
//!   consensus threshold, turn timeout, final editor)

pub mod discussion_params;

pub use discussion_params::DiscussionParams;
