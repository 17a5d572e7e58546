//! Use cases (application services)
//!
//! - [`run_discussion`] - session lifecycle and the multi-role discussion run

pub mod run_discussion;
