//! Session domain.
//!
//! - [`entities::Session`] - a collaborative discussion handle
//! - [`message::Message`] - a single persisted line of session history
//! - [`context_window::fit_to_budget`] - token-bounded history selection

pub mod context_window;
pub mod entities;
pub mod message;
