//! Role domain.
//!
//! - [`entities::Role`] - an AI persona bound to a backend model and a preset

pub mod entities;
