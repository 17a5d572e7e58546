//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] - domain-level errors
//! - [`tokens::estimate_tokens`] - the token heuristic used for context budgets

pub mod error;
pub mod tokens;
