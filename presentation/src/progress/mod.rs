//! Progress reporting during discussion runs

pub mod reporter;
