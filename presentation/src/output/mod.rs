//! Output formatting for discussion results

pub mod console;
pub mod formatter;
