//! Prompt assembly.
//!
//! The orchestrator depends on the [`PromptAssembler`] contract (each turn's
//! prompt is derived from the previous turn's response), never on the text
//! format, so the wording can change without touching the round loop.

mod template;

pub use template::{DefaultPromptAssembler, PromptAssembler};
