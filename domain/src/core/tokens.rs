//! Token estimation.
//!
//! Context budgets are expressed in tokens, but no tokenizer is consulted:
//! the count is a fixed character heuristic so every store and every test
//! computes the same number for the same content.

/// Characters assumed per token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token count of `content`: character count divided by four,
/// rounded down.
pub fn estimate_tokens(content: &str) -> usize {
    content.chars().count() / CHARS_PER_TOKEN
}
