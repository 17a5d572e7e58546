//! Token-bounded selection of session history.
//!
//! A context window is the longest suffix of the history whose summed
//! `token_count` fits the budget. Messages are atomic: one that does not fit
//! ends the window, it is never truncated.

use super::message::Message;

/// Select a context window from messages given **newest first**.
///
/// Accumulates `token_count` and stops at the first message that would push
/// the total over `max_tokens`, so a single message larger than the budget
/// ends the scan on its own. The returned messages are in chronological
/// order.
///
/// Taking an iterator lets a store stream rows and stop reading early.
pub fn fit_to_budget<I>(newest_first: I, max_tokens: usize) -> Vec<Message>
where
    I: IntoIterator<Item = Message>,
{
    let mut window = Vec::new();
    let mut used = 0usize;

    for message in newest_first {
        let next = used.saturating_add(message.token_count);
        if next > max_tokens {
            break;
        }
        used = next;
        window.push(message);
    }

    window.reverse();
    window
}
