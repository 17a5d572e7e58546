//! Output formatter trait

use council_domain::{DiscussionResult, SessionReport};

/// Trait for formatting discussion results
pub trait OutputFormatter {
    /// Format the complete result, round by round
    fn format(&self, result: &DiscussionResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &DiscussionResult) -> String;

    /// Format the final draft only (concise output)
    fn format_draft_only(&self, result: &DiscussionResult) -> String;

    /// Format a session report with its complete history
    fn format_report(&self, report: &SessionReport) -> String;
}
