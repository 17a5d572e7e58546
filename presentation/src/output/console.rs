//! Console output formatter for discussion results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{DiscussionResult, SessionReport};

/// Formats discussion results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result, round by round
    pub fn format(result: &DiscussionResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Story Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Session:".cyan().bold(),
            result.session_id
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            result.participants.join(", ")
        ));
        output.push_str(&format!(
            "{} {} after {} round(s), {} turn(s)\n",
            "Outcome:".cyan().bold(),
            result.outcome,
            result.rounds_completed(),
            result.turn_count()
        ));

        for round in &result.discussion_log {
            output.push_str(&Self::section_header(&format!("Round {}", round.round)));
            if round.contributions.is_empty() {
                output.push_str(&format!("\n{}\n", "(no eligible speakers)".dimmed()));
            }
            for contribution in &round.contributions {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", contribution.role).yellow().bold(),
                    contribution.response
                ));
            }
        }

        output.push_str(&Self::section_header("Final Draft"));
        output.push_str(&format!("\n{}\n", result.final_draft));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &DiscussionResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final draft only (concise output)
    pub fn format_draft_only(result: &DiscussionResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Final Draft ===".cyan().bold()));
        output.push_str(&format!(
            "{} {}\n\n",
            "Participants:".dimmed(),
            result.participants.join(", ")
        ));
        output.push_str(&result.final_draft);
        output.push('\n');

        output
    }

    /// Format a session report as JSON
    pub fn format_report(report: &SessionReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DiscussionResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &DiscussionResult) -> String {
        Self::format_json(result)
    }

    fn format_draft_only(&self, result: &DiscussionResult) -> String {
        Self::format_draft_only(result)
    }

    fn format_report(&self, report: &SessionReport) -> String {
        Self::format_report(report)
    }
}
