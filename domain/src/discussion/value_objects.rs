//! Discussion value objects - the outputs of a run.
//!
//! - [`Contribution`] - one role's turn: the prompt it received and its answer
//! - [`Round`] - the ordered contributions of one pass over the participants
//! - [`DiscussionResult`] - everything a successful run returns
//! - [`SessionReport`] - a session snapshot with its complete history

use super::entities::DiscussionOutcome;
use crate::session::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One role's turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Role id that spoke
    pub role: String,
    /// Role-scoped prompt the role received
    pub prompt: String,
    /// Text the role produced
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl Contribution {
    pub fn new(
        role: impl Into<String>,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            prompt: prompt.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One ordered pass over the eligible participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1-indexed)
    pub round: usize,
    pub contributions: Vec<Contribution>,
}

impl Round {
    pub fn new(round: usize) -> Self {
        Self {
            round,
            contributions: Vec::new(),
        }
    }

    pub fn push(&mut self, contribution: Contribution) {
        self.contributions.push(contribution);
    }

    /// Role ids in speaking order
    pub fn speakers(&self) -> Vec<&str> {
        self.contributions.iter().map(|c| c.role.as_str()).collect()
    }

    /// Latest response in this round, if anyone has spoken
    pub fn latest_response(&self) -> Option<&str> {
        self.contributions.last().map(|c| c.response.as_str())
    }
}

/// Result of a successful discussion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionResult {
    pub session_id: String,
    pub discussion_log: Vec<Round>,
    pub final_draft: String,
    pub participants: Vec<String>,
    pub outcome: DiscussionOutcome,
}

impl DiscussionResult {
    /// Number of rounds that actually ran
    pub fn rounds_completed(&self) -> usize {
        self.discussion_log.len()
    }

    /// Total turns taken across all rounds (finalization excluded)
    pub fn turn_count(&self) -> usize {
        self.discussion_log
            .iter()
            .map(|r| r.contributions.len())
            .sum()
    }
}

/// Session snapshot with its complete, unbounded history (for audit/export)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    pub theme: String,
    pub participants: Vec<String>,
    pub narrative_state: String,
    pub created_at: DateTime<Utc>,
    pub full_history: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_speakers_in_order() {
        let mut round = Round::new(1);
        round.push(Contribution::new("writer", "p1", "r1"));
        round.push(Contribution::new("editor", "p2", "r2"));
        assert_eq!(round.speakers(), vec!["writer", "editor"]);
        assert_eq!(round.latest_response(), Some("r2"));
    }

    #[test]
    fn test_empty_round_has_no_latest() {
        assert!(Round::new(2).latest_response().is_none());
    }

    #[test]
    fn test_result_counts() {
        let mut r1 = Round::new(1);
        r1.push(Contribution::new("writer", "p", "a"));
        r1.push(Contribution::new("editor", "p", "b"));
        let mut r2 = Round::new(2);
        r2.push(Contribution::new("editor", "p", "c"));

        let result = DiscussionResult {
            session_id: "s1".to_string(),
            discussion_log: vec![r1, r2],
            final_draft: "draft".to_string(),
            participants: vec!["writer".to_string(), "editor".to_string()],
            outcome: DiscussionOutcome::MaxRoundsExhausted,
        };
        assert_eq!(result.rounds_completed(), 2);
        assert_eq!(result.turn_count(), 3);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "max_rounds_exhausted");
        assert_eq!(json["discussion_log"][1]["contributions"][0]["role"], "editor");
    }
}
