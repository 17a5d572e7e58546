//! Narrative state folding
//!
//! After each round the session's narrative state is recomputed from the
//! run's log. The default fold is a deterministic roster, not a summary.

use super::value_objects::Round;

/// Recomputes the narrative state from the rounds completed so far
pub trait NarrativeFold: Send + Sync {
    fn fold(&self, discussion_log: &[Round]) -> String;
}

/// One line per round: `Round <n>: <role ids in speaking order>`
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRosterFold;

impl NarrativeFold for RoundRosterFold {
    fn fold(&self, discussion_log: &[Round]) -> String {
        discussion_log
            .iter()
            .map(|round| format!("Round {}: {}", round.round, round.speakers().join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discussion::value_objects::Contribution;

    #[test]
    fn test_roster_lists_rounds_and_speakers() {
        let mut r1 = Round::new(1);
        r1.push(Contribution::new("writer", "", "a"));
        r1.push(Contribution::new("editor", "", "b"));
        let mut r2 = Round::new(2);
        r2.push(Contribution::new("editor", "", "c"));

        let state = RoundRosterFold.fold(&[r1, r2]);
        assert_eq!(state, "Round 1: writer, editor\nRound 2: editor");
    }

    #[test]
    fn test_empty_log_folds_to_empty_state() {
        assert_eq!(RoundRosterFold.fold(&[]), "");
    }

    #[test]
    fn test_fold_ignores_response_content() {
        let mut a = Round::new(1);
        a.push(Contribution::new("writer", "p", "one answer"));
        let mut b = Round::new(1);
        b.push(Contribution::new("writer", "q", "another answer"));
        assert_eq!(RoundRosterFold.fold(&[a]), RoundRosterFold.fold(&[b]));
    }
}
