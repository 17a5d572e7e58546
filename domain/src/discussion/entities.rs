//! Discussion run entity and its state machine
//!
//! ```text
//! Initiated → RoundInProgress(1) → … → RoundInProgress(n)
//!           → ConsensusReached | MaxRoundsExhausted → Finalized
//! ```
//!
//! Any state other than `Finalized` may move to `Aborted`.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How the round loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionOutcome {
    /// The termination policy was satisfied before the round limit
    ConsensusReached,
    /// Every allowed round ran without satisfying the termination policy
    MaxRoundsExhausted,
}

impl DiscussionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionOutcome::ConsensusReached => "consensus_reached",
            DiscussionOutcome::MaxRoundsExhausted => "max_rounds_exhausted",
        }
    }
}

impl std::fmt::Display for DiscussionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of a discussion run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionState {
    Initiated,
    RoundInProgress(usize),
    ConsensusReached,
    MaxRoundsExhausted,
    Finalized,
    Aborted,
}

impl DiscussionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionState::Initiated => "initiated",
            DiscussionState::RoundInProgress(_) => "round_in_progress",
            DiscussionState::ConsensusReached => "consensus_reached",
            DiscussionState::MaxRoundsExhausted => "max_rounds_exhausted",
            DiscussionState::Finalized => "finalized",
            DiscussionState::Aborted => "aborted",
        }
    }

    /// No further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, DiscussionState::Finalized | DiscussionState::Aborted)
    }
}

impl std::fmt::Display for DiscussionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscussionState::RoundInProgress(n) => write!(f, "round_in_progress({})", n),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// A single discussion run against one session (Entity)
///
/// Tracks the state machine only; contributions live in the result log.
#[derive(Debug, Clone)]
pub struct DiscussionRun {
    session_id: String,
    initiator: String,
    topic: String,
    max_rounds: usize,
    state: DiscussionState,
    outcome: Option<DiscussionOutcome>,
}

impl DiscussionRun {
    /// Create a run. `max_rounds` must be at least one.
    pub fn new(
        session_id: impl Into<String>,
        initiator: impl Into<String>,
        topic: impl Into<String>,
        max_rounds: usize,
    ) -> Result<Self, DomainError> {
        if max_rounds == 0 {
            return Err(DomainError::InvalidInput(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            session_id: session_id.into(),
            initiator: initiator.into(),
            topic: topic.into(),
            max_rounds,
            state: DiscussionState::Initiated,
            outcome: None,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn initiator(&self) -> &str {
        &self.initiator
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn state(&self) -> DiscussionState {
        self.state
    }

    pub fn outcome(&self) -> Option<DiscussionOutcome> {
        self.outcome
    }

    /// Current round number, `0` outside the round loop
    pub fn current_round(&self) -> usize {
        match self.state {
            DiscussionState::RoundInProgress(n) => n,
            _ => 0,
        }
    }

    /// Whether `role_id` takes a turn in `round`.
    ///
    /// The initiator speaks once, in round 1; everyone else speaks every round.
    pub fn speaks_in_round(&self, role_id: &str, round: usize) -> bool {
        round == 1 || role_id != self.initiator
    }

    /// Enter the next round. Rounds are strictly sequential from 1.
    pub fn begin_round(&mut self, round: usize) -> Result<(), DomainError> {
        let expected = match self.state {
            DiscussionState::Initiated => 1,
            DiscussionState::RoundInProgress(n) => n + 1,
            _ => return Err(self.invalid(DiscussionState::RoundInProgress(round))),
        };
        if round != expected || round > self.max_rounds {
            return Err(self.invalid(DiscussionState::RoundInProgress(round)));
        }
        self.state = DiscussionState::RoundInProgress(round);
        Ok(())
    }

    /// Leave the round loop with the given outcome
    pub fn conclude(&mut self, outcome: DiscussionOutcome) -> Result<(), DomainError> {
        let next = match outcome {
            DiscussionOutcome::ConsensusReached => DiscussionState::ConsensusReached,
            DiscussionOutcome::MaxRoundsExhausted => DiscussionState::MaxRoundsExhausted,
        };
        if !matches!(self.state, DiscussionState::RoundInProgress(_)) {
            return Err(self.invalid(next));
        }
        self.state = next;
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Mark the final draft as produced
    pub fn finalize(&mut self) -> Result<(), DomainError> {
        match self.state {
            DiscussionState::ConsensusReached | DiscussionState::MaxRoundsExhausted => {
                self.state = DiscussionState::Finalized;
                Ok(())
            }
            _ => Err(self.invalid(DiscussionState::Finalized)),
        }
    }

    /// Abort the run. A finalized run stays finalized.
    pub fn abort(&mut self) {
        if self.state != DiscussionState::Finalized {
            self.state = DiscussionState::Aborted;
        }
    }

    fn invalid(&self, to: DiscussionState) -> DomainError {
        DomainError::InvalidTransition {
            from: self.state.to_string(),
            to: to.to_string(),
        }
    }
}
