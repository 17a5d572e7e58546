//! Run Discussion use case
//!
//! Orchestrates a multi-role discussion over one session:
//!
//! 1. Validate the session, the initiator, every participant and the final editor
//! 2. Rounds: each eligible participant takes one turn, in registration order.
//!    The initiator speaks only in round 1. Every turn is grounded in the
//!    session's bounded history, generated, persisted, and then fed forward
//!    into the next speaker's prompt.
//! 3. After each round the narrative state is refolded and the termination
//!    policy is consulted
//! 4. The final editor turns the narrative state into the final draft
//!
//! Turns are strictly sequential. A failed or timed-out turn aborts the whole
//! run; turns already taken stay in the memory store.

mod error;

pub use error::DiscussionError;

use crate::config::DiscussionParams;
use crate::ports::generation_gateway::{GatewayError, GenerationGateway, GenerationOptions};
use crate::ports::memory_store::{MemoryStore, StoreError};
use crate::ports::progress::{DiscussionProgress, NoProgress};
use crate::registry::{RoleRegistry, SessionRegistry};
use council_domain::{
    Contribution, DefaultPromptAssembler, DiscussionOutcome, DiscussionResult, DiscussionRun,
    Message, MessageCountThreshold, NarrativeFold, PromptAssembler, Role, Round, RoundRosterFold,
    Session, SessionReport, TerminationContext, TerminationPolicy,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Roles resolved for one run
struct Cast {
    initiator: Role,
    speakers: Vec<Role>,
    editor: Role,
}

/// What the round loop and finalization produce
struct Transcript {
    discussion_log: Vec<Round>,
    narrative_state: String,
    final_draft: String,
    outcome: DiscussionOutcome,
}

/// Owns the registries and drives discussion runs
///
/// Runs on distinct sessions proceed concurrently; runs on the same session
/// queue behind that session's run lock.
pub struct DiscussionOrchestrator<G: GenerationGateway + 'static> {
    gateway: Arc<G>,
    store: Arc<dyn MemoryStore>,
    roles: Arc<RoleRegistry>,
    sessions: Arc<SessionRegistry>,
    params: DiscussionParams,
    termination: Option<Arc<dyn TerminationPolicy>>,
    narrative: Arc<dyn NarrativeFold>,
    prompts: Arc<dyn PromptAssembler>,
    cancellation: Option<CancellationToken>,
}

impl<G: GenerationGateway + 'static> DiscussionOrchestrator<G> {
    pub fn new(gateway: Arc<G>, store: Arc<dyn MemoryStore>, roles: Arc<RoleRegistry>) -> Self {
        let sessions = Arc::new(SessionRegistry::new(Arc::clone(&roles)));
        Self {
            gateway,
            store,
            roles,
            sessions,
            params: DiscussionParams::default(),
            termination: None,
            narrative: Arc::new(RoundRosterFold),
            prompts: Arc::new(DefaultPromptAssembler),
            cancellation: None,
        }
    }

    pub fn with_params(mut self, params: DiscussionParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the default [`MessageCountThreshold`] policy
    pub fn with_termination(mut self, policy: Arc<dyn TerminationPolicy>) -> Self {
        self.termination = Some(policy);
        self
    }

    pub fn with_narrative(mut self, fold: Arc<dyn NarrativeFold>) -> Self {
        self.narrative = fold;
        self
    }

    pub fn with_prompts(mut self, prompts: Arc<dyn PromptAssembler>) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set a cancellation token for graceful shutdown.
    ///
    /// The token is checked between turns only, so a turn in flight always
    /// completes, including its persistence write.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn roles(&self) -> &Arc<RoleRegistry> {
        &self.roles
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub fn params(&self) -> &DiscussionParams {
        &self.params
    }

    /// Insert or overwrite a role. Returns the role it replaced.
    pub fn register_role(&self, role: Role) -> Option<Role> {
        self.roles.register(role)
    }

    /// Create a session. Every participant must be a registered role.
    pub fn create_session(
        &self,
        theme: impl Into<String>,
        participants: Vec<String>,
        initial_state: impl Into<String>,
    ) -> Result<String, DiscussionError> {
        Ok(self.sessions.create(theme, participants, initial_state)?)
    }

    /// Snapshot of a session
    pub fn session(&self, session_id: &str) -> Result<Session, DiscussionError> {
        Ok(self.sessions.get(session_id)?)
    }

    /// Complete chronological history of a session
    pub async fn history(&self, session_id: &str) -> Result<Vec<Message>, DiscussionError> {
        Ok(self.store.full_history(session_id).await?)
    }

    /// Session snapshot together with its complete history
    pub async fn export_report(&self, session_id: &str) -> Result<SessionReport, DiscussionError> {
        let session = self.sessions.get(session_id)?;
        let full_history = self.store.full_history(session_id).await?;

        Ok(SessionReport {
            session_id: session.id().to_string(),
            theme: session.theme().to_string(),
            participants: session.participants().to_vec(),
            narrative_state: session.narrative_state().to_string(),
            created_at: session.created_at(),
            full_history,
        })
    }

    /// Run a discussion with default (no-op) progress
    pub async fn run(
        &self,
        session_id: &str,
        initiator: &str,
        topic: &str,
        max_rounds: usize,
    ) -> Result<DiscussionResult, DiscussionError> {
        self.run_with_progress(session_id, initiator, topic, max_rounds, &NoProgress)
            .await
    }

    /// Run a discussion with progress callbacks
    pub async fn run_with_progress(
        &self,
        session_id: &str,
        initiator: &str,
        topic: &str,
        max_rounds: usize,
        progress: &dyn DiscussionProgress,
    ) -> Result<DiscussionResult, DiscussionError> {
        let slot = self.sessions.slot(session_id)?;
        let _run_guard = slot.acquire_run().await;
        let session = slot.snapshot();

        let mut run = DiscussionRun::new(session_id, initiator, topic, max_rounds)?;
        let cast = self.resolve_cast(&session, initiator)?;

        info!(
            "Starting discussion on session {} (initiator: {}, participants: {}, max rounds: {})",
            session_id,
            initiator,
            session.participants().len(),
            max_rounds
        );
        progress.on_state_change(session_id, run.state());

        let transcript = match self.drive(&mut run, &session, &cast, progress).await {
            Ok(transcript) => transcript,
            Err(e) => {
                run.abort();
                progress.on_state_change(session_id, run.state());
                warn!("Discussion on session {} aborted: {}", session_id, e);
                return Err(e);
            }
        };

        slot.set_narrative_state(transcript.narrative_state);
        run.finalize()?;
        progress.on_state_change(session_id, run.state());

        info!(
            "Discussion on session {} finalized after {} round(s): {}",
            session_id,
            transcript.discussion_log.len(),
            transcript.outcome
        );

        Ok(DiscussionResult {
            session_id: session_id.to_string(),
            discussion_log: transcript.discussion_log,
            final_draft: transcript.final_draft,
            participants: session.participants().to_vec(),
            outcome: transcript.outcome,
        })
    }

    /// Resolve every role the run needs, before anything is written
    fn resolve_cast(&self, session: &Session, initiator: &str) -> Result<Cast, DiscussionError> {
        let initiator = self.resolve_role(initiator)?;
        if !session.is_participant(&initiator.id) {
            return Err(DiscussionError::InvalidRole(format!(
                "{} is not a participant of session {}",
                initiator.id,
                session.id()
            )));
        }

        let speakers = session
            .participants()
            .iter()
            .map(|id| self.resolve_role(id))
            .collect::<Result<Vec<_>, _>>()?;
        let editor = self.resolve_role(&self.params.final_editor)?;

        Ok(Cast {
            initiator,
            speakers,
            editor,
        })
    }

    fn resolve_role(&self, id: &str) -> Result<Role, DiscussionError> {
        self.roles
            .lookup(id)
            .map_err(|_| DiscussionError::InvalidRole(id.to_string()))
    }

    fn termination_policy(&self) -> Arc<dyn TerminationPolicy> {
        match &self.termination {
            Some(policy) => Arc::clone(policy),
            None => Arc::new(MessageCountThreshold::new(self.params.consensus_threshold)),
        }
    }

    /// Round loop followed by finalization
    async fn drive(
        &self,
        run: &mut DiscussionRun,
        session: &Session,
        cast: &Cast,
        progress: &dyn DiscussionProgress,
    ) -> Result<Transcript, DiscussionError> {
        let session_id = session.id();
        let termination = self.termination_policy();

        let mut narrative_state = session.narrative_state().to_string();
        let mut discussion_prompt =
            self.prompts
                .opening(&narrative_state, &cast.initiator, run.topic());
        let mut discussion_log: Vec<Round> = Vec::new();
        let mut outcome = DiscussionOutcome::MaxRoundsExhausted;

        for round_number in 1..=run.max_rounds() {
            run.begin_round(round_number)?;
            progress.on_state_change(session_id, run.state());

            let speakers: Vec<&Role> = cast
                .speakers
                .iter()
                .filter(|role| run.speaks_in_round(&role.id, round_number))
                .collect();
            debug!(
                "Round {} on session {}: {} speaker(s)",
                round_number,
                session_id,
                speakers.len()
            );
            progress.on_round_start(round_number, speakers.len());

            let mut round = Round::new(round_number);
            for role in speakers {
                self.check_cancelled(session_id, round_number)?;

                let role_prompt = self.prompts.role_scoped(role, &discussion_prompt);
                let response = self
                    .exchange(session_id, round_number, role, &role_prompt)
                    .await?;

                discussion_prompt = self.prompts.follow_up(&response);
                round.push(Contribution::new(&role.id, role_prompt, response));
                progress.on_turn_complete(round_number, role);
            }
            progress.on_round_complete(&round);

            let last_role = round
                .contributions
                .last()
                .map(|c| c.role.clone())
                .unwrap_or_else(|| cast.initiator.id.clone());
            discussion_log.push(round);
            narrative_state = self.narrative.fold(&discussion_log);

            let message_count = self.store.message_count(session_id).await.map_err(|source| {
                DiscussionError::StorageFailure {
                    session_id: session_id.to_string(),
                    round: round_number,
                    role: last_role,
                    source,
                }
            })?;
            let context = TerminationContext {
                session_id,
                round: round_number,
                message_count,
                discussion_log: &discussion_log,
            };
            if termination.is_satisfied(&context) {
                info!(
                    "Termination policy '{}' satisfied after round {} ({} messages)",
                    termination.name(),
                    round_number,
                    message_count
                );
                outcome = DiscussionOutcome::ConsensusReached;
                break;
            }
        }

        run.conclude(outcome)?;
        progress.on_state_change(session_id, run.state());

        self.check_cancelled(session_id, 0)?;
        progress.on_finalize_start(&cast.editor);
        let finalize_prompt = self.prompts.finalize(&narrative_state);
        let final_draft = self
            .exchange(session_id, 0, &cast.editor, &finalize_prompt)
            .await?;

        Ok(Transcript {
            discussion_log,
            narrative_state,
            final_draft,
            outcome,
        })
    }

    /// One grounded generation call, persisted before returning
    async fn exchange(
        &self,
        session_id: &str,
        round: usize,
        role: &Role,
        prompt: &str,
    ) -> Result<String, DiscussionError> {
        let storage_failure = |source: StoreError| DiscussionError::StorageFailure {
            session_id: session_id.to_string(),
            round,
            role: role.id.clone(),
            source,
        };

        let context = self
            .store
            .context(session_id, self.params.max_context_tokens)
            .await
            .map_err(storage_failure)?;
        let grounded = self.prompts.grounded(&context, prompt);
        let options = GenerationOptions::with_preset(&role.preset);

        debug!(
            "Turn: role {} via model {} ({} context message(s))",
            role.id,
            role.model,
            context.len()
        );

        let response = tokio::time::timeout(
            self.params.turn_timeout,
            self.gateway
                .generate(&grounded, session_id, &role.model, &options),
        )
        .await
        .unwrap_or(Err(GatewayError::Timeout))
        .map_err(|source| DiscussionError::GenerationFailure {
            session_id: session_id.to_string(),
            round,
            role: role.id.clone(),
            source,
        })?;

        self.store
            .append_exchange(session_id, prompt, &response)
            .await
            .map_err(storage_failure)?;

        Ok(response)
    }

    fn check_cancelled(&self, session_id: &str, round: usize) -> Result<(), DiscussionError> {
        if let Some(token) = &self.cancellation
            && token.is_cancelled()
        {
            return Err(DiscussionError::Cancelled {
                session_id: session_id.to_string(),
                round,
            });
        }
        Ok(())
    }
}
