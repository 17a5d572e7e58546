//! Session registry

use super::{RegistryError, RoleRegistry};
use council_domain::Session;
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;
use uuid::Uuid;

/// One registered session plus its run lock.
///
/// The session itself sits behind a short-lived `RwLock` so snapshots never
/// wait on a running discussion; `run_lock` is held for the whole of a run
/// and serializes runs against the same session.
#[derive(Debug)]
pub struct SessionSlot {
    session: RwLock<Session>,
    run_lock: Arc<Mutex<()>>,
}

impl SessionSlot {
    fn new(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Clone of the current session state
    pub fn snapshot(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the narrative state
    pub fn set_narrative_state(&self, state: impl Into<String>) {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_narrative_state(state);
    }

    /// Wait until no other run holds this session, then hold it
    pub async fn acquire_run(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.run_lock).lock_owned().await
    }
}

/// Table of active sessions
///
/// Backed by a sharded `DashMap`: operations on unrelated session ids do
/// not serialize on a shared lock. Sessions are never removed here.
#[derive(Debug)]
pub struct SessionRegistry {
    roles: Arc<RoleRegistry>,
    sessions: DashMap<String, Arc<SessionSlot>>,
}

impl SessionRegistry {
    /// Create a registry that validates participants against `roles`
    pub fn new(roles: Arc<RoleRegistry>) -> Self {
        Self {
            roles,
            sessions: DashMap::new(),
        }
    }

    /// Create a session and return its fresh id.
    ///
    /// Every participant must already be a registered role.
    pub fn create(
        &self,
        theme: impl Into<String>,
        participants: Vec<String>,
        initial_state: impl Into<String>,
    ) -> Result<String, RegistryError> {
        if let Some(unknown) = participants.iter().find(|p| !self.roles.contains(p)) {
            return Err(RegistryError::UnknownParticipant(unknown.clone()));
        }

        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone(), theme, participants, initial_state)?;
        info!(
            "Created session {} with participants [{}]",
            id,
            session.participants().join(", ")
        );
        self.sessions
            .insert(id.clone(), Arc::new(SessionSlot::new(session)));
        Ok(id)
    }

    /// Snapshot of a session
    pub fn get(&self, id: &str) -> Result<Session, RegistryError> {
        self.slot(id).map(|slot| slot.snapshot())
    }

    /// Shared handle to a session slot
    pub fn slot(&self, id: &str) -> Result<Arc<SessionSlot>, RegistryError> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::SessionNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
