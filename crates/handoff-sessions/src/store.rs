//! The call-session store and its state machine.
//!
//! Status advances `active → transferring → transferred`; `ended` is
//! terminal and reachable from any non-terminal state. A second
//! `begin_transfer` on an `active` or `transferring` session is treated
//! as a retry and overwrites `agent_b` / `transfer_room`; once the
//! session is `transferred` or `ended` it is rejected.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use handoff_types::{CallSession, CallStatus};

use crate::error::SessionError;
use crate::ids;

/// In-memory map of all call sessions.
///
/// Uses `std::sync::RwLock` intentionally: all lock acquisitions are
/// brief HashMap operations (get/insert/mutate) that never span
/// `.await` points, making a synchronous lock safe and more efficient
/// than `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, CallSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session in `active` status and returns a snapshot.
    pub fn create(&self, caller_id: &str, room_name: &str) -> CallSession {
        let session = CallSession::new(
            ids::session_id(),
            caller_id.to_string(),
            room_name.to_string(),
        );
        let mut sessions = self.sessions.write().expect("session store poisoned");
        sessions.insert(session.session_id.clone(), session.clone());
        session
    }

    /// Records the agent handling the call.
    pub fn assign_agent_a(&self, session_id: &str, agent_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.agent_a = Some(agent_id.to_string());
        Ok(())
    }

    /// Returns a point-in-time snapshot of a session.
    ///
    /// Ended sessions remain readable; only unknown ids are an error.
    pub fn get(&self, session_id: &str) -> Result<CallSession, SessionError> {
        let sessions = self.sessions.read().expect("session store poisoned");
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Whether the session exists at all (any status).
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .expect("session store poisoned")
            .contains_key(session_id)
    }

    /// Moves the session to `transferring`, assigning Agent B and a
    /// fresh transfer-room name derived from the session id.
    ///
    /// Retrying while still `active`/`transferring` overwrites the
    /// previous assignment; a `transferred` or `ended` session yields
    /// [`SessionError::NotTransferable`].
    pub fn begin_transfer(
        &self,
        session_id: &str,
        agent_b_id: &str,
    ) -> Result<String, SessionError> {
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        match session.status {
            CallStatus::Active | CallStatus::Transferring => {}
            CallStatus::Transferred | CallStatus::Ended => {
                return Err(SessionError::NotTransferable(session_id.to_string()));
            }
        }

        let transfer_room = format!("transfer_{}_{}", session_id, ids::short_hex());
        session.agent_b = Some(agent_b_id.to_string());
        session.transfer_room = Some(transfer_room.clone());
        session.status = CallStatus::Transferring;
        Ok(transfer_room)
    }

    /// Overwrites the stored call summary.
    pub fn set_summary(&self, session_id: &str, summary: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.call_summary = summary.to_string();
        Ok(())
    }

    /// Moves a `transferring` session to `transferred` and returns a
    /// snapshot carrying the original room and Agent B identity.
    pub fn complete_transfer(&self, session_id: &str) -> Result<CallSession, SessionError> {
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        if session.agent_b.is_none() {
            return Err(SessionError::TransferNotInitiated(session_id.to_string()));
        }
        if session.status.is_terminal() {
            return Err(SessionError::NotTransferable(session_id.to_string()));
        }

        session.status = CallStatus::Transferred;
        Ok(session.clone())
    }

    /// Marks Agent A as having left the primary room.
    pub fn mark_agent_exited(&self, session_id: &str) -> Result<CallSession, SessionError> {
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.agent_a_exited = true;
        Ok(session.clone())
    }

    /// Moves the session to `ended`, recording `ended_at`.
    ///
    /// Idempotent: ending an already-ended session returns the existing
    /// snapshot unchanged.
    pub fn end(&self, session_id: &str) -> Result<CallSession, SessionError> {
        let mut sessions = self.sessions.write().expect("session store poisoned");
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        if !session.status.is_terminal() {
            session.status = CallStatus::Ended;
            session.ended_at = Some(Utc::now());
        }
        Ok(session.clone())
    }

    /// Number of sessions that have not ended.
    pub fn active_count(&self) -> usize {
        self.sessions
            .read()
            .expect("session store poisoned")
            .values()
            .filter(|s| s.status != CallStatus::Ended)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_session() -> (SessionStore, String) {
        let store = SessionStore::new();
        let session = store.create("caller_1", "call_abc123");
        (store, session.session_id)
    }

    #[test]
    fn status_follows_the_transfer_sequence() {
        let (store, id) = store_with_session();
        assert_eq!(store.get(&id).unwrap().status, CallStatus::Active);

        store.begin_transfer(&id, "agent_b_1").unwrap();
        assert_eq!(store.get(&id).unwrap().status, CallStatus::Transferring);

        store.complete_transfer(&id).unwrap();
        assert_eq!(store.get(&id).unwrap().status, CallStatus::Transferred);

        store.end(&id).unwrap();
        assert_eq!(store.get(&id).unwrap().status, CallStatus::Ended);
    }

    #[test]
    fn transfer_room_is_distinct_from_primary_room() {
        let (store, id) = store_with_session();
        let transfer_room = store.begin_transfer(&id, "agent_b_1").unwrap();
        let session = store.get(&id).unwrap();
        assert_ne!(transfer_room, session.room_name);
        assert_eq!(session.transfer_room.as_deref(), Some(transfer_room.as_str()));
        assert_eq!(session.agent_b.as_deref(), Some("agent_b_1"));
    }

    #[test]
    fn begin_transfer_retry_overwrites_assignment() {
        let (store, id) = store_with_session();
        let first_room = store.begin_transfer(&id, "agent_b_1").unwrap();
        let second_room = store.begin_transfer(&id, "agent_b_2").unwrap();
        assert_ne!(first_room, second_room);

        let session = store.get(&id).unwrap();
        assert_eq!(session.agent_b.as_deref(), Some("agent_b_2"));
        assert_eq!(session.transfer_room.as_deref(), Some(second_room.as_str()));
    }

    #[test]
    fn begin_transfer_rejected_after_completion() {
        let (store, id) = store_with_session();
        store.begin_transfer(&id, "agent_b_1").unwrap();
        store.complete_transfer(&id).unwrap();

        let err = store.begin_transfer(&id, "agent_b_2").unwrap_err();
        assert!(matches!(err, SessionError::NotTransferable(_)));
    }

    #[test]
    fn complete_transfer_requires_initiation() {
        let (store, id) = store_with_session();
        let err = store.complete_transfer(&id).unwrap_err();
        assert!(matches!(err, SessionError::TransferNotInitiated(_)));
    }

    #[test]
    fn end_is_reachable_from_any_state_and_idempotent() {
        // From active.
        let (store, id) = store_with_session();
        store.end(&id).unwrap();
        assert_eq!(store.get(&id).unwrap().status, CallStatus::Ended);

        // From transferring.
        let (store, id) = store_with_session();
        store.begin_transfer(&id, "b").unwrap();
        store.end(&id).unwrap();
        let first_ended_at = store.get(&id).unwrap().ended_at;
        assert!(first_ended_at.is_some());

        // Repeated end keeps the original timestamp.
        store.end(&id).unwrap();
        assert_eq!(store.get(&id).unwrap().ended_at, first_ended_at);
    }

    #[test]
    fn ended_sessions_remain_readable() {
        let (store, id) = store_with_session();
        store.end(&id).unwrap();
        assert!(store.get(&id).is_ok());
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn unknown_session_is_not_found() {
        let store = SessionStore::new();
        assert!(matches!(
            store.get("nope"),
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            store.begin_transfer("nope", "b"),
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(store.end("nope"), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn agent_a_assignment_and_exit() {
        let (store, id) = store_with_session();
        store.assign_agent_a(&id, "agent_a_1").unwrap();
        assert_eq!(store.get(&id).unwrap().agent_a.as_deref(), Some("agent_a_1"));

        let snapshot = store.mark_agent_exited(&id).unwrap();
        assert!(snapshot.agent_a_exited);
    }
}
