//! Call session records and the status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a call session.
///
/// Advances `Active → Transferring → Transferred`; `Ended` is terminal
/// and reachable from any non-terminal state (abort/hangup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Caller and Agent A are connected in the primary room.
    Active,
    /// A hand-off to Agent B is in progress; the briefing room exists.
    Transferring,
    /// Agent B has taken over the primary room.
    Transferred,
    /// The call is over and rooms are torn down.
    Ended,
}

impl CallStatus {
    /// Whether the session can still change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, CallStatus::Ended)
    }
}

/// One active (or recently ended) call.
///
/// `transfer_room` and `agent_b` are either both absent or both
/// present: they are set together when a transfer is initiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSession {
    /// Opaque unique identifier, assigned at creation.
    pub session_id: String,
    /// Identity of the customer on the call.
    pub caller_id: String,
    /// Name of the primary media room.
    pub room_name: String,
    /// The agent currently (or originally) handling the call.
    pub agent_a: Option<String>,
    /// The agent the call is being handed to, once a transfer starts.
    pub agent_b: Option<String>,
    pub status: CallStatus,
    /// AI-generated summary of the call; empty until a transfer is
    /// initiated, overwritten each time one is regenerated.
    pub call_summary: String,
    /// Name of the secondary room used for the agent briefing.
    pub transfer_room: Option<String>,
    /// True once Agent A has been removed from the primary room.
    pub agent_a_exited: bool,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl CallSession {
    /// Creates a fresh session in `Active` status.
    pub fn new(session_id: String, caller_id: String, room_name: String) -> Self {
        Self {
            session_id,
            caller_id,
            room_name,
            agent_a: None,
            agent_b: None,
            status: CallStatus::Active,
            call_summary: String::new(),
            transfer_room: None,
            agent_a_exited: false,
            created_at: Utc::now(),
            ended_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(CallStatus::Transferring).unwrap(),
            serde_json::json!("transferring")
        );
        assert_eq!(
            serde_json::from_str::<CallStatus>("\"ended\"").unwrap(),
            CallStatus::Ended
        );
    }

    #[test]
    fn new_session_starts_active() {
        let s = CallSession::new("s1".into(), "c1".into(), "room".into());
        assert_eq!(s.status, CallStatus::Active);
        assert!(s.agent_a.is_none());
        assert!(s.transfer_room.is_none());
        assert!(s.call_summary.is_empty());
        assert!(!s.agent_a_exited);
        assert!(s.ended_at.is_none());
    }

    #[test]
    fn only_ended_is_terminal() {
        assert!(CallStatus::Ended.is_terminal());
        assert!(!CallStatus::Active.is_terminal());
        assert!(!CallStatus::Transferring.is_terminal());
        assert!(!CallStatus::Transferred.is_terminal());
    }
}
