//! Agent-facing notifications for the polling mailbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Agent B is being asked to join a briefing room.
    TransferRequest,
    /// The hand-off finished; Agent B should join the customer room.
    TransferCompleted,
}

/// One entry in an agent's mailbox.
///
/// Delivery is at-most-once: whichever poll drains the mailbox first
/// consumes the entry, and there is no redelivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub session_id: String,
    /// The agent this notification is addressed to.
    pub agent_id: String,
    /// Room the agent is being asked to join.
    pub room: String,
    /// Access token scoped to that room.
    pub token: String,
    /// Human-readable description shown in the agent UI.
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Builds a `transfer_request` notification asking `agent_id` to
    /// join the briefing room.
    pub fn transfer_request(
        session_id: impl Into<String>,
        agent_id: impl Into<String>,
        transfer_room: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let transfer_room = transfer_room.into();
        Self {
            kind: NotificationKind::TransferRequest,
            session_id: session_id.into(),
            agent_id: agent_id.into(),
            message: format!(
                "Incoming warm transfer from Agent A. Join transfer room: {transfer_room}"
            ),
            room: transfer_room,
            token: token.into(),
            timestamp: Utc::now(),
        }
    }

    /// Builds a `transfer_completed` notification pointing `agent_id`
    /// at the original customer room.
    pub fn transfer_completed(
        session_id: impl Into<String>,
        agent_id: impl Into<String>,
        original_room: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let original_room = original_room.into();
        Self {
            kind: NotificationKind::TransferCompleted,
            session_id: session_id.into(),
            agent_id: agent_id.into(),
            message: format!("Transfer completed! Join customer room: {original_room}"),
            room: original_room,
            token: token.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_snake_case() {
        let n = Notification::transfer_request("s1", "b1", "transfer_s1_ab", "tok");
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "transfer_request");
        assert_eq!(json["room"], "transfer_s1_ab");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("transfer_s1_ab"));
    }

    #[test]
    fn completed_points_at_original_room() {
        let n = Notification::transfer_completed("s1", "b1", "call_123", "tok");
        assert_eq!(n.kind, NotificationKind::TransferCompleted);
        assert_eq!(n.room, "call_123");
        assert!(n.message.contains("call_123"));
    }
}
