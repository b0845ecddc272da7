//! Per-agent notification queues.

use std::collections::HashMap;
use std::sync::RwLock;

use handoff_types::Notification;

/// FIFO mailbox per agent id.
///
/// `drain` returns the whole queue and clears it in one write-lock
/// acquisition, so each notification is consumed by exactly one poll.
/// There is no acknowledgment or redelivery: an entry handed to a
/// poller that then crashes is gone.
#[derive(Debug, Default)]
pub struct Mailbox {
    queues: RwLock<HashMap<String, Vec<Notification>>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification to the agent's queue.
    pub fn push(&self, notification: Notification) {
        let mut queues = self.queues.write().expect("mailbox poisoned");
        queues
            .entry(notification.agent_id.clone())
            .or_default()
            .push(notification);
    }

    /// Returns all pending notifications for the agent, oldest first,
    /// clearing the queue atomically.
    pub fn drain(&self, agent_id: &str) -> Vec<Notification> {
        let mut queues = self.queues.write().expect("mailbox poisoned");
        queues.remove(agent_id).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_fifo_order() {
        let mailbox = Mailbox::new();
        mailbox.push(Notification::transfer_request("s1", "b1", "room_1", "t1"));
        mailbox.push(Notification::transfer_completed("s1", "b1", "room_0", "t2"));

        let drained = mailbox.drain("b1");
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].room, "room_1");
        assert_eq!(drained[1].room, "room_0");
    }

    #[test]
    fn drain_is_empty_after_consumption() {
        let mailbox = Mailbox::new();
        mailbox.push(Notification::transfer_request("s1", "b1", "room_1", "t1"));

        assert_eq!(mailbox.drain("b1").len(), 1);
        assert!(mailbox.drain("b1").is_empty());
    }

    #[test]
    fn queues_are_isolated_per_agent() {
        let mailbox = Mailbox::new();
        mailbox.push(Notification::transfer_request("s1", "b1", "room_1", "t1"));

        assert!(mailbox.drain("b2").is_empty());
        assert_eq!(mailbox.drain("b1").len(), 1);
    }

    #[test]
    fn unknown_agent_drains_empty() {
        let mailbox = Mailbox::new();
        assert!(mailbox.drain("nobody").is_empty());
    }
}
