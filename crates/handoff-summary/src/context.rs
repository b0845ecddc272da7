//! Append-only per-session context lines.

use std::collections::HashMap;
use std::sync::RwLock;

/// Ordered free-text context per session id.
///
/// Append-only until the session ends, at which point the whole entry
/// is discarded. Never persisted; used solely as summarization input.
#[derive(Debug, Default)]
pub struct ContextLog {
    contexts: RwLock<HashMap<String, Vec<String>>>,
}

impl ContextLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line to the session's context.
    pub fn append(&self, session_id: &str, message: &str) {
        let mut contexts = self.contexts.write().expect("context log poisoned");
        contexts
            .entry(session_id.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// The recorded lines joined with newlines, in append order.
    /// `None` when nothing was ever recorded for the session.
    pub fn joined(&self, session_id: &str) -> Option<String> {
        let contexts = self.contexts.read().expect("context log poisoned");
        contexts.get(session_id).map(|lines| lines.join("\n"))
    }

    /// Drops the session's context entirely.
    pub fn discard(&self, session_id: &str) {
        let mut contexts = self.contexts.write().expect("context log poisoned");
        contexts.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let log = ContextLog::new();
        log.append("s1", "a");
        log.append("s1", "b");
        log.append("s1", "c");
        assert_eq!(log.joined("s1").as_deref(), Some("a\nb\nc"));
    }

    #[test]
    fn sessions_are_isolated() {
        let log = ContextLog::new();
        log.append("s1", "one");
        log.append("s2", "two");
        assert_eq!(log.joined("s1").as_deref(), Some("one"));
        assert_eq!(log.joined("s2").as_deref(), Some("two"));
    }

    #[test]
    fn unrecorded_session_has_no_context() {
        let log = ContextLog::new();
        assert!(log.joined("missing").is_none());
    }

    #[test]
    fn discard_forgets_the_session() {
        let log = ContextLog::new();
        log.append("s1", "a");
        log.discard("s1");
        assert!(log.joined("s1").is_none());
    }
}
