//! Shared domain types for the handoff platform.
//!
//! Call sessions, agent notifications, and the agent roster are defined
//! here so the session store, the HTTP surface, and tests all speak the
//! same vocabulary.

pub mod agent;
pub mod notification;
pub mod session;

pub use agent::{Agent, AgentKind, AgentStatus};
pub use notification::{Notification, NotificationKind};
pub use session::{CallSession, CallStatus};
