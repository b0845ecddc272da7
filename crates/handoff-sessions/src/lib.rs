//! In-memory session state for the handoff platform.
//!
//! Owns the call-session state machine, the per-agent notification
//! mailbox, and the agent roster. Everything here is process-memory
//! only: a restart forgets all calls, which is the documented scope.
//! The store is an explicit object handed to the HTTP handlers rather
//! than a process-wide singleton, so a shared/networked store can be
//! swapped in behind the same surface later.

pub mod directory;
pub mod error;
pub mod ids;
pub mod mailbox;
pub mod store;

pub use directory::AgentDirectory;
pub use error::SessionError;
pub use mailbox::Mailbox;
pub use store::SessionStore;
