//! Room provider integration for the handoff platform.
//!
//! Wraps the LiveKit server API: room create/delete, participant
//! list/remove, and locally signed join tokens. Every remote operation
//! degrades instead of failing — an unconfigured or unreachable
//! provider yields synthesized placeholder values so the transfer
//! orchestration never blocks on room infrastructure. The
//! [`Provided`] result type records which path produced a value.

pub mod config;
pub mod error;
pub mod service;

pub use config::LiveKitConfig;
pub use error::RoomError;
pub use service::{Provided, RoomInfo, RoomParticipant, RoomService};
