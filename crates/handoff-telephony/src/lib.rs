//! Outbound telephony bridge.
//!
//! Escape hatch for transfers that leave the media-room world entirely:
//! the generated call summary is spoken to the destination over a
//! Twilio outbound call before dialing. Available only when Twilio
//! credentials are configured; everything else in the platform works
//! without them.

pub mod config;
pub mod error;
pub mod service;

pub use config::TwilioConfig;
pub use error::TelephonyError;
pub use service::TelephonyService;
