//! Identifier generation helpers.

use uuid::Uuid;

/// Returns a fresh 8-character hex suffix for collision-resistant
/// human-readable names (`call_ab12cd34`, `transfer_<id>_ab12cd34`).
pub fn short_hex() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Returns a full v4 UUID string, used for session ids.
pub fn session_id() -> String {
    Uuid::new_v4().to_string()
}
