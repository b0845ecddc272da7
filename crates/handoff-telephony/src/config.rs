use serde::{Deserialize, Serialize};
use std::fmt;

/// Twilio credentials and the caller-id number for outbound dials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,
    #[serde(default, skip_serializing)]
    pub auth_token: String,
    /// E.164 source number outbound calls are placed from.
    #[serde(default)]
    pub phone_number: String,
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

impl TwilioConfig {
    pub fn is_configured(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.phone_number.is_empty()
    }
}
