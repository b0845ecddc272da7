use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelephonyError {
    /// Twilio credentials are absent; the bridge is unavailable.
    #[error("Twilio integration not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("Twilio error: {0}")]
    Provider(String),
}
