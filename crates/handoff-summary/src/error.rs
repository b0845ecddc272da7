use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("completion request failed: {0}")]
    RequestFailed(String),

    #[error("unparseable completion response: {0}")]
    Parse(String),
}
