use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("call session not found: {0}")]
    NotFound(String),

    /// The session already reached `transferred` or `ended`; initiating
    /// another transfer would silently redirect a finished hand-off.
    #[error("session {0} is no longer transferable")]
    NotTransferable(String),

    /// `complete_transfer` was called before any transfer was initiated.
    #[error("no transfer in progress for session {0}")]
    TransferNotInitiated(String),
}
