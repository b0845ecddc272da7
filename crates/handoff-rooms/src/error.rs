use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("LiveKit token error: {0}")]
    Token(#[from] livekit_api::access_token::AccessTokenError),

    #[error("room service error: {0}")]
    Service(String),
}
