use thiserror::Error;

/// Errors raised while decoding or encoding signaling frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed signaling frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid connection id '{0}'")]
    InvalidConnectionId(String),
}
