use bee_core::{GENERIC_FAILURE, LetterError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Caught locally; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The service answered with a failure tag and message.
    #[error("{message}")]
    Server { message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("service sent an unusable grid: {0}")]
    InvalidGrid(#[from] LetterError),

    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn server(message: impl Into<String>) -> Self {
        ClientError::Server {
            message: message.into(),
        }
    }

    pub fn is_server_reported(&self) -> bool {
        matches!(self, ClientError::Server { .. })
    }

    /// Text to put in front of the player. Local and server messages are
    /// shown verbatim; everything else gets the generic failure notice.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(err) => err.to_string(),
            ClientError::Server { message } => message.clone(),
            ClientError::Transport(_)
            | ClientError::Status { .. }
            | ClientError::Decode(_)
            | ClientError::InvalidGrid(_)
            | ClientError::InvalidUrl(_) => GENERIC_FAILURE.to_string(),
        }
    }
}
