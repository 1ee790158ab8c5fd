use thiserror::Error;

/// Errors surfaced by a chat session.
///
/// `Configuration` is the only fatal variant: it is raised by the startup
/// credential check, before any session exists. Everything else is displayed
/// inline and the session continues.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The stream broke after the request was sent. `partial` holds every
    /// fragment that had already been delivered to the caller.
    #[error("stream failed: {message}")]
    StreamFailure { message: String, partial: String },

    #[error("invalid turn: {0}")]
    InvalidTurn(String),

    #[error("invalid streamer state: {0}")]
    InvalidState(String),
}

impl ChatError {
    /// Text already produced before the failure, if any.
    pub fn partial(&self) -> Option<&str> {
        match self {
            ChatError::StreamFailure { partial, .. } if !partial.is_empty() => Some(partial),
            _ => None,
        }
    }
}

/// Errors related to secret storage backends.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret not found")]
    NotFound,

    #[error("secret provider is read-only: {0}")]
    ReadOnly(String),

    #[error("secret backend error: {0}")]
    Backend(String),
}
