//! Error types for Stockroom.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Validation errors: local, field-scoped, never reach the remote
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    // Remote errors
    #[error("Remote error: {0}")]
    Remote(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unauthorized: please login first")]
    Unauthorized,

    // Auth errors
    #[error("{0}")]
    Auth(String),

    // Infrastructure errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Field-scoped validation error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for errors produced by local validation, which block a
    /// submission before any remote call is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
