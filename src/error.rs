//! Error types for the skill domain

use thiserror::Error;

/// Errors raised while handling a platform event
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("invalid application id: expected '{expected}', got '{actual}'")]
    InvalidApplicationId { expected: String, actual: String },

    #[error("malformed event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("event is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("unknown dialog mode: '{0}'")]
    UnknownDialogMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type SkillResult<T> = Result<T, SkillError>;
