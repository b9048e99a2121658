use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("token storage error: {0}")]
    Storage(String),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
