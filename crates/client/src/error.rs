//! Client error types.

use sheconnects_core::cache::CacheError;
use sheconnects_core::lifecycle::{LifecycleError, OperationKey};
use sheconnects_core::session::SessionError;
use sheconnects_core::ValidationError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while syncing a resource list.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not authenticated: please log in first")]
    Unauthenticated,

    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Operation {operation} is already in progress")]
    Busy { operation: OperationKey },

    #[error("Result discarded: the request was cancelled")]
    Cancelled,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    /// True for failures resolved on the client without a network round trip.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SyncError::Validation(_) | SyncError::Unauthenticated | SyncError::Busy { .. }
        )
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SyncError::InvalidResponse(error.to_string())
        } else {
            SyncError::Network(error.to_string())
        }
    }
}

impl From<LifecycleError> for SyncError {
    fn from(error: LifecycleError) -> Self {
        match error {
            LifecycleError::AlreadyLoading(operation) => SyncError::Busy { operation },
        }
    }
}
