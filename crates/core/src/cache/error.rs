use thiserror::Error;

/// Errors raised when reconciling optimistic cache changes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Item already cached: {0}")]
    DuplicateId(String),
    #[error("Unknown or already reconciled pending token: {0}")]
    UnknownToken(u64),
    #[error("Pending token {0} does not belong to this kind of change")]
    TokenKindMismatch(u64),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
