use thiserror::Error;

/// Client-side validation failures. These never reach the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be a non-negative integer (got {value:?})")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be a date in YYYY-MM-DD format (got {value:?})")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field} must be a time in HH:MM format (got {value:?})")]
    InvalidTime { field: &'static str, value: String },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Unsupported category {value:?} (expected one of: {expected})")]
    UnsupportedCategory { value: String, expected: String },
    #[error("Image size must be under 1MB (got {size} bytes)")]
    ImageTooLarge { size: usize },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Phone number must be 10 digits")]
    InvalidPhone,
    #[error("Already registered for event {0}")]
    AlreadyRegistered(String),
    #[error("Item {0} has not been saved yet")]
    NotSaved(String),
}
