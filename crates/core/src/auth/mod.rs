//! Login and signup request types and the credential checks run before
//! either form is submitted.

mod types;
mod validation;

pub use types::{AuthResponse, LoginRequest, SignupRequest};
pub use validation::{
    validate_email, validate_password, validate_phone, MIN_PASSWORD_LEN, PHONE_DIGITS,
};
