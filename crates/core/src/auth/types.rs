use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::{required, ValidationError};

use super::validation::{validate_email, validate_password, validate_phone};

/// Body of `POST /api/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Trims and validates the credentials.
    pub fn new(email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = required("email", email)?;
        let password = required("password", password)?;
        validate_email(&email)?;
        validate_password(&password)?;
        Ok(Self { email, password })
    }
}

/// Body of `POST /api/signup`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SignupRequest {
    /// Trims and validates the signup form.
    pub fn new(name: &str, email: &str, phone: &str, password: &str) -> Result<Self, ValidationError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let phone = required("phone", phone)?;
        let password = required("password", password)?;
        validate_email(&email)?;
        validate_phone(&phone)?;
        validate_password(&password)?;
        Ok(Self {
            name,
            email,
            phone,
            password,
        })
    }
}

/// Response of both auth endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"********")
            .finish()
    }
}
