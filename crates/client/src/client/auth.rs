//! Login and signup.

use serde::Serialize;
use sheconnects_core::auth::{AuthResponse, LoginRequest, SignupRequest};
use sheconnects_core::session::{BearerToken, Session};
use tracing::info;

use super::{server_error, ApiClient};
use crate::error::{Result, SyncError};

pub const LOGIN_PATH: &str = "/api/login";
pub const SIGNUP_PATH: &str = "/api/signup";

/// Authentication endpoints. Successful calls store the returned token in
/// the session.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
    session: Session,
}

impl AuthClient {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let response = self.post(LOGIN_PATH, request).await?;
        info!(email = %request.email, "logged in");
        Ok(response)
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse> {
        let response = self.post(SIGNUP_PATH, request).await?;
        info!(email = %request.email, "signed up");
        Ok(response)
    }

    /// Forgets the stored token. No request is made.
    pub fn logout(&self) -> Result<()> {
        self.session.clear_token()?;
        info!("logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session.is_authenticated()?)
    }

    // Auth endpoints answer bad credentials with 401, which is a server
    // message here rather than a missing session.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<AuthResponse> {
        let response = self
            .api
            .http()
            .post(self.api.url(path))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(server_error(response).await);
        }
        let text = response.text().await?;
        let auth: AuthResponse =
            serde_json::from_str(&text).map_err(|e| SyncError::InvalidResponse(e.to_string()))?;
        if let Some(token) = auth.token.as_deref().filter(|t| !t.is_empty()) {
            self.session.set_token(BearerToken::new(token))?;
        }
        Ok(auth)
    }
}
