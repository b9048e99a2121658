//! HTTP client for the sheconnects API.

pub mod auth;
pub mod collection;

pub use auth::AuthClient;
pub use collection::{CollectionApi, RegistrationApi, RemoteCollection};

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, StatusCode};
use sheconnects_core::session::Session;

use crate::error::{Result, SyncError};

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// HTTP client for the sheconnects API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Attaches the session's bearer token. Fails before anything is sent
    /// when there is no token.
    pub(crate) fn authorize(
        &self,
        builder: RequestBuilder,
        session: &Session,
    ) -> Result<RequestBuilder> {
        match session.token()? {
            Some(token) => Ok(builder.header(AUTHORIZATION, token.header_value())),
            None => Err(SyncError::Unauthenticated),
        }
    }

    /// Handle error responses. A 401 means the token is missing or stale.
    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| SyncError::InvalidResponse(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(SyncError::Unauthenticated)
        } else {
            Err(server_error(response).await)
        }
    }

    /// Handle responses whose body is not needed.
    pub(crate) async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::UNAUTHORIZED {
            Err(SyncError::Unauthenticated)
        } else {
            Err(server_error(response).await)
        }
    }
}

/// Builds a `ServerError` from a non-success response.
pub(crate) async fn server_error(response: reqwest::Response) -> SyncError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    SyncError::ServerError {
        status: status.as_u16(),
        message: error_message(status, &body),
    }
}

/// Picks the human-readable message out of an error body: the JSON
/// `message` field, else the raw text, else the status reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
