use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{MemoryTokenStore, Result, TokenStore};

/// Opaque bearer credential. Never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Bearer <token>` header value.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(********)")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("********")
    }
}

/// Handle to the token slot, cheap to clone.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// A session with an empty in-memory slot.
    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// A session with an in-memory slot holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryTokenStore::with_token(BearerToken::new(token))))
    }

    pub fn token(&self) -> Result<Option<BearerToken>> {
        self.store.load()
    }

    pub fn set_token(&self, token: BearerToken) -> Result<()> {
        self.store.save(&token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.store.clear()
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }
}
