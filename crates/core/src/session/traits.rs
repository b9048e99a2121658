use std::fmt;

use super::{BearerToken, Result};

/// A single durable slot holding the bearer token. No expiry tracking.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Reads the stored token, if any.
    fn load(&self) -> Result<Option<BearerToken>>;

    /// Replaces the stored token.
    fn save(&self, token: &BearerToken) -> Result<()>;

    /// Empties the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}
