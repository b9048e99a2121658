use std::sync::Mutex;

use super::{BearerToken, Result, SessionError, TokenStore};

/// Process-local token slot. Used for anonymous sessions and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<BearerToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: BearerToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

fn poisoned<T>(_: T) -> SessionError {
    SessionError::Storage("token slot lock poisoned".to_string())
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<BearerToken>> {
        Ok(self.slot.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, token: &BearerToken) -> Result<()> {
        *self.slot.lock().map_err(poisoned)? = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().map_err(poisoned)? = None;
        Ok(())
    }
}
