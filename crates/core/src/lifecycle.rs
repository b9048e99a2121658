//! Request lifecycle tracking.
//!
//! Each logical operation moves `Idle -> Loading -> Success | Error -> Idle`.
//! Operations of different keys are independent; a second `begin` on a key
//! that is still `Loading` is rejected so the caller never issues a
//! duplicate request.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::resource::ItemId;

/// Logical operation a control can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKey {
    List,
    Create,
    Delete(ItemId),
    Register(ItemId),
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKey::List => f.write_str("list"),
            OperationKey::Create => f.write_str("create"),
            OperationKey::Delete(id) => write!(f, "delete-{}", id),
            OperationKey::Register(id) => write!(f, "register-{}", id),
        }
    }
}

/// State of one operation as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success,
    /// Failed with a message suitable for a dismissible notice.
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Operation {0} is already in progress")]
    AlreadyLoading(OperationKey),
}

/// Per-operation state machine for one collection.
#[derive(Debug, Clone, Default)]
pub struct LifecycleTracker {
    states: HashMap<OperationKey, RequestState>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; operations never started are `Idle`.
    pub fn state(&self, key: &OperationKey) -> RequestState {
        self.states.get(key).cloned().unwrap_or_default()
    }

    pub fn is_loading(&self, key: &OperationKey) -> bool {
        self.states.get(key).is_some_and(RequestState::is_loading)
    }

    /// Moves `key` to `Loading`. A settled `Success`/`Error` is implicitly
    /// dismissed first.
    pub fn begin(&mut self, key: OperationKey) -> Result<(), LifecycleError> {
        if self.is_loading(&key) {
            return Err(LifecycleError::AlreadyLoading(key));
        }
        self.states.insert(key, RequestState::Loading);
        Ok(())
    }

    /// `Loading -> Success`. Returns false if `key` was not loading.
    pub fn succeed(&mut self, key: &OperationKey) -> bool {
        self.settle(key, RequestState::Success)
    }

    /// `Loading -> Error`. Returns false if `key` was not loading.
    pub fn fail(&mut self, key: &OperationKey, message: impl Into<String>) -> bool {
        self.settle(key, RequestState::Error(message.into()))
    }

    /// Returns `key` to `Idle` without recording an outcome. Used when a
    /// request never left the client.
    pub fn abandon(&mut self, key: &OperationKey) -> bool {
        if self.is_loading(key) {
            self.states.remove(key);
            true
        } else {
            false
        }
    }

    /// `Success | Error -> Idle` (the user dismissed the outcome).
    pub fn dismiss(&mut self, key: &OperationKey) -> bool {
        match self.states.get(key) {
            Some(RequestState::Success) | Some(RequestState::Error(_)) => {
                self.states.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Keys currently in flight.
    pub fn in_flight(&self) -> Vec<OperationKey> {
        self.states
            .iter()
            .filter(|(_, state)| state.is_loading())
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Operations that ended in error and have not been dismissed.
    pub fn errors(&self) -> Vec<(OperationKey, String)> {
        self.states
            .iter()
            .filter_map(|(key, state)| {
                state
                    .error_message()
                    .map(|message| (key.clone(), message.to_string()))
            })
            .collect()
    }

    fn settle(&mut self, key: &OperationKey, outcome: RequestState) -> bool {
        match self.states.get_mut(key) {
            Some(state) if state.is_loading() => {
                *state = outcome;
                true
            }
            _ => false,
        }
    }
}
