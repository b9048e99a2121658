//! Session token provider.
//!
//! A [`Session`] is built once at startup around a [`TokenStore`] and passed
//! explicitly to every call that may need a bearer token.

mod error;
mod memory;
mod traits;
mod types;

pub use error::{Result, SessionError};
pub use memory::MemoryTokenStore;
pub use traits::TokenStore;
pub use types::{BearerToken, Session};
