//! sheconnects_core - Functional core for the sheconnects client.
//!
//! Everything in this crate is pure data and pure functions: no network, no
//! filesystem. The HTTP shell lives in `sheconnects_client`.

pub mod auth;
pub mod cache;
pub mod filter;
pub mod lifecycle;
pub mod media;
pub mod resource;
pub mod serde;
pub mod session;

pub use resource::{ItemId, ValidationError};
