//! sheconnects_client - HTTP client, list sync engine and CLI for the
//! sheconnects API.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod sync;
pub mod token_file;

pub use client::{ApiClient, AuthClient, CollectionApi, RegistrationApi, RemoteCollection};
pub use config::Config;
pub use error::{Result, SyncError};
pub use sync::{FormController, LoadHandle, ResourceList};
pub use token_file::FileTokenStore;
