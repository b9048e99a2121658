mod error;
mod store;

pub use error::{CacheError, Result};
pub use store::{CollectionCache, PendingToken};
