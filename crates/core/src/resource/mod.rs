//! Resource model shared by every list page: items, drafts and the adapters
//! that describe how each resource type talks to the backend.

mod adapter;
mod draft;
mod error;
mod types;

pub use adapter::{Events, InsertPosition, Jobs, Posts, ResourceAdapter};
pub use draft::{
    Draft, EventDraft, EventPayload, JobDraft, JobPayload, PostDraft, PostPayload,
    DEFAULT_EMPLOYMENT_KIND, DEFAULT_EVENT_CATEGORY,
};
pub use error::ValidationError;

pub(crate) use draft::required;
pub use types::{
    Author, Event, ItemId, Job, Post, ResourceItem, EMPLOYMENT_KINDS, EVENT_CATEGORIES,
    PROVISIONAL_ID_PREFIX,
};
