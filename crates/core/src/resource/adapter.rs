use serde::de::DeserializeOwned;
use serde::Serialize;

use super::draft::{Draft, EventDraft, EventPayload, JobDraft, JobPayload, PostDraft, PostPayload};
use super::types::{Event, ItemId, Job, Post, ResourceItem, EMPLOYMENT_KINDS, EVENT_CATEGORIES};

/// Where newly created items land in the cached sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Most recent first.
    Front,
    /// Append order.
    Back,
}

/// Per-resource parameters for the generic list engine.
///
/// Implemented by zero-sized marker types ([`Posts`], [`Events`], [`Jobs`]).
pub trait ResourceAdapter: Send + Sync + 'static {
    type Item: ResourceItem + Serialize + DeserializeOwned;
    type Draft: Draft;

    /// Short name used in logs and the CLI.
    const NAME: &'static str;

    /// Collection endpoint, e.g. `/api/blogs`.
    const BASE_PATH: &'static str;

    /// Whether create and delete must carry a bearer token.
    const REQUIRES_AUTH: bool;

    const INSERT_POSITION: InsertPosition;

    /// Concrete categories accepted by the category filter (besides `"all"`).
    const CATEGORIES: &'static [&'static str];

    /// Key wrapping the created item in the create response, if any.
    const CREATED_ENVELOPE: Option<&'static str>;

    /// Builds the placeholder shown while a create is in flight.
    fn provisional_item(id: ItemId, payload: &<Self::Draft as Draft>::Payload) -> Self::Item;

    /// Path of a single item.
    fn item_path(id: &ItemId) -> String {
        format!("{}/{}", Self::BASE_PATH, id)
    }
}

/// Blog posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Posts;

impl ResourceAdapter for Posts {
    type Item = Post;
    type Draft = PostDraft;

    const NAME: &'static str = "posts";
    const BASE_PATH: &'static str = "/api/blogs";
    const REQUIRES_AUTH: bool = true;
    const INSERT_POSITION: InsertPosition = InsertPosition::Front;
    const CATEGORIES: &'static [&'static str] = &[];
    const CREATED_ENVELOPE: Option<&'static str> = None;

    fn provisional_item(id: ItemId, payload: &PostPayload) -> Post {
        let mut post = Post::new(id, payload.title.clone(), payload.content.clone());
        post.image = Some(payload.image.clone()).filter(|image| !image.is_empty());
        post
    }
}

/// Events, with registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Events;

impl Events {
    /// Registration sub-resource of an event.
    pub fn register_path(id: &ItemId) -> String {
        format!("{}/register", Self::item_path(id))
    }
}

impl ResourceAdapter for Events {
    type Item = Event;
    type Draft = EventDraft;

    const NAME: &'static str = "events";
    const BASE_PATH: &'static str = "/api/events";
    const REQUIRES_AUTH: bool = false;
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;
    const CATEGORIES: &'static [&'static str] = EVENT_CATEGORIES;
    const CREATED_ENVELOPE: Option<&'static str> = Some("event");

    fn provisional_item(id: ItemId, payload: &EventPayload) -> Event {
        Event {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            category: payload.category.clone(),
            date: payload.date.clone(),
            time: payload.time.clone(),
            location: payload.location.clone(),
            image_url: Some(payload.image_url.clone()).filter(|url| !url.is_empty()),
            available_seats: payload.available_seats,
        }
    }
}

/// Job postings, filtered by employment kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jobs;

impl ResourceAdapter for Jobs {
    type Item = Job;
    type Draft = JobDraft;

    const NAME: &'static str = "jobs";
    const BASE_PATH: &'static str = "/api/jobs";
    const REQUIRES_AUTH: bool = false;
    const INSERT_POSITION: InsertPosition = InsertPosition::Back;
    const CATEGORIES: &'static [&'static str] = EMPLOYMENT_KINDS;
    const CREATED_ENVELOPE: Option<&'static str> = Some("job");

    fn provisional_item(id: ItemId, payload: &JobPayload) -> Job {
        Job {
            id,
            title: payload.title.clone(),
            company: payload.company.clone(),
            location: payload.location.clone(),
            description: payload.description.clone(),
            kind: payload.kind.clone(),
        }
    }
}
