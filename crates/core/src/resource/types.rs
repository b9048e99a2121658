use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serde::{deserialize_optional_string, deserialize_seat_count};

/// Prefix of ids handed out to optimistic items before the server assigns one.
pub const PROVISIONAL_ID_PREFIX: &str = "pending-";

/// Event categories offered by the event form and filter.
pub const EVENT_CATEGORIES: &[&str] = &["workshop", "seminar", "conference", "social"];

/// Employment kinds offered by the job form. Jobs are filtered by kind.
pub const EMPLOYMENT_KINDS: &[&str] = &["full-time", "part-time", "internship"];

/// Server-assigned identifier of a resource item (the backend's `_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh id for an optimistic item that has not been confirmed yet.
    pub fn provisional() -> Self {
        Self(format!("{}{}", PROVISIONAL_ID_PREFIX, Uuid::new_v4()))
    }

    /// Returns true if this id was minted locally by [`ItemId::provisional`].
    pub fn is_provisional(&self) -> bool {
        self.0.starts_with(PROVISIONAL_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Common view over posts, events and jobs used by the cache and filter.
pub trait ResourceItem: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    fn id(&self) -> &ItemId;

    /// Display name.
    fn title(&self) -> &str;

    /// Free text (post content, event or job description).
    fn body(&self) -> &str;

    /// Image reference, either a URL or an inline data URL.
    fn media(&self) -> Option<&str>;

    /// Category used by the category filter. `None` never matches a concrete category.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Fields the search term is matched against, in display order.
    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.title(), self.body()]
    }

    /// Lower-cased searchable fields joined by newlines.
    fn searchable_text(&self) -> String {
        self.searchable_fields().join("\n").to_lowercase()
    }
}

/// Author of a post. The backend returns either a populated profile or a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Profile {
        #[serde(default)]
        name: Option<String>,
    },
    Id(String),
}

impl Author {
    /// Name to show next to a post.
    pub fn display_name(&self) -> &str {
        match self {
            Author::Profile { name: Some(name) } => name,
            _ => "Unknown author",
        }
    }
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub title: String,
    pub content: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            image: None,
            author: None,
            created_at: None,
        }
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(Author::display_name)
            .unwrap_or("Unknown author")
    }
}

impl ResourceItem for Post {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.content
    }

    fn media(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// A scheduled event people can register for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_seat_count")]
    pub available_seats: u32,
}

impl Event {
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            image_url: None,
            available_seats: 0,
        }
    }

    pub fn with_seats(mut self, seats: u32) -> Self {
        self.available_seats = seats;
        self
    }

    pub fn has_seats(&self) -> bool {
        self.available_seats > 0
    }
}

impl ResourceItem for Event {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn media(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    /// Employment kind (`full-time`, `part-time`, `internship`).
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Job {
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: company.into(),
            location: String::new(),
            description: description.into(),
            kind: "full-time".to_string(),
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl ResourceItem for Job {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn media(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        Some(&self.kind)
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.company, &self.description]
    }
}
