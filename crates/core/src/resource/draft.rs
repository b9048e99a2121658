//! Drafts: the mutable, form-side mirror of a resource's creatable fields.
//!
//! A draft holds raw user input as strings. [`Draft::to_payload`] validates
//! it and produces the typed JSON body sent to the backend, leaving the
//! draft itself untouched.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::error::ValidationError;
use super::types::{EMPLOYMENT_KINDS, EVENT_CATEGORIES};

/// Category preselected in a fresh event draft.
pub const DEFAULT_EVENT_CATEGORY: &str = "workshop";

/// Employment kind preselected in a fresh job draft.
pub const DEFAULT_EMPLOYMENT_KIND: &str = "full-time";

/// Form-side record for one resource type. `Default` is the empty form.
pub trait Draft: Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// JSON body for the create call.
    type Payload: Serialize + Clone + fmt::Debug + Send + Sync + 'static;

    /// Field names accepted by [`Draft::set_field`], using the wire names.
    const FIELDS: &'static [&'static str];

    /// Replaces one field. Unknown names are rejected.
    fn set_field(&mut self, name: &str, value: String) -> Result<(), ValidationError>;

    /// Current raw value of a field.
    fn field(&self, name: &str) -> Option<&str>;

    /// Validates the draft and builds the request body.
    fn to_payload(&self) -> Result<Self::Payload, ValidationError>;

    fn validate(&self) -> Result<(), ValidationError> {
        self.to_payload().map(|_| ())
    }
}

/// Trimmed value of a mandatory text field.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn one_of(value: &str, allowed: &[&str]) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if allowed.contains(&trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::UnsupportedCategory {
            value: trimmed.to_string(),
            expected: allowed.join(", "),
        })
    }
}

fn unknown(name: &str) -> ValidationError {
    ValidationError::UnknownField(name.to_string())
}

/// Draft for a new blog post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Inline `data:` URL produced by [`crate::media::encode_image`].
    pub image: Option<String>,
}

/// Body of `POST /api/blogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    /// Base64 data URL or empty string when no image is attached.
    pub image: String,
}

impl Draft for PostDraft {
    type Payload = PostPayload;

    const FIELDS: &'static [&'static str] = &["title", "content", "image"];

    fn set_field(&mut self, name: &str, value: String) -> Result<(), ValidationError> {
        match name {
            "title" => self.title = value,
            "content" => self.content = value,
            "image" => self.image = Some(value).filter(|v| !v.is_empty()),
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "content" => Some(&self.content),
            "image" => Some(self.image.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    fn to_payload(&self) -> Result<PostPayload, ValidationError> {
        Ok(PostPayload {
            title: required("title", &self.title)?,
            content: required("content", &self.content)?,
            image: self.image.clone().unwrap_or_default(),
        })
    }
}

/// Draft for a new event. Seats are kept as typed text until validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub image_url: String,
    pub available_seats: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: DEFAULT_EVENT_CATEGORY.to_string(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            image_url: String::new(),
            available_seats: "0".to_string(),
        }
    }
}

/// Body of `POST /api/events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub image_url: String,
    pub available_seats: u32,
}

impl Draft for EventDraft {
    type Payload = EventPayload;

    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "category",
        "date",
        "time",
        "location",
        "imageUrl",
        "availableSeats",
    ];

    fn set_field(&mut self, name: &str, value: String) -> Result<(), ValidationError> {
        match name {
            "title" => self.title = value,
            "description" => self.description = value,
            "category" => self.category = value,
            "date" => self.date = value,
            "time" => self.time = value,
            "location" => self.location = value,
            "imageUrl" => self.image_url = value,
            "availableSeats" => self.available_seats = value,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "category" => Some(&self.category),
            "date" => Some(&self.date),
            "time" => Some(&self.time),
            "location" => Some(&self.location),
            "imageUrl" => Some(&self.image_url),
            "availableSeats" => Some(&self.available_seats),
            _ => None,
        }
    }

    fn to_payload(&self) -> Result<EventPayload, ValidationError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let category = one_of(&self.category, EVENT_CATEGORIES)?;

        let date = required("date", &self.date)?;
        NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
            field: "date",
            value: date.clone(),
        })?;

        let time = required("time", &self.time)?;
        NaiveTime::parse_from_str(&time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&time, "%H:%M:%S"))
            .map_err(|_| ValidationError::InvalidTime {
                field: "time",
                value: time.clone(),
            })?;

        let location = required("location", &self.location)?;

        let seats = required("availableSeats", &self.available_seats)?;
        let available_seats = seats
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidNumber {
                field: "availableSeats",
                value: seats.clone(),
            })?;

        Ok(EventPayload {
            title,
            description,
            category,
            date,
            time,
            location,
            image_url: self.image_url.trim().to_string(),
            available_seats,
        })
    }
}

/// Draft for a new job posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub kind: String,
}

impl Default for JobDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            description: String::new(),
            kind: DEFAULT_EMPLOYMENT_KIND.to_string(),
        }
    }
}

/// Body of `POST /api/jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Draft for JobDraft {
    type Payload = JobPayload;

    const FIELDS: &'static [&'static str] = &["title", "company", "location", "description", "type"];

    fn set_field(&mut self, name: &str, value: String) -> Result<(), ValidationError> {
        match name {
            "title" => self.title = value,
            "company" => self.company = value,
            "location" => self.location = value,
            "description" => self.description = value,
            "type" => self.kind = value,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "company" => Some(&self.company),
            "location" => Some(&self.location),
            "description" => Some(&self.description),
            "type" => Some(&self.kind),
            _ => None,
        }
    }

    fn to_payload(&self) -> Result<JobPayload, ValidationError> {
        Ok(JobPayload {
            title: required("title", &self.title)?,
            company: required("company", &self.company)?,
            location: required("location", &self.location)?,
            description: required("description", &self.description)?,
            kind: one_of(&self.kind, EMPLOYMENT_KINDS)?,
        })
    }
}
