//! Form input controller: holds a draft, validates it and submits it
//! through a [`ResourceList`].

use sheconnects_core::media::encode_image;
use sheconnects_core::resource::{Draft, Posts, ResourceAdapter};
use sheconnects_core::ValidationError;
use tracing::debug;

use super::ResourceList;
use crate::client::CollectionApi;
use crate::error::Result;

/// Draft state for one resource's create form.
#[derive(Debug, Clone)]
pub struct FormController<A: ResourceAdapter> {
    draft: A::Draft,
}

impl<A: ResourceAdapter> Default for FormController<A> {
    fn default() -> Self {
        Self {
            draft: A::Draft::default(),
        }
    }
}

impl<A: ResourceAdapter> FormController<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &A::Draft {
        &self.draft
    }

    /// Sets one field of the draft by its wire name.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.draft.set_field(name, value.into())?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.draft.validate()
    }

    pub fn reset(&mut self) {
        self.draft = A::Draft::default();
    }

    /// Validates and creates the item. The draft is reset on success and
    /// kept as entered on any failure.
    pub async fn submit<R>(&mut self, list: &ResourceList<A, R>) -> Result<A::Item>
    where
        R: CollectionApi<A>,
    {
        self.validate()?;
        let item = list.create(&self.draft).await?;
        debug!(resource = A::NAME, "form reset after submit");
        self.reset();
        Ok(item)
    }
}

impl FormController<Posts> {
    /// Attaches raw image bytes as an inline `data:` URL. Images over the
    /// size cap are rejected and the draft is left unchanged.
    pub fn attach_image(&mut self, bytes: &[u8], mime: &str) -> Result<()> {
        let encoded = encode_image(bytes, mime)?;
        self.update_field("image", encoded)
    }
}
