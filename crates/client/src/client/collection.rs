//! Collection API operations, generic over the resource adapter.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::{json, Value};
use sheconnects_core::resource::{Draft, Events, ResourceAdapter};
use sheconnects_core::session::Session;
use sheconnects_core::ItemId;

use super::ApiClient;
use crate::error::{Result, SyncError};

/// Create payload of an adapter.
pub type Payload<A> = <<A as ResourceAdapter>::Draft as Draft>::Payload;

/// Remote operations on one collection.
#[async_trait]
pub trait CollectionApi<A: ResourceAdapter>: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<A::Item>>;

    /// Create an item. The returned item carries the server-assigned id.
    async fn create(&self, session: &Session, payload: &Payload<A>) -> Result<A::Item>;

    /// Delete an item. Always sent with a bearer token.
    async fn remove(&self, session: &Session, id: &ItemId) -> Result<()>;
}

/// Event registration.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn register(&self, id: &ItemId, subject: &str) -> Result<()>;
}

/// [`CollectionApi`] over HTTP.
pub struct RemoteCollection<A> {
    api: ApiClient,
    _adapter: PhantomData<fn() -> A>,
}

impl<A: ResourceAdapter> RemoteCollection<A> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _adapter: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl<A> Clone for RemoteCollection<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _adapter: PhantomData,
        }
    }
}

impl<A> fmt::Debug for RemoteCollection<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCollection")
            .field("base_url", &self.api.base_url())
            .finish()
    }
}

/// Decodes a create response, unwrapping the adapter's envelope key when the
/// body has one.
pub fn decode_created<A: ResourceAdapter>(body: Value) -> Result<A::Item> {
    let value = match A::CREATED_ENVELOPE {
        Some(key) if body.get(key).is_some_and(Value::is_object) => body[key].clone(),
        _ => body,
    };
    serde_json::from_value(value).map_err(|e| SyncError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl<A: ResourceAdapter> CollectionApi<A> for RemoteCollection<A> {
    async fn list(&self) -> Result<Vec<A::Item>> {
        let response = self.api.http().get(self.api.url(A::BASE_PATH)).send().await?;
        self.api.handle_response(response).await
    }

    async fn create(&self, session: &Session, payload: &Payload<A>) -> Result<A::Item> {
        let mut builder = self.api.http().post(self.api.url(A::BASE_PATH)).json(payload);
        if A::REQUIRES_AUTH {
            builder = self.api.authorize(builder, session)?;
        }
        let body: Value = self.api.handle_response(builder.send().await?).await?;
        decode_created::<A>(body)
    }

    async fn remove(&self, session: &Session, id: &ItemId) -> Result<()> {
        let builder = self.api.http().delete(self.api.url(&A::item_path(id)));
        let builder = self.api.authorize(builder, session)?;
        self.api.handle_empty_response(builder.send().await?).await
    }
}

#[async_trait]
impl RegistrationApi for RemoteCollection<Events> {
    async fn register(&self, id: &ItemId, subject: &str) -> Result<()> {
        let response = self
            .api
            .http()
            .post(self.api.url(&Events::register_path(id)))
            .json(&json!({ "userId": subject }))
            .send()
            .await?;
        self.api.handle_empty_response(response).await
    }
}
