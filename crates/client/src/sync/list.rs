//! Observable list of one resource type.
//!
//! A `ResourceList` owns the cached collection, the filter predicate, the
//! derived visible sequence and the per-operation lifecycle. Every mutation
//! recomputes the visible sequence before the lock is released, so readers
//! never observe a cache and a view that disagree.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use sheconnects_core::cache::{CollectionCache, PendingToken};
use sheconnects_core::filter::{CategoryFilter, Predicate};
use sheconnects_core::lifecycle::{LifecycleTracker, OperationKey, RequestState};
use sheconnects_core::resource::{Draft, Events, ResourceAdapter, ResourceItem};
use sheconnects_core::session::Session;
use sheconnects_core::{ItemId, ValidationError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::LoadHandle;
use crate::client::{CollectionApi, RegistrationApi, RemoteCollection};
use crate::error::{Result, SyncError};

struct ListState<T: ResourceItem> {
    cache: CollectionCache<T>,
    predicate: Predicate,
    visible: Vec<T>,
    tracker: LifecycleTracker,
    registered: HashSet<ItemId>,
}

impl<T: ResourceItem> ListState<T> {
    fn refresh_visible(&mut self) {
        self.visible = self.predicate.apply(self.cache.items());
    }
}

/// Cached, filtered list of one resource type kept in sync with the backend.
pub struct ResourceList<A: ResourceAdapter, R = RemoteCollection<A>> {
    remote: R,
    session: Session,
    state: Mutex<ListState<A::Item>>,
    torn_down: AtomicBool,
}

impl<A, R> ResourceList<A, R>
where
    A: ResourceAdapter,
    R: CollectionApi<A>,
{
    pub fn new(remote: R, session: Session) -> Self {
        Self {
            remote,
            session,
            state: Mutex::new(ListState {
                cache: CollectionCache::new(A::INSERT_POSITION),
                predicate: Predicate::default(),
                visible: Vec::new(),
                tracker: LifecycleTracker::new(),
                registered: HashSet::new(),
            }),
            torn_down: AtomicBool::new(false),
        }
    }

    fn with_state<O>(&self, f: impl FnOnce(&mut ListState<A::Item>) -> O) -> O {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Full cached collection, including optimistic placeholders.
    pub fn items(&self) -> Vec<A::Item> {
        self.with_state(|s| s.cache.items().to_vec())
    }

    /// Items passing the current predicate, in cache order.
    pub fn visible(&self) -> Vec<A::Item> {
        self.with_state(|s| s.visible.clone())
    }

    pub fn get(&self, id: &ItemId) -> Option<A::Item> {
        self.with_state(|s| s.cache.get(id).cloned())
    }

    pub fn predicate(&self) -> Predicate {
        self.with_state(|s| s.predicate.clone())
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.with_state(|s| {
            s.predicate.search_term = term;
            s.refresh_visible();
        });
    }

    /// Restricts the view to one category. Categories the resource does not
    /// define are rejected and the predicate is left unchanged.
    pub fn set_category(&self, category: CategoryFilter) -> Result<()> {
        if let CategoryFilter::Only(value) = &category {
            if !A::CATEGORIES.contains(&value.as_str()) {
                return Err(ValidationError::UnsupportedCategory {
                    value: value.clone(),
                    expected: A::CATEGORIES.join(", "),
                }
                .into());
            }
        }
        self.with_state(|s| {
            s.predicate.category = category;
            s.refresh_visible();
        });
        Ok(())
    }

    pub fn request_state(&self, key: &OperationKey) -> RequestState {
        self.with_state(|s| s.tracker.state(key))
    }

    pub fn is_loading(&self, key: &OperationKey) -> bool {
        self.with_state(|s| s.tracker.is_loading(key))
    }

    /// Undismissed errors, for notices.
    pub fn errors(&self) -> Vec<(OperationKey, String)> {
        self.with_state(|s| s.tracker.errors())
    }

    pub fn dismiss(&self, key: &OperationKey) -> bool {
        self.with_state(|s| s.tracker.dismiss(key))
    }

    /// Marks the list as gone. Operations resolving afterwards are discarded.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
        debug!(resource = A::NAME, "torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Fetches the collection and replaces the cache with it.
    pub async fn load(&self) -> Result<usize> {
        self.load_until(std::future::pending()).await
    }

    async fn load_until<C>(&self, cancelled: C) -> Result<usize>
    where
        C: Future<Output = ()> + Send,
    {
        let key = OperationKey::List;
        self.with_state(|s| s.tracker.begin(key.clone()))?;
        debug!(resource = A::NAME, "loading");

        let result = tokio::select! {
            biased;
            _ = cancelled => {
                self.with_state(|s| s.tracker.abandon(&key));
                debug!(resource = A::NAME, "load cancelled");
                return Err(SyncError::Cancelled);
            }
            result = self.remote.list() => result,
        };

        if self.is_torn_down() {
            self.with_state(|s| s.tracker.abandon(&key));
            return Err(SyncError::Cancelled);
        }

        match result {
            Ok(items) => {
                let count = self.with_state(|s| {
                    s.cache.replace_all(items);
                    s.refresh_visible();
                    s.tracker.succeed(&key);
                    s.cache.len()
                });
                info!(resource = A::NAME, count, "loaded");
                Ok(count)
            }
            Err(error) => {
                self.with_state(|s| s.tracker.fail(&key, error.to_string()));
                warn!(resource = A::NAME, %error, "load failed");
                Err(error)
            }
        }
    }

    /// Validates the draft, shows a placeholder immediately and reconciles it
    /// with the server's answer.
    pub async fn create(&self, draft: &A::Draft) -> Result<A::Item> {
        let payload = draft.to_payload()?;
        if A::REQUIRES_AUTH && self.session.token()?.is_none() {
            return Err(SyncError::Unauthenticated);
        }

        let key = OperationKey::Create;
        let token = self.with_state(|s| -> Result<PendingToken> {
            s.tracker.begin(key.clone())?;
            let provisional = A::provisional_item(ItemId::provisional(), &payload);
            match s.cache.insert_optimistic(provisional) {
                Ok(token) => {
                    s.refresh_visible();
                    Ok(token)
                }
                Err(error) => {
                    s.tracker.abandon(&key);
                    Err(error.into())
                }
            }
        })?;

        let result = self.remote.create(&self.session, &payload).await;

        if self.is_torn_down() {
            self.with_state(|s| {
                rollback_insert(s, token);
                s.tracker.abandon(&key);
            });
            return Err(SyncError::Cancelled);
        }

        match result {
            Ok(item) => {
                let committed = self.with_state(|s| {
                    let committed = s.cache.commit_insert(token, item.clone());
                    s.refresh_visible();
                    match &committed {
                        Ok(()) => s.tracker.succeed(&key),
                        Err(error) => s.tracker.fail(&key, error.to_string()),
                    };
                    committed
                });
                committed?;
                info!(resource = A::NAME, id = %item.id(), "created");
                Ok(item)
            }
            Err(error) => {
                self.with_state(|s| {
                    rollback_insert(s, token);
                    s.tracker.fail(&key, error.to_string());
                });
                warn!(resource = A::NAME, %error, "create failed");
                Err(error)
            }
        }
    }

    /// Hides the item immediately and deletes it remotely, restoring it if
    /// the server refuses.
    pub async fn remove(&self, id: &ItemId) -> Result<()> {
        if id.is_provisional() {
            return Err(ValidationError::NotSaved(id.to_string()).into());
        }
        if self.session.token()?.is_none() {
            return Err(SyncError::Unauthenticated);
        }

        let key = OperationKey::Delete(id.clone());
        let token = self.with_state(|s| -> Result<Option<PendingToken>> {
            s.tracker.begin(key.clone())?;
            let token = s.cache.remove_optimistic(id);
            s.refresh_visible();
            Ok(token)
        })?;

        let result = self.remote.remove(&self.session, id).await;

        if self.is_torn_down() {
            self.with_state(|s| {
                rollback_remove(s, token);
                s.tracker.abandon(&key);
            });
            return Err(SyncError::Cancelled);
        }

        match result {
            Ok(()) => {
                self.with_state(|s| {
                    if let Some(token) = token {
                        if let Err(error) = s.cache.commit_remove(token) {
                            warn!(%error, "commit of removal failed");
                        }
                    }
                    s.tracker.succeed(&key);
                });
                info!(resource = A::NAME, %id, "deleted");
                Ok(())
            }
            Err(error) => {
                self.with_state(|s| {
                    rollback_remove(s, token);
                    s.tracker.fail(&key, error.to_string());
                });
                warn!(resource = A::NAME, %id, %error, "delete failed");
                Err(error)
            }
        }
    }
}

impl<A, R> ResourceList<A, R>
where
    A: ResourceAdapter,
    R: CollectionApi<A> + 'static,
{
    /// Starts a load on the runtime. Cancelling or dropping the returned
    /// handle discards the result.
    pub fn spawn_load(list: &Arc<Self>) -> LoadHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let list = Arc::clone(list);
        let task = tokio::spawn(async move {
            list.load_until(async move {
                let _ = cancel_rx.await;
            })
            .await
        });
        LoadHandle::new(cancel_tx, task)
    }
}

impl<R> ResourceList<Events, R>
where
    R: CollectionApi<Events> + RegistrationApi,
{
    pub fn is_registered(&self, id: &ItemId) -> bool {
        self.with_state(|s| s.registered.contains(id))
    }

    /// True when the event is cached, has seats left, is not registered yet
    /// and no registration for it is in flight.
    pub fn can_register(&self, id: &ItemId) -> bool {
        self.with_state(|s| {
            s.cache.get(id).is_some_and(|event| event.has_seats())
                && !s.registered.contains(id)
                && !s.tracker.is_loading(&OperationKey::Register(id.clone()))
        })
    }

    /// Registers `subject` for the event, then reloads to pick up the new
    /// seat count.
    pub async fn register(&self, id: &ItemId, subject: &str) -> Result<()> {
        let key = OperationKey::Register(id.clone());
        self.with_state(|s| -> Result<()> {
            if s.registered.contains(id) {
                return Err(ValidationError::AlreadyRegistered(id.to_string()).into());
            }
            s.tracker.begin(key.clone())?;
            Ok(())
        })?;

        let result = self.remote.register(id, subject).await;

        if self.is_torn_down() {
            self.with_state(|s| s.tracker.abandon(&key));
            return Err(SyncError::Cancelled);
        }

        match result {
            Ok(()) => {
                self.with_state(|s| {
                    s.registered.insert(id.clone());
                    s.tracker.succeed(&key);
                });
                info!(%id, "registered for event");
                if let Err(error) = self.load().await {
                    debug!(%error, "refresh after registration failed");
                }
                Ok(())
            }
            Err(error) => {
                self.with_state(|s| s.tracker.fail(&key, error.to_string()));
                warn!(%id, %error, "registration failed");
                Err(error)
            }
        }
    }
}

fn rollback_insert<T: ResourceItem>(state: &mut ListState<T>, token: PendingToken) {
    if let Err(error) = state.cache.rollback_insert(token) {
        warn!(%error, "rollback of insert failed");
    }
    state.refresh_visible();
}

fn rollback_remove<T: ResourceItem>(state: &mut ListState<T>, token: Option<PendingToken>) {
    if let Some(token) = token {
        if let Err(error) = state.cache.rollback_remove(token) {
            warn!(%error, "rollback of removal failed");
        }
    }
    state.refresh_visible();
}
