//! # Generic Resource Store
//!
//! This module defines the `ResourceStore`, the task that owns the client-side cache of a
//! remote collection. It implements the "Server" side of the Actor Model: requests arrive on
//! a channel and are processed sequentially, so the cached list never needs a lock.
//!
//! ## Commit Policy
//!
//! Nothing is applied locally before the server confirms it. On success the confirmed item
//! is committed; on failure the list keeps its last-known-good contents and the `error` slot
//! records a user-facing message. The error slot is cleared by the next success.
//!
//! ## Single Flight
//!
//! While one request is awaiting the server, further requests wait in the mailbox. Refresh
//! requests that queued up behind an in-flight refresh are answered with that refresh's
//! result instead of issuing another `GET`. A queued refresh with a different query waits
//! for its own turn.
//!
//! ## Queries
//!
//! The store remembers the [`ListQuery`] of its last successful refresh. A plain refresh
//! reloads that same list; a failed refresh keeps the previous query along with its items.

use crate::error::StoreError;
use crate::handle::StoreHandle;
use crate::message::{Response, StoreRequest};
use crate::query::ListQuery;
use crate::remote::envelope::{self, PageInfo};
use crate::remote::{ApiError, RemoteClient};
use crate::resource::RemoteResource;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Observable state of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot<T> {
    /// Cached items; newly created items are at the front.
    pub items: Vec<T>,
    /// True while the store's single network operation is outstanding.
    pub loading: bool,
    /// User-facing message of the last failure, cleared by the next success.
    pub error: Option<String>,
    /// The query `items` were loaded with.
    pub query: ListQuery,
    /// Pagination fields of the last successful refresh. Local mutations do not adjust them.
    pub page: PageInfo,
}

impl<T> Default for StoreSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            query: ListQuery::default(),
            page: PageInfo::default(),
        }
    }
}

/// The generic store task that caches a collection of `T`.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceStore::new()` returns the store (server) and a handle (interface).
/// 2.  **Run**: spawn `store.run()` on the runtime.
/// 3.  **Use**: call the handle; observe state through [`StoreHandle::subscribe`].
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
/// use store_framework::mock::MockTransport;
/// use store_framework::{RemoteClient, RemoteResource, ResourceStore};
///
/// #[derive(Clone, Debug, Deserialize)] struct Note { id: u32, text: String }
/// #[derive(Debug, Serialize)] struct NoteBody { text: String }
///
/// impl RemoteResource for Note {
///     type Id = u32; type Create = NoteBody; type Update = NoteBody;
///     const COLLECTION_PATH: &'static str = "/api/notes";
///     const SINGULAR_KEY: &'static str = "note";
///     const PLURAL_KEY: &'static str = "notes";
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mock = MockTransport::new();
///     mock.expect_get("/api/notes").return_ok(json!({ "notes": [{ "id": 1, "text": "hi" }] }));
///
///     let (store, notes) = ResourceStore::<Note>::new(8, RemoteClient::new(mock.clone()));
///     tokio::spawn(store.run());
///
///     notes.refresh().await.unwrap();
///     assert_eq!(notes.snapshot().items.len(), 1);
///     mock.verify();
/// }
/// ```
pub struct ResourceStore<T: RemoteResource> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    state: StoreSnapshot<T>,
    publisher: watch::Sender<StoreSnapshot<T>>,
    remote: RemoteClient,
}

impl<T: RemoteResource> ResourceStore<T> {
    /// Creates a new `ResourceStore` and its associated `StoreHandle`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request channel. If the channel is full,
    ///   calls on the handle wait until there is space.
    /// * `remote` - The client every request of this store goes through.
    pub fn new(buffer_size: usize, remote: RemoteClient) -> (Self, StoreHandle<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, state_rx) = watch::channel(StoreSnapshot::default());
        let store = Self {
            receiver,
            state: StoreSnapshot::default(),
            publisher,
            remote,
        };
        (store, StoreHandle::new(sender, state_rx))
    }

    /// Runs the store's event loop until every handle is dropped.
    pub async fn run(mut self) {
        // e.g. "Post" instead of "board_sync::model::post::Post"
        let resource = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(resource, "Store started");

        // A non-refresh request pulled off the queue while coalescing refreshes.
        let mut pending: Option<StoreRequest<T>> = None;

        loop {
            let msg = match pending.take() {
                Some(msg) => msg,
                None => match self.receiver.recv().await {
                    Some(msg) => msg,
                    None => break,
                },
            };

            match msg {
                StoreRequest::Refresh { query, respond_to } => {
                    let query = query.unwrap_or_else(|| self.state.query.clone());
                    debug!(resource, ?query, "Refresh");
                    let result = self.refresh(resource, query.clone()).await;

                    let mut waiters: Vec<Response<Vec<T>>> = vec![respond_to];
                    while let Ok(next) = self.receiver.try_recv() {
                        match next {
                            StoreRequest::Refresh {
                                query: None,
                                respond_to,
                            } => waiters.push(respond_to),
                            StoreRequest::Refresh {
                                query: Some(next_query),
                                respond_to,
                            } if next_query == query => waiters.push(respond_to),
                            other => {
                                pending = Some(other);
                                break;
                            }
                        }
                    }
                    if waiters.len() > 1 {
                        debug!(resource, coalesced = waiters.len() - 1, "Refresh coalesced");
                    }
                    for waiter in waiters {
                        let _ = waiter.send(result.clone());
                    }
                }
                StoreRequest::Fetch { id, respond_to } => {
                    debug!(resource, %id, "Fetch");
                    let result = self.fetch(resource, id).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Create { params, respond_to } => {
                    debug!(resource, ?params, "Create");
                    let result = self.create(resource, params).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(resource, %id, ?update, "Update");
                    let result = self.update(resource, id, update).await;
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(resource, %id, "Delete");
                    let result = self.delete(resource, id).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(resource, size = self.state.items.len(), "Shutdown");
    }

    async fn refresh(&mut self, resource: &str, query: ListQuery) -> Result<Vec<T>, StoreError> {
        self.begin();
        let target = query.target(T::COLLECTION_PATH);
        let outcome = match self.remote.get(&target).await {
            Ok(body) => envelope::unwrap_page::<T>(body, T::PLURAL_KEY).and_then(|(items, page)| {
                items.iter().try_for_each(verify)?;
                Ok((items, page))
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((items, page)) => {
                self.state.items = items.clone();
                self.state.query = query;
                self.state.page = page;
                self.state.error = None;
                info!(resource, %target, size = items.len(), total = ?page.total, "Refreshed");
                self.finish();
                Ok(items)
            }
            Err(e) => Err(self.fail(resource, "Refresh failed", e)),
        }
    }

    async fn fetch(&mut self, resource: &str, id: T::Id) -> Result<T, StoreError> {
        self.begin();
        let outcome = match self.remote.get(&T::item_path(&id)).await {
            Ok(body) => decode_one::<T>(body),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(item) => {
                if let Some(slot) = self.state.items.iter_mut().find(|i| i.id() == &id) {
                    *slot = item.clone();
                }
                self.state.error = None;
                info!(resource, %id, "Fetched");
                self.finish();
                Ok(item)
            }
            Err(e) => Err(self.fail(resource, "Fetch failed", e)),
        }
    }

    async fn create(&mut self, resource: &str, params: T::Create) -> Result<T, StoreError> {
        let params = T::prepare_create(params).map_err(|e| {
            warn!(resource, error = %e, "Create rejected");
            StoreError::Validation(e)
        })?;

        self.begin();
        let outcome = match encode(&params) {
            Ok(body) => match self.remote.post(T::COLLECTION_PATH, Some(body)).await {
                Ok(body) => decode_one::<T>(body),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(item) => {
                self.state.items.insert(0, item.clone());
                self.state.error = None;
                info!(resource, id = %item.id(), size = self.state.items.len(), "Created");
                self.finish();
                Ok(item)
            }
            Err(e) => Err(self.fail(resource, "Create failed", e)),
        }
    }

    async fn update(
        &mut self,
        resource: &str,
        id: T::Id,
        update: T::Update,
    ) -> Result<T, StoreError> {
        let update = T::prepare_update(update).map_err(|e| {
            warn!(resource, %id, error = %e, "Update rejected");
            StoreError::Validation(e)
        })?;

        self.begin();
        let outcome = match encode(&update) {
            Ok(body) => match self.remote.put(&T::item_path(&id), body).await {
                Ok(body) => decode_one::<T>(body),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(item) => {
                match self.state.items.iter_mut().find(|i| i.id() == &id) {
                    Some(slot) => {
                        *slot = item.clone();
                        info!(resource, %id, "Updated");
                    }
                    None => debug!(resource, %id, "Updated item not cached"),
                }
                self.state.error = None;
                self.finish();
                Ok(item)
            }
            Err(e) => Err(self.fail(resource, "Update failed", e)),
        }
    }

    async fn delete(&mut self, resource: &str, id: T::Id) -> Result<(), StoreError> {
        self.begin();
        match self.remote.delete(&T::item_path(&id)).await {
            Ok(_) => {
                self.state.items.retain(|i| i.id() != &id);
                self.state.error = None;
                info!(resource, %id, size = self.state.items.len(), "Deleted");
                self.finish();
                Ok(())
            }
            Err(e) => Err(self.fail(resource, "Delete failed", e)),
        }
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.publish();
    }

    fn finish(&mut self) {
        self.state.loading = false;
        self.publish();
    }

    /// Records the failure and publishes; the cached items are left as they were.
    fn fail(&mut self, resource: &str, what: &'static str, e: ApiError) -> StoreError {
        warn!(resource, kind = %e.kind, error = %e.message, "{}", what);
        self.state.error = Some(e.user_message());
        self.finish();
        StoreError::Api(e)
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

fn verify<T: RemoteResource>(item: &T) -> Result<(), ApiError> {
    item.verify()
        .map_err(|e| ApiError::malformed(format!("invalid {}: {e}", T::SINGULAR_KEY)))
}

fn decode_one<T: RemoteResource>(body: serde_json::Value) -> Result<T, ApiError> {
    let item = envelope::unwrap_one::<T>(body, T::SINGULAR_KEY)?;
    verify(&item)?;
    Ok(item)
}

fn encode<P: serde::Serialize>(payload: &P) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::malformed(format!("failed to encode request: {e}")))
}
