//! # Store Handle
//!
//! This module defines the generic handle for communicating with a store task.

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::query::ListQuery;
use crate::resource::RemoteResource;
use crate::store::StoreSnapshot;
use tokio::sync::{mpsc, oneshot, watch};

/// ## StoreHandle
///
/// The `StoreHandle<T>` provides a type-safe, async API for a `ResourceStore<T>`. It forwards
/// requests over a Tokio mpsc channel and receives results via oneshot channels. State is
/// read through a `watch` channel, so rendering code never blocks the store.
///
/// * **Cloneable** - holds only a sender and a watch receiver.
/// * **Read-only state** - [`snapshot`](Self::snapshot) and [`subscribe`](Self::subscribe)
///   hand out copies; only the store task mutates.
#[derive(Clone)]
pub struct StoreHandle<T: RemoteResource> {
    sender: mpsc::Sender<StoreRequest<T>>,
    state: watch::Receiver<StoreSnapshot<T>>,
}

impl<T: RemoteResource> StoreHandle<T> {
    pub fn new(
        sender: mpsc::Sender<StoreRequest<T>>,
        state: watch::Receiver<StoreSnapshot<T>>,
    ) -> Self {
        Self { sender, state }
    }

    /// The latest published state.
    pub fn snapshot(&self) -> StoreSnapshot<T> {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot<T>> {
        self.state.clone()
    }

    /// Reloads the list with the store's current query.
    pub async fn refresh(&self) -> Result<Vec<T>, StoreError> {
        self.send_refresh(None).await
    }

    /// Loads the list selected by `query`. On success it becomes the store's current query.
    pub async fn list(&self, query: ListQuery) -> Result<Vec<T>, StoreError> {
        self.send_refresh(Some(query)).await
    }

    async fn send_refresh(&self, query: Option<ListQuery>) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Refresh { query, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn fetch(&self, id: T::Id) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Fetch { id, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}
