use async_trait::async_trait;
use store_framework::{RemoteResource, StoreError, StoreHandle, StoreSnapshot};
use tokio::sync::watch;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `refresh`, `fetch` and `delete`, plus state access.
#[async_trait]
pub trait StoreClient<T: RemoteResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<StoreError> + Send + Sync;

    /// Access the inner generic StoreHandle.
    fn inner(&self) -> &StoreHandle<T>;

    /// Map store errors for a request addressing a single item.
    fn map_item_error(_id: &T::Id, e: StoreError) -> Self::Error {
        e.into()
    }

    /// Latest published state.
    fn snapshot(&self) -> StoreSnapshot<T> {
        self.inner().snapshot()
    }

    /// Receiver notified on every state transition.
    fn subscribe(&self) -> watch::Receiver<StoreSnapshot<T>> {
        self.inner().subscribe()
    }

    /// Reload the whole collection.
    #[tracing::instrument(skip(self))]
    async fn refresh(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().refresh().await.map_err(Into::into)
    }

    /// Fetch a single entity by ID.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .fetch(id.clone())
            .await
            .map_err(|e| Self::map_item_error(&id, e))
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .delete(id.clone())
            .await
            .map_err(|e| Self::map_item_error(&id, e))
    }
}
