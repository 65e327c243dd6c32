//! # Store Messages
//!
//! Request types exchanged between a [`StoreHandle`](crate::StoreHandle) and its
//! [`ResourceStore`](crate::ResourceStore).

use crate::error::StoreError;
use crate::query::ListQuery;
use crate::resource::RemoteResource;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store tasks.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the store task.
///
/// The variants mirror the remote CRUD surface. Because the task handles them one at a
/// time, at most one network operation per store is ever outstanding.
#[derive(Debug)]
pub enum StoreRequest<T: RemoteResource> {
    /// Reloads the list. `None` reuses the store's current query.
    Refresh {
        query: Option<ListQuery>,
        respond_to: Response<Vec<T>>,
    },
    Fetch {
        id: T::Id,
        respond_to: Response<T>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
