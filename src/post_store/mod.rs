//! Post-specific store wiring: the [`RemoteResource`](store_framework::RemoteResource)
//! implementation for [`Post`], the list filters, and the errors its client returns.

pub mod entity;
pub mod error;
pub mod query;

pub use error::*;
pub use query::*;

use crate::clients::PostClient;
use crate::model::Post;
use store_framework::{RemoteClient, ResourceStore};

/// Creates a new Post store and its client.
pub fn new(buffer_size: usize, remote: RemoteClient) -> (ResourceStore<Post>, PostClient) {
    let (store, handle) = ResourceStore::new(buffer_size, remote);
    let client = PostClient::new(handle);

    (store, client)
}
