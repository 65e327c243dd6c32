//! The user directory: a read-only [`ResourceStore`] of registered users.
//!
//! Users are created through registration, never through this store, so its payload types
//! are [`ReadOnly`](store_framework::ReadOnly).

pub mod entity;

use crate::clients::UserClient;
use crate::model::User;
use store_framework::{RemoteClient, ResourceStore};

/// Creates a new user directory store and its client.
pub fn new(buffer_size: usize, remote: RemoteClient) -> (ResourceStore<User>, UserClient) {
    let (store, handle) = ResourceStore::new(buffer_size, remote);
    (store, UserClient::new(handle))
}
