//! # RemoteResource Trait
//!
//! The contract a list-shaped remote resource (posts, comments, ...) implements to be cached
//! by the generic [`ResourceStore`](crate::ResourceStore).
//!
//! The trait carries everything the store needs to know about the wire: where the collection
//! lives, which envelope keys the server uses, how items are identified, and how payloads are
//! normalized and validated before anything goes over the network.
//!
//! # Provided Methods (Hooks)
//! - [`RemoteResource::item_path`]
//! - [`RemoteResource::prepare_create`]
//! - [`RemoteResource::prepare_update`]
//! - [`RemoteResource::verify`]
//!
//! The defaults accept everything unchanged.
//!
//! Resources that are only ever listed use [`ReadOnly`] as their payload types.

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::fmt::{Debug, Display};

/// Trait that any remote resource must implement to be cached by a `ResourceStore`.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use store_framework::RemoteResource;
///
/// #[derive(Clone, Debug, Deserialize)]
/// struct Comment { id: u32, body: String }
///
/// #[derive(Debug, Serialize)]
/// struct CommentBody { body: String }
///
/// impl RemoteResource for Comment {
///     type Id = u32;
///     type Create = CommentBody;
///     type Update = CommentBody;
///
///     const COLLECTION_PATH: &'static str = "/api/comments";
///     const SINGULAR_KEY: &'static str = "comment";
///     const PLURAL_KEY: &'static str = "comments";
///
///     fn id(&self) -> &u32 { &self.id }
///
///     fn prepare_create(params: CommentBody) -> Result<CommentBody, String> {
///         if params.body.trim().is_empty() {
///             return Err("Comment is required".into());
///         }
///         Ok(params)
///     }
/// }
///
/// assert_eq!(Comment::item_path(&7), "/api/comments/7");
/// ```
pub trait RemoteResource: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// The server-assigned identifier.
    type Id: PartialEq + Clone + Send + Sync + Display + Debug;

    /// Request body for creation.
    type Create: Serialize + Send + Sync + Debug;

    /// Request body for update.
    type Update: Serialize + Send + Sync + Debug;

    /// Collection endpoint, e.g. `/api/posts`.
    const COLLECTION_PATH: &'static str;

    /// Envelope key for a single item, e.g. `post`.
    const SINGULAR_KEY: &'static str;

    /// Envelope key for a list, e.g. `posts`.
    const PLURAL_KEY: &'static str;

    fn id(&self) -> &Self::Id;

    /// Item endpoint. Defaults to `{COLLECTION_PATH}/{id}`.
    fn item_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION_PATH, id)
    }

    /// Normalizes and validates a create payload. An `Err` is a local validation failure:
    /// the store answers immediately and makes no network call.
    fn prepare_create(params: Self::Create) -> Result<Self::Create, String> {
        Ok(params)
    }

    /// Same as [`prepare_create`](Self::prepare_create), for updates.
    fn prepare_update(update: Self::Update) -> Result<Self::Update, String> {
        Ok(update)
    }

    /// Checks an item received from the server. An `Err` makes the response `Malformed`.
    fn verify(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Payload type of a resource that is never created or updated through its store.
///
/// It has no values, so `create` and `update` on the matching handle can never be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOnly {}

impl Serialize for ReadOnly {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}
