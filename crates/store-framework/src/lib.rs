//! # Store Framework
//!
//! This crate provides the building blocks for keeping a client-side cache of server-owned
//! resources in sync with a REST backend. It applies the **Actor Model** to the client side:
//! each cached collection is owned by one task, and every read or write goes through that
//! task's mailbox.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Resource Layer** ([`RemoteResource`]) - how a resource is addressed, validated and decoded
//! 2. **Runtime Layer** ([`ResourceStore`]) - message processing, caching, state publication
//! 3. **Interface Layer** ([`StoreHandle`]) - type-safe communication and state observation
//! 4. **Remote Layer** ([`RemoteClient`], [`Transport`]) - HTTP calls and error classification
//!
//! You describe a resource **once** in the trait, and the framework handles message passing,
//! envelope decoding, error classification and state publication.
//!
//! ## Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use store_framework::mock::MockTransport;
//! use store_framework::{RemoteClient, RemoteResource, ResourceStore};
//!
//! // 1. Describe the resource
//! #[derive(Clone, Debug, Deserialize)]
//! struct Note { id: u32, text: String }
//!
//! #[derive(Debug, Serialize)]
//! struct NoteBody { text: String }
//!
//! impl RemoteResource for Note {
//!     type Id = u32;
//!     type Create = NoteBody;
//!     type Update = NoteBody;
//!     const COLLECTION_PATH: &'static str = "/api/notes";
//!     const SINGULAR_KEY: &'static str = "note";
//!     const PLURAL_KEY: &'static str = "notes";
//!     fn id(&self) -> &u32 { &self.id }
//! }
//!
//! // 2. Use the store
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_post("/api/notes").return_ok(json!({ "note": { "id": 7, "text": "hello" } }));
//!
//!     let (store, notes) = ResourceStore::<Note>::new(10, RemoteClient::new(mock.clone()));
//!     tokio::spawn(store.run());
//!
//!     let note = notes.create(NoteBody { text: "hello".into() }).await.unwrap();
//!     assert_eq!(note.id, 7);
//!     assert_eq!(notes.snapshot().items[0].text, "hello");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task
//! - Requests are processed **sequentially**, so at most one network call per store is in flight
//! - Refreshes queued behind an in-flight refresh share its result
//! - A refresh can carry a [`ListQuery`]; the store remembers it and later plain refreshes reuse it
//! - State is published through a `watch` channel; readers never block the store
//!
//! ## Testing
//!
//! [`mock::MockTransport`] scripts server responses for a real store task, and
//! [`mock::create_mock_handle`] lets a test play the store itself. See the [`mock`] module.

pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod query;
pub mod remote;
pub mod resource;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use error::StoreError;
pub use handle::StoreHandle;
pub use message::{Response, StoreRequest};
pub use query::ListQuery;
pub use remote::envelope::PageInfo;
pub use remote::{ApiError, ApiErrorKind, HttpTransport, Method, RemoteClient, Transport};
pub use resource::{ReadOnly, RemoteResource};
pub use store::{ResourceStore, StoreSnapshot};
