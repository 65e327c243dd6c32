//! # Mock Framework & Testing Guide
//!
//! Test doubles for the two seams of the framework:
//!
//! | Seam | Double | Use Case |
//! |------|--------|----------|
//! | [`Transport`] | [`MockTransport`] | Run a real store task against scripted server responses |
//! | [`StoreHandle`] | [`create_mock_handle`] + `expect_*` | Test client wrappers without a store task |
//!
//! ## Pattern 1: Real Store, Scripted Server
//!
//! Queue the responses the "server" gives, in order, then drive the store through its handle.
//! Every call the store makes is recorded, so "no network call happened" is a plain assertion.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use store_framework::mock::MockTransport;
//! use store_framework::{ApiErrorKind, RemoteClient, RemoteResource, ResourceStore, StoreError};
//!
//! #[derive(Clone, Debug, Deserialize)] struct Note { id: u32, text: String }
//! #[derive(Debug, Serialize)] struct NoteBody { text: String }
//!
//! impl RemoteResource for Note {
//!     type Id = u32; type Create = NoteBody; type Update = NoteBody;
//!     const COLLECTION_PATH: &'static str = "/api/notes";
//!     const SINGULAR_KEY: &'static str = "note";
//!     const PLURAL_KEY: &'static str = "notes";
//!     fn id(&self) -> &u32 { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_post("/api/notes").return_status(500, json!({}));
//!
//!     let (store, notes) = ResourceStore::<Note>::new(8, RemoteClient::new(mock.clone()));
//!     tokio::spawn(store.run());
//!
//!     let err = notes.create(NoteBody { text: "hi".into() }).await.unwrap_err();
//!     assert!(matches!(err, StoreError::Api(ref e) if e.kind == ApiErrorKind::ServerError));
//!     assert!(notes.snapshot().items.is_empty());
//!     assert_eq!(mock.call_count(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 2: Client Wrapper, No Store
//!
//! [`create_mock_handle`] returns a handle plus the receiving end of its request channel.
//! The test plays the store: it pulls the request, asserts on it and answers.
//!
//! ```rust,ignore
//! let (handle, mut requests) = create_mock_handle::<Note>(8);
//! let task = tokio::spawn(async move { handle.delete(3).await });
//! let (id, responder) = expect_delete(&mut requests).await.expect("Expected Delete request");
//! assert_eq!(id, 3);
//! responder.send(Ok(())).unwrap();
//! ```

use crate::handle::StoreHandle;
use crate::message::{Response, StoreRequest};
use crate::query::ListQuery;
use crate::remote::{ApiError, Method, Transport};
use crate::resource::RemoteResource;
use crate::store::StoreSnapshot;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

// =============================================================================
// SCRIPTED TRANSPORT
// =============================================================================

struct Expectation {
    method: Method,
    path: String,
    delay: Option<Duration>,
    response: Result<Value, ApiError>,
}

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<RecordedCall>,
    unexpected: Vec<String>,
}

/// A [`Transport`] that answers from an ordered queue of expectations.
///
/// Clones share the same queue, so keep one clone in the test and hand another to
/// [`RemoteClient::new`](crate::RemoteClient::new).
///
/// A request that does not match the head of the queue is answered with a
/// `NetworkFailure` and remembered; [`verify`](Self::verify) then fails the test.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with the given method and path.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            delay: None,
            state: self.state.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let (delay, response) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });

            let matches = state
                .expectations
                .front()
                .is_some_and(|e| e.method == method && e.path == path);
            let next = if matches {
                state.expectations.pop_front()
            } else {
                None
            };

            match next {
                Some(expectation) => (expectation.delay, expectation.response),
                None => {
                    let message = format!("unexpected request {method} {path}");
                    state.unexpected.push(message.clone());
                    (None, Err(ApiError::network(message)))
                }
            }
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

/// Builder for one scripted response.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    delay: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Holds the response back for `delay`, simulating a slow server.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answers with a successful body.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Answers with an HTTP status, classified the same way the HTTP transport does.
    pub fn return_status(self, status: u16, body: Value) {
        if (200..300).contains(&status) {
            self.push(Ok(body));
        } else {
            self.push(Err(ApiError::from_status(status, Some(&body))));
        }
    }

    /// Answers with a transport-level error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ApiError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            delay: self.delay,
            response,
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a store handle and the receiver of its request channel.
///
/// # Testing Strategy
/// Client wrappers (e.g. a domain `PostClient`) only translate arguments and errors. Testing
/// them does not need a store task: the test receives the request itself, asserts on it and
/// answers through the enclosed responder.
pub fn create_mock_handle<T: RemoteResource>(
    buffer_size: usize,
) -> (StoreHandle<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, state) = watch::channel(StoreSnapshot::default());
    (StoreHandle::new(sender, state), receiver)
}

/// Helper to verify that the next message is a plain Refresh request
pub async fn expect_refresh<T: RemoteResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(StoreRequest::Refresh {
            query: None,
            respond_to,
        }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Refresh carrying a query
pub async fn expect_list<T: RemoteResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(ListQuery, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Refresh {
            query: Some(query),
            respond_to,
        }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Fetch request
pub async fn expect_fetch<T: RemoteResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Fetch { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: RemoteResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: RemoteResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: RemoteResource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
