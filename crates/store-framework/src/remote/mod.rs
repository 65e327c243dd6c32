//! # Remote Client
//!
//! The leaf dependency of every store: one network call per logical operation, with the
//! outcome classified into an [`ApiError`].
//!
//! ## Layers
//!
//! - [`Transport`] - the seam. [`HttpTransport`] talks to a real server,
//!   [`MockTransport`](crate::mock::MockTransport) answers from expectations in tests.
//! - [`RemoteClient`] - the cloneable handle stores hold. It forwards calls to the transport
//!   and broadcasts an [`UnauthorizedSignal`] whenever a call comes back `401`.
//!
//! ## Unauthorized Signal
//!
//! The client never touches session state itself. Anything interested in forced sign-outs
//! subscribes with [`RemoteClient::subscribe_unauthorized`] and reacts on its own task:
//!
//! ```rust
//! use store_framework::mock::MockTransport;
//! use store_framework::remote::{ApiErrorKind, RemoteClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/api/posts").return_status(401, serde_json::json!({}));
//!
//!     let remote = RemoteClient::new(mock.clone());
//!     let mut signals = remote.subscribe_unauthorized();
//!
//!     let err = remote.get("/api/posts").await.unwrap_err();
//!     assert_eq!(err.kind, ApiErrorKind::Unauthorized);
//!     assert_eq!(signals.recv().await.unwrap().path, "/api/posts");
//! }
//! ```

pub mod envelope;
pub mod error;
pub mod http;

pub use error::{ApiError, ApiErrorKind};
pub use http::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};

/// HTTP verbs used by the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Performs a single request and classifies the outcome.
///
/// A successful call yields the decoded JSON body (`Value::Null` for an empty body).
/// Every failure is already an [`ApiError`]; implementations must not panic.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn call(&self, method: Method, path: &str, body: Option<Value>)
        -> Result<Value, ApiError>;
}

/// Published on every `401` seen by a [`RemoteClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnauthorizedSignal {
    /// Path of the request that was rejected.
    pub path: String,
}

const SIGNAL_CAPACITY: usize = 16;

/// Cloneable, injectable client shared by all stores of one system.
#[derive(Clone)]
pub struct RemoteClient {
    transport: Arc<dyn Transport>,
    unauthorized: broadcast::Sender<UnauthorizedSignal>,
}

impl RemoteClient {
    pub fn new(transport: impl Transport) -> Self {
        let (unauthorized, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            transport: Arc::new(transport),
            unauthorized,
        }
    }

    /// Registers an observer for forced sign-outs.
    ///
    /// Only signals sent after this call are delivered.
    pub fn subscribe_unauthorized(&self) -> broadcast::Receiver<UnauthorizedSignal> {
        self.unauthorized.subscribe()
    }

    #[instrument(name = "remote_call", skip_all, fields(method = %method, path = %path))]
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        debug!("Sending request");
        match self.transport.call(method, path, body).await {
            Ok(value) => {
                debug!("Request ok");
                Ok(value)
            }
            Err(e) => {
                warn!(kind = %e.kind, status = ?e.status, error = %e.message, "Request failed");
                if e.is_unauthorized() {
                    // No subscribers is fine: nothing is signed in to clear.
                    let _ = self.unauthorized.send(UnauthorizedSignal {
                        path: path.to_string(),
                    });
                }
                Err(e)
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.call(Method::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.call(Method::Post, path, body).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.call(Method::Put, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.call(Method::Delete, path, None).await
    }

    /// Probes `/health`; any classified failure means unhealthy.
    pub async fn health(&self) -> bool {
        self.get("/health").await.is_ok()
    }
}
