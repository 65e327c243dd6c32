//! Error types for the Post store.

use store_framework::{ApiError, StoreError};
use thiserror::Error;

/// Errors that can occur during post operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostError {
    /// The server has no post with this id.
    #[error("Post not found: {0}")]
    NotFound(u64),

    /// The content was rejected locally; nothing was sent.
    #[error("Post validation error: {0}")]
    ValidationError(String),

    /// The server or the network failed the request.
    #[error(transparent)]
    Api(ApiError),

    /// An error occurred while communicating with the store task.
    #[error("Store communication error: {0}")]
    StoreCommunicationError(String),
}

impl PostError {
    /// Like `From<StoreError>`, but turns a 404 into [`PostError::NotFound`].
    pub fn for_post(id: u64, e: StoreError) -> Self {
        match e {
            StoreError::Api(api) if api.is_not_found() => PostError::NotFound(id),
            other => other.into(),
        }
    }
}

impl From<StoreError> for PostError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => PostError::ValidationError(msg),
            StoreError::Api(api) => PostError::Api(api),
            other => PostError::StoreCommunicationError(other.to_string()),
        }
    }
}
