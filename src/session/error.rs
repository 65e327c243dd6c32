//! Error types for the Session store.

use store_framework::{ApiError, StoreError};
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// The form was rejected locally; nothing was sent.
    #[error("Session validation error: {0}")]
    ValidationError(String),

    /// The server or the network failed the request.
    #[error(transparent)]
    Api(ApiError),

    /// An error occurred while communicating with the session task.
    #[error("Store communication error: {0}")]
    StoreCommunicationError(String),
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => SessionError::ValidationError(msg),
            StoreError::Api(api) => SessionError::Api(api),
            other => SessionError::StoreCommunicationError(other.to_string()),
        }
    }
}
