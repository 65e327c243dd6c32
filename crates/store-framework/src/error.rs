//! # Store Errors
//!
//! Errors a store handle can return. Remote failures keep their full classification
//! inside [`StoreError::Api`]; domain clients map this enum into their own error types.

use crate::remote::ApiError;

/// Errors that can occur when talking to a store task.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    /// Local validation failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StoreError {
    /// The remote classification, if this error came from the server side.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            StoreError::Api(e) => Some(e),
            _ => None,
        }
    }
}
