//! # Remote Errors
//!
//! Every failure coming back from the remote API is normalized into one [`ApiError`].
//! Stores never look at HTTP details; they only see an [`ApiErrorKind`] plus an optional
//! status code and a message.

use serde_json::Value;
use std::fmt;

/// Classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No response was received at all (connection refused, DNS, reset).
    NetworkFailure,
    /// The request did not complete within the transport timeout.
    Timeout,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 5xx.
    ServerError,
    /// Any other HTTP 4xx.
    ClientError,
    /// A response arrived but did not have the expected shape.
    Malformed,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::NetworkFailure => "network failure",
            ApiErrorKind::Timeout => "timeout",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::Forbidden => "forbidden",
            ApiErrorKind::ServerError => "server error",
            ApiErrorKind::ClientError => "client error",
            ApiErrorKind::Malformed => "malformed response",
        };
        f.write_str(name)
    }
}

/// A classified remote failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NetworkFailure, None, message)
    }

    pub fn timeout() -> Self {
        Self::new(ApiErrorKind::Timeout, None, "request timed out")
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Malformed, None, message)
    }

    /// Classifies a non-success HTTP status.
    ///
    /// The message is taken from the body's `message` field, then its `error` field,
    /// and falls back to a generic description of the status.
    pub fn from_status(status: u16, body: Option<&Value>) -> Self {
        let kind = match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            400..=499 => ApiErrorKind::ClientError,
            500..=599 => ApiErrorKind::ServerError,
            _ => ApiErrorKind::Malformed,
        };
        let message = body
            .and_then(extract_message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::new(kind, Some(status), message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// A 404 from the server, i.e. the addressed item does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::ClientError && self.status == Some(404)
    }

    /// The string a store records in its `error` slot.
    pub fn user_message(&self) -> String {
        match self.kind {
            ApiErrorKind::NetworkFailure => {
                "Network error. Please check your connection.".to_string()
            }
            ApiErrorKind::Timeout => "Request timeout. Please try again.".to_string(),
            ApiErrorKind::Unauthorized => "Authentication required. Please log in.".to_string(),
            ApiErrorKind::Forbidden => "Access denied".to_string(),
            ApiErrorKind::ServerError => "Server error. Please try again later.".to_string(),
            ApiErrorKind::ClientError => self.message.clone(),
            ApiErrorKind::Malformed => "Unexpected response from server".to_string(),
        }
    }
}

fn extract_message(body: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::from_status(401, None).kind, ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::from_status(403, None).kind, ApiErrorKind::Forbidden);
        assert_eq!(ApiError::from_status(404, None).kind, ApiErrorKind::ClientError);
        assert_eq!(ApiError::from_status(422, None).kind, ApiErrorKind::ClientError);
        assert_eq!(ApiError::from_status(500, None).kind, ApiErrorKind::ServerError);
        assert_eq!(ApiError::from_status(503, None).kind, ApiErrorKind::ServerError);
        assert_eq!(ApiError::from_status(302, None).kind, ApiErrorKind::Malformed);
    }

    #[test]
    fn test_message_extraction_prefers_message_field() {
        let body = json!({ "message": "Content too long", "error": "bad_request" });
        let err = ApiError::from_status(400, Some(&body));
        assert_eq!(err.message, "Content too long");
        assert_eq!(err.user_message(), "Content too long");

        let body = json!({ "error": "Post not found" });
        let err = ApiError::from_status(404, Some(&body));
        assert_eq!(err.message, "Post not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_message_falls_back_to_generic() {
        let err = ApiError::from_status(409, Some(&json!({ "message": "  " })));
        assert_eq!(err.message, "request failed with status 409");
        assert_eq!(err.status, Some(409));
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = ApiError::network("tcp connect error: Connection refused");
        assert_eq!(
            err.user_message(),
            "Network error. Please check your connection."
        );
        let err = ApiError::from_status(500, Some(&json!({ "message": "sql: no rows" })));
        assert_eq!(err.user_message(), "Server error. Please try again later.");
    }
}
