//! `reqwest`-backed [`Transport`].

use super::{ApiError, ApiErrorKind, Method, Transport};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Talks JSON to a real API server.
///
/// Every request carries `Content-Type: application/json`. Session cookies set by the
/// server are kept in the client's cookie jar and sent back automatically.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(classify_transport_error)?;
        debug!(status = status.as_u16(), len = bytes.len(), "Response received");

        let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice::<Value>(&bytes))
        };

        if status.is_success() {
            return match parsed {
                None => Ok(Value::Null),
                Some(Ok(value)) => Ok(value),
                Some(Err(e)) => Err(ApiError::new(
                    ApiErrorKind::Malformed,
                    Some(status.as_u16()),
                    format!("response body is not JSON: {e}"),
                )),
            };
        }

        let body = parsed.and_then(Result::ok);
        Err(ApiError::from_status(status.as_u16(), body.as_ref()))
    }
}

fn classify_transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::timeout()
    } else {
        ApiError::network(e.to_string())
    }
}
