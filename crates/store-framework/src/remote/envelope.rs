//! Response envelope decoding.
//!
//! The API answers either with a keyed envelope (`{ "post": {...} }`, `{ "posts": [...] }`)
//! or with the bare value. Both are accepted; any other shape is [`ApiErrorKind::Malformed`].
//! Keyed lists may carry `total`, `offset` and `limit` next to the items; see [`unwrap_page`].
//!
//! [`ApiErrorKind::Malformed`]: super::ApiErrorKind::Malformed

use super::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a single item from `{ key: item }` or a bare `item`.
pub fn unwrap_one<T: DeserializeOwned>(value: Value, key: &str) -> Result<T, ApiError> {
    let inner = match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(inner)
        .map_err(|e| ApiError::malformed(format!("expected `{key}` object: {e}")))
}

/// Decodes a list from `{ key: [items] }` or a bare `[items]`.
pub fn unwrap_many<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let inner = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| ApiError::malformed(format!("missing `{key}` array")))?,
        other => {
            return Err(ApiError::malformed(format!(
                "expected `{key}` array, got {other}"
            )))
        }
    };
    serde_json::from_value(inner)
        .map_err(|e| ApiError::malformed(format!("expected `{key}` array: {e}")))
}

/// Pagination fields the server sent alongside a keyed list. Absent fields are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub total: Option<u64>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Like [`unwrap_many`], but also keeps the envelope's pagination fields.
/// A bare list has none.
pub fn unwrap_page<T: DeserializeOwned>(
    value: Value,
    key: &str,
) -> Result<(Vec<T>, PageInfo), ApiError> {
    let page = match &value {
        Value::Object(map) => PageInfo {
            total: map.get("total").and_then(Value::as_u64),
            offset: map.get("offset").and_then(Value::as_u64),
            limit: map.get("limit").and_then(Value::as_u64),
        },
        _ => PageInfo::default(),
    };
    let items = unwrap_many(value, key)?;
    Ok((items, page))
}
