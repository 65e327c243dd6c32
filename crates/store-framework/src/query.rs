//! # List Queries
//!
//! A [`ListQuery`] selects which slice of a collection a store holds: an alternative list
//! endpoint (for example `/api/users/7/posts`) and query-string filters such as
//! `search` or `limit`. The default query loads the resource's whole collection.

use url::form_urlencoded;

/// The list a store was asked to load.
///
/// ```rust
/// use store_framework::ListQuery;
///
/// let query = ListQuery::new().param("search", "rust tips").param("limit", 5);
/// assert_eq!(query.target("/api/posts"), "/api/posts?search=rust+tips&limit=5");
///
/// let mine = ListQuery::new().at("/api/users/7/posts");
/// assert_eq!(mine.target("/api/posts"), "/api/users/7/posts");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    path: Option<String>,
    params: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the list from `path` instead of the collection endpoint.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Appends a query-string parameter. Parameters are sent in insertion order.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// True when this is the plain collection listing.
    pub fn is_default(&self) -> bool {
        self.path.is_none() && self.params.is_empty()
    }

    /// The request target relative to the API base, with parameters form-encoded.
    pub fn target(&self, collection_path: &str) -> String {
        let path = self.path.as_deref().unwrap_or(collection_path);
        if self.params.is_empty() {
            return path.to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        format!("{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_collection() {
        let query = ListQuery::default();
        assert!(query.is_default());
        assert_eq!(query.target("/api/posts"), "/api/posts");
    }

    #[test]
    fn test_params_are_encoded() {
        let query = ListQuery::new().param("search", "café & tea?");
        assert_eq!(
            query.target("/api/posts"),
            "/api/posts?search=caf%C3%A9+%26+tea%3F"
        );
        assert!(!query.is_default());
    }

    #[test]
    fn test_path_and_params_combine() {
        let query = ListQuery::new().at("/api/users/3/posts").param("limit", 10);
        assert_eq!(query.path(), Some("/api/users/3/posts"));
        assert_eq!(query.target("/api/posts"), "/api/users/3/posts?limit=10");
    }
}
