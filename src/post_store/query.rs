//! Filters for the post list.

use store_framework::ListQuery;

/// Endpoint listing the posts written by one user.
pub fn user_posts_path(user_id: u64) -> String {
    format!("/api/users/{user_id}/posts")
}

/// Which posts to load. The default is the whole board, newest first.
///
/// ```rust
/// use board_sync::post_store::PostQuery;
/// use store_framework::ListQuery;
///
/// let query: ListQuery = PostQuery::new().search("  rust ").limit(5).into();
/// assert_eq!(query.target("/api/posts"), "/api/posts?search=rust&limit=5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub author_id: Option<u64>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only posts by `user_id`, loaded from that user's post list.
    pub fn by_author(mut self, user_id: u64) -> Self {
        self.author_id = Some(user_id);
        self
    }

    /// Server-side content search. Blank text means no search.
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    /// At most `count` posts. Zero means no limit.
    pub fn limit(mut self, count: u32) -> Self {
        self.limit = (count > 0).then_some(count);
        self
    }
}

impl From<PostQuery> for ListQuery {
    fn from(query: PostQuery) -> Self {
        let mut list = ListQuery::new();
        if let Some(user_id) = query.author_id {
            list = list.at(user_posts_path(user_id));
        }
        if let Some(search) = query.search {
            list = list.param("search", search);
        }
        if let Some(limit) = query.limit {
            list = list.param("limit", limit);
        }
        list
    }
}
