use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum post length, counted in characters after trimming.
pub const MAX_CONTENT_CHARS: usize = 1000;

/// A post on the board, as owned by the server.
///
/// # Store
/// This struct implements [`RemoteResource`](store_framework::RemoteResource), so a
/// [`ResourceStore`](store_framework::ResourceStore) can cache it.
/// See [`crate::post_store`] for the envelope keys and validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub content: String,
    /// Older servers send this as `user_id`.
    #[serde(default, alias = "user_id")]
    pub author_id: Option<u64>,
    /// Username of the author, when the server joins it in.
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Name to show for the post's author.
    pub fn author_label(&self) -> String {
        match (&self.author, self.author_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("User {id}"),
            (None, None) => "Anonymous".to_string(),
        }
    }

    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.author_id == Some(user_id)
    }

    pub fn was_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Payload for creating a new post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCreate {
    pub content: String,
}

impl PostCreate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Payload for replacing a post's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostUpdate {
    pub content: String,
}

impl PostUpdate {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
