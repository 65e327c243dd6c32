//! [`RemoteResource`] implementation for the [`Post`] domain type.
//!
//! Posts live under `/api/posts`; single items come back as `{ "post": ... }` and lists as
//! `{ "posts": [...] }` (bare values are accepted too). Content is trimmed and length-checked
//! before it is sent, and every post received is checked before the store commits it.

use crate::model::{Post, PostCreate, PostUpdate};
use crate::validation::validate_post_content;
use store_framework::RemoteResource;

impl RemoteResource for Post {
    type Id = u64;
    type Create = PostCreate;
    type Update = PostUpdate;

    const COLLECTION_PATH: &'static str = "/api/posts";
    const SINGULAR_KEY: &'static str = "post";
    const PLURAL_KEY: &'static str = "posts";

    fn id(&self) -> &u64 {
        &self.id
    }

    fn prepare_create(params: PostCreate) -> Result<PostCreate, String> {
        Ok(PostCreate {
            content: validate_post_content(&params.content)?,
        })
    }

    fn prepare_update(update: PostUpdate) -> Result<PostUpdate, String> {
        Ok(PostUpdate {
            content: validate_post_content(&update.content)?,
        })
    }

    /// # Invariants
    /// - `content` is not blank
    /// - `updated_at` is not before `created_at`
    fn verify(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err(format!("post {} has empty content", self.id));
        }
        if self.updated_at < self.created_at {
            return Err(format!("post {} was updated before it was created", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(content: &str, created: i64, updated: i64) -> Post {
        Post {
            id: 1,
            content: content.to_string(),
            author_id: Some(1),
            author: None,
            created_at: Utc.timestamp_opt(created, 0).unwrap(),
            updated_at: Utc.timestamp_opt(updated, 0).unwrap(),
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(Post::item_path(&42), "/api/posts/42");
    }

    #[test]
    fn test_prepare_trims() {
        let prepared = Post::prepare_create(PostCreate::new("  hi  ")).unwrap();
        assert_eq!(prepared.content, "hi");
        assert!(Post::prepare_update(PostUpdate::new("   ")).is_err());
        assert!(Post::prepare_create(PostCreate::new("x".repeat(1001))).is_err());
    }

    #[test]
    fn test_verify_invariants() {
        assert!(post("ok", 100, 100).verify().is_ok());
        assert!(post("ok", 100, 200).verify().is_ok());
        assert!(post("ok", 200, 100).verify().is_err());
        assert!(post("  ", 100, 100).verify().is_err());
    }
}
