use crate::clients::store_client::StoreClient;
use crate::model::{Post, PostCreate, PostUpdate};
use crate::post_store::{PostError, PostQuery};
use async_trait::async_trait;
use store_framework::{PageInfo, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// Client for interacting with the Post store.
#[derive(Clone)]
pub struct PostClient {
    inner: StoreHandle<Post>,
}

impl PostClient {
    pub fn new(inner: StoreHandle<Post>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreClient<Post> for PostClient {
    type Error = PostError;

    fn inner(&self) -> &StoreHandle<Post> {
        &self.inner
    }

    fn map_item_error(id: &u64, e: StoreError) -> PostError {
        PostError::for_post(*id, e)
    }
}

impl PostClient {
    #[instrument(skip(self))]
    pub async fn create_post(&self, content: &str) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner
            .create(PostCreate::new(content))
            .await
            .map_err(PostError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_post(&self, id: u64, content: &str) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner
            .update(id, PostUpdate::new(content))
            .await
            .map_err(|e| PostError::for_post(id, e))
    }

    /// Loads the posts selected by `query`. Later plain refreshes keep the same filter.
    #[instrument(skip(self))]
    pub async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>, PostError> {
        debug!("Sending request");
        self.inner.list(query.into()).await.map_err(PostError::from)
    }

    /// Posts written by `user_id`.
    pub async fn posts_by(&self, user_id: u64) -> Result<Vec<Post>, PostError> {
        self.list_posts(PostQuery::new().by_author(user_id)).await
    }

    /// Posts whose content matches `text`. Blank text loads the whole board.
    pub async fn search_posts(&self, text: &str) -> Result<Vec<Post>, PostError> {
        self.list_posts(PostQuery::new().search(text)).await
    }

    /// Cached posts, newest first.
    pub fn posts(&self) -> Vec<Post> {
        self.inner.snapshot().items
    }

    /// Pagination reported with the last successful list.
    pub fn page(&self) -> PageInfo {
        self.inner.snapshot().page
    }
}
