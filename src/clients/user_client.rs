use crate::clients::store_client::StoreClient;
use crate::model::User;
use async_trait::async_trait;
use store_framework::{StoreError, StoreHandle};

/// Client for the user directory. Only listing and fetching are available.
#[derive(Clone)]
pub struct UserClient {
    inner: StoreHandle<User>,
}

impl UserClient {
    pub fn new(inner: StoreHandle<User>) -> Self {
        Self { inner }
    }

    /// Cached users in server order.
    pub fn users(&self) -> Vec<User> {
        self.inner.snapshot().items
    }
}

#[async_trait]
impl StoreClient<User> for UserClient {
    type Error = StoreError;

    fn inner(&self) -> &StoreHandle<User> {
        &self.inner
    }
}
