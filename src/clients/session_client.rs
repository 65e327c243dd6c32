use crate::model::{LoginRequest, RegisterRequest, User};
use crate::session::{SessionError, SessionRequest, SessionSnapshot};
use store_framework::StoreError;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the Session store.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
    state: watch::Receiver<SessionSnapshot>,
}

impl SessionClient {
    pub fn new(
        sender: mpsc::Sender<SessionRequest>,
        state: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self { sender, state }
    }

    /// The latest published state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().state.user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().state.is_authenticated()
    }

    /// Asks the server who is signed in. Failures resolve to `None`.
    #[instrument(skip(self))]
    pub async fn check_identity(&self) -> Result<Option<User>, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::CheckIdentity { respond_to })
            .await?;
        response
            .await
            .map_err(|_| StoreError::StoreDropped)?
            .map_err(SessionError::from)
    }

    #[instrument(skip(self))]
    pub async fn login(&self, credentials: LoginRequest) -> Result<User, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::Login {
            credentials,
            respond_to,
        })
        .await?;
        response
            .await
            .map_err(|_| StoreError::StoreDropped)?
            .map_err(SessionError::from)
    }

    #[instrument(skip(self))]
    pub async fn register(&self, registration: RegisterRequest) -> Result<User, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::Register {
            registration,
            respond_to,
        })
        .await?;
        response
            .await
            .map_err(|_| StoreError::StoreDropped)?
            .map_err(SessionError::from)
    }

    /// Signs out. The session ends `Anonymous` even if this returns an error.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::Logout { respond_to }).await?;
        response
            .await
            .map_err(|_| StoreError::StoreDropped)?
            .map_err(SessionError::from)
    }

    /// The state once every request and signal queued before this call has been handled.
    pub async fn current(&self) -> Result<SessionSnapshot, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::Snapshot { respond_to }).await?;
        Ok(response.await.map_err(|_| StoreError::StoreDropped)?)
    }

    async fn send(&self, request: SessionRequest) -> Result<(), StoreError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| StoreError::StoreClosed)
    }
}
