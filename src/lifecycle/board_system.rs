use crate::clients::{PostClient, SessionClient, UserClient};
use crate::config::ClientConfig;
use crate::{post_store, session, user_store};
use store_framework::{ApiError, HttpTransport, RemoteClient};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator for the board client.
///
/// `BoardSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store tasks
/// - **Dependency Wiring**: Every store shares one injected [`RemoteClient`], so the session
///   store hears about a `401` no matter which store's request caused it
///
/// # Example
///
/// ```ignore
/// let system = BoardSystem::connect(&ClientConfig::from_env()?)?;
///
/// system.session.check_identity().await?;
/// system.posts.refresh().await?;
/// let post = system.posts.create_post("Hello, board!").await?;
///
/// system.shutdown().await?;
/// ```
pub struct BoardSystem {
    /// Client for the Post store
    pub posts: PostClient,

    /// Client for the Session store
    pub session: SessionClient,

    /// Client for the user directory
    pub users: UserClient,

    remote: RemoteClient,

    handles: Vec<JoinHandle<()>>,
}

impl BoardSystem {
    /// Creates the stores around `remote` and spawns their tasks.
    ///
    /// # Arguments
    /// * `remote` - The client every store sends its requests through.
    /// * `buffer_size` - Mailbox capacity of each store.
    pub fn new(remote: RemoteClient, buffer_size: usize) -> Self {
        // Session first, so its unauthorized subscription exists before any post request.
        let (session_store, session) = session::new(buffer_size, remote.clone());
        let session_handle = tokio::spawn(session_store.run());

        let (post_store, posts) = post_store::new(buffer_size, remote.clone());
        let post_handle = tokio::spawn(post_store.run());

        let (user_store, users) = user_store::new(buffer_size, remote.clone());
        let user_handle = tokio::spawn(user_store.run());

        Self {
            posts,
            session,
            users,
            remote,
            handles: vec![session_handle, post_handle, user_handle],
        }
    }

    /// Builds an [`HttpTransport`] from `config` and starts the system on it.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config.base_url, config.timeout)?;
        info!(base_url = %transport.base_url(), "Connecting");
        Ok(Self::new(RemoteClient::new(transport), config.buffer_size))
    }

    /// Whether the API answers its health probe.
    pub async fn health(&self) -> bool {
        self.remote.health().await
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the store mailboxes; each task finishes the request it is
    /// working on and exits. Clones of the clients held elsewhere keep their store alive.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all stores shut down cleanly
    /// - `Err(String)` if any store task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.posts);
        drop(self.session);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
