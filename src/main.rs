use board_sync::clients::StoreClient;
use board_sync::config::ClientConfig;
use board_sync::lifecycle::BoardSystem;
use store_framework::tracing::setup_tracing;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    info!(base_url = %config.base_url, timeout = ?config.timeout, "Starting board client");

    let system = BoardSystem::connect(&config).map_err(|e| e.to_string())?;

    if !system.health().await {
        warn!("API health check failed");
    }

    let span = tracing::info_span!("identity");
    async {
        match system.session.check_identity().await {
            Ok(Some(user)) => info!(username = %user.username, "Signed in"),
            Ok(None) => info!("Not signed in"),
            Err(e) => warn!(error = %e, "Identity check failed"),
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("posts");
    async {
        match system.posts.refresh().await {
            Ok(posts) => {
                info!(count = posts.len(), total = ?system.posts.page().total, "Posts loaded");
                for post in posts.iter().take(5) {
                    info!(id = post.id, author = %post.author_label(), content = %post.content, "Post");
                }
            }
            Err(e) => {
                let shown = system.posts.snapshot().error.unwrap_or_default();
                warn!(error = %e, shown = %shown, "Could not load posts");
            }
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await
}
