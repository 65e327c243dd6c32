//! Tracing setup shared by binaries and examples.

use tracing_subscriber::EnvFilter;

/// Initializes the tracing/logging infrastructure for the application.
///
/// Installs a compact `fmt` subscriber filtered by the `RUST_LOG` environment variable:
/// - `RUST_LOG=info` - store lifecycle and committed transitions
/// - `RUST_LOG=debug` - every request, including payloads
/// - `RUST_LOG=board_sync=debug,store_framework=info` - per-crate levels
///
/// Without `RUST_LOG` only errors are shown. Calling this twice is harmless; the second
/// call leaves the first subscriber in place.
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
