//! Type-safe wrappers around [`StoreHandle`](store_framework::StoreHandle) and the session task.

pub mod post_client;
pub mod session_client;
pub mod store_client;
pub mod user_client;

pub use post_client::*;
pub use session_client::*;
pub use store_client::*;
pub use user_client::*;
