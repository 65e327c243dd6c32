//! Wire-level data structures shared by the stores and clients.

pub mod post;
pub mod user;

pub use post::*;
pub use user::*;
