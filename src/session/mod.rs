//! Session state machine: who, if anyone, is signed in.
//!
//! The [`SessionStore`] task owns a [`SessionState`] and processes login, registration,
//! logout and identity checks one at a time. It also listens to the
//! [`RemoteClient`](store_framework::RemoteClient)'s unauthorized broadcast, so a `401` on
//! any request (posts included) signs the user out.

pub mod actor;
pub mod error;
pub mod message;
pub mod state;

pub use actor::SessionStore;
pub use error::*;
pub use message::SessionRequest;
pub use state::*;

use crate::clients::SessionClient;
use store_framework::RemoteClient;

/// Auth endpoints.
pub const ME_PATH: &str = "/api/auth/me";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Creates a new Session store and its client.
pub fn new(buffer_size: usize, remote: RemoteClient) -> (SessionStore, SessionClient) {
    SessionStore::new(buffer_size, remote)
}
