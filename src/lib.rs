//! # board-sync
//!
//! > **Client-side state synchronization for a post board.**
//!
//! This crate keeps a local view of a remote post board consistent with its REST API. It is
//! built on [`store_framework`], which applies the **Actor Model** to client-side caches:
//! every cached collection, and the session, is owned by one Tokio task.
//!
//! ## Core Rules
//!
//! ### Confirm, then commit
//! Nothing is applied locally before the server confirms it. A created post appears at the
//! front of the list only once the server has returned it with its id.
//!
//! ### Last-known-good state
//! A failed request never clears or rolls back what is cached. The store's `error` slot gets a
//! user-facing message instead, and the caller gets a typed error.
//!
//! ### Single flight
//! Each store has at most one request in flight. Refreshes queued behind an in-flight refresh
//! reuse its result.
//!
//! ### Forced sign-out
//! A `401` on any request signs the session out exactly once.
//!
//! ## Module Tour
//!
//! ### 1. The Data ([`model`], [`validation`])
//! Wire types ([`Post`](model::Post), [`User`](model::User)) and the checks run on input
//! before anything is sent.
//!
//! ### 2. The Stores ([`post_store`], [`user_store`], [`session`])
//! - [`post_store`] plugs [`Post`](model::Post) into the generic
//!   [`ResourceStore`](store_framework::ResourceStore), with author, search and limit filters.
//! - [`user_store`] is a read-only directory of [`User`](model::User)s.
//! - [`session`] is a dedicated state machine for `Anonymous` / `Authenticated(User)`.
//!
//! ### 3. The Interface ([`clients`])
//! Domain clients ([`PostClient`](clients::PostClient), [`UserClient`](clients::UserClient),
//! [`SessionClient`](clients::SessionClient)) hide message passing and return domain errors.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! [`BoardSystem`](lifecycle::BoardSystem) wires everything around one
//! [`RemoteClient`](store_framework::RemoteClient) built from [`ClientConfig`](config::ClientConfig).
//!
//! ## Running the Demo
//!
//! ```bash
//! BOARD_API_URL=http://localhost:8080 RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod post_store;
pub mod session;
pub mod user_store;
pub mod validation;
