//! Lifecycle management: building, wiring and shutting down the stores.

pub mod board_system;

pub use board_system::*;
