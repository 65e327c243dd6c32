#![allow(dead_code)]

use board_sync::lifecycle::BoardSystem;
use serde_json::{json, Value};
use store_framework::mock::MockTransport;
use store_framework::RemoteClient;

pub const CREATED: &str = "2024-03-01T10:00:00Z";
pub const EDITED: &str = "2024-03-02T10:00:00Z";

pub fn post_json(id: u64, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "user_id": 1,
        "author": "alice",
        "created_at": CREATED,
        "updated_at": CREATED
    })
}

pub fn user_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{username}@example.com"),
        "username": username,
        "created_at": CREATED,
        "updated_at": CREATED
    })
}

pub fn start(mock: &MockTransport) -> BoardSystem {
    BoardSystem::new(RemoteClient::new(mock.clone()), 16)
}
