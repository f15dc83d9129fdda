//! Pastebin Lite - An ephemeral text-sharing service
//!
//! Pastes can expire after a TTL or a number of views; once either limit is
//! passed the paste is gone for good.

pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod kv;
pub mod models;
pub mod paste;
pub mod tasks;
pub mod views;

pub use api::{create_router, AppState};
pub use config::Config;
pub use kv::{KvStore, MemoryStore};
pub use paste::PasteStore;
pub use tasks::spawn_cleanup_task;
