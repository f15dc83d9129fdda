//! Key-Value Store Module
//!
//! The persistence seam. Paste records live in a hash-per-key store that
//! offers whole-record writes with an optional TTL, atomic field increments
//! and a liveness ping. `MemoryStore` is the in-process implementation.

mod entry;
mod memory;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use entry::{current_timestamp_ms, KvEntry};
pub use memory::MemoryStore;

/// Field map of a single hash record.
pub type Fields = HashMap<String, String>;

// == Store Error ==
/// Failures talking to the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not be reached or refused the command
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Round trip exceeded the configured timeout
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Increment applied to a field that does not hold an integer
    #[error("field '{field}' of '{key}' is not an integer")]
    NotAnInteger { key: String, field: String },
}

// == Store Trait ==
/// Operations the paste lifecycle needs from its backing store.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Writes the whole record in one step, replacing any previous value.
    ///
    /// When `ttl` is given the key expires after that duration. Fields and
    /// TTL become visible together.
    async fn set_hash(&self, key: &str, fields: Fields, ttl: Option<Duration>)
        -> Result<(), StoreError>;

    /// Returns all fields of the record, or `None` if the key is absent.
    async fn get_hash(&self, key: &str) -> Result<Option<Fields>, StoreError>;

    /// Atomically adds `delta` to an integer field of an existing record and
    /// returns the new value.
    ///
    /// A missing field starts from zero. A missing or expired key yields
    /// `None` and is not created.
    async fn incr_field(
        &self,
        key: &str,
        field: &str,
        delta: i64,
    ) -> Result<Option<i64>, StoreError>;

    /// Returns true if the key currently exists.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Removes the key. Returns true if it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Lightweight round trip used for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;
}
