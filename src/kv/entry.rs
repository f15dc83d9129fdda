//! Store Entry Module
//!
//! Defines a single hash record held by the in-memory store, with TTL support.

use std::time::Duration;

use crate::kv::Fields;

// == Store Entry ==
/// A hash record plus its storage-level expiry.
#[derive(Debug, Clone)]
pub struct KvEntry {
    /// Field values
    pub fields: Fields,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<i64>,
}

impl KvEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now_ms`, if a TTL is given.
    pub fn new(fields: Fields, ttl: Option<Duration>, now_ms: i64) -> Self {
        let expires_at = ttl.map(|ttl| {
            let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
            now_ms.saturating_add(ttl_ms)
        });

        Self { fields, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self, now_ms: i64) -> Option<i64> {
        self.expires_at.map(|expires| (expires - now_ms).max(0))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
