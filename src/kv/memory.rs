//! In-Memory Store Module
//!
//! Hash-per-key storage with TTL expiration, guarded by a single async lock.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::kv::{current_timestamp_ms, Fields, KvEntry, KvStore, StoreError};

// == Memory Store ==
/// In-process `KvStore`.
///
/// Every mutating command runs under one write-lock acquisition, which makes
/// record writes and field increments atomic with respect to each other.
/// Keys past their TTL are invisible to reads and are physically removed by
/// [`MemoryStore::cleanup_expired`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, KvEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all entries whose TTL has elapsed.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == TTL ==
    /// Returns the remaining TTL of a live key in milliseconds.
    ///
    /// `None` if the key is absent or has no TTL.
    pub async fn ttl_ms(&self, key: &str) -> Option<i64> {
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .and_then(|entry| entry.ttl_remaining_ms(now))
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet reaped.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn set_hash(
        &self,
        key: &str,
        fields: Fields,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        let entry = KvEntry::new(fields, ttl, current_timestamp_ms());
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get_hash(&self, key: &str) -> Result<Option<Fields>, StoreError> {
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.fields.clone()))
    }

    async fn incr_field(
        &self,
        key: &str,
        field: &str,
        delta: i64,
    ) -> Result<Option<i64>, StoreError> {
        let now = current_timestamp_ms();
        let mut entries = self.entries.write().await;

        let entry = match entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => entry,
            _ => return Ok(None),
        };

        let current = match entry.fields.get(field) {
            Some(raw) => raw.parse::<i64>().map_err(|_| StoreError::NotAnInteger {
                key: key.to_string(),
                field: field.to_string(),
            })?,
            None => 0,
        };

        let updated = current.saturating_add(delta);
        entry.fields.insert(field.to_string(), updated.to_string());
        Ok(Some(updated))
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let now = current_timestamp_ms();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now)))
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let now = current_timestamp_ms();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|entry| !entry.is_expired_at(now)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
