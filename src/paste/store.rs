//! Paste Store Module
//!
//! The paste lifecycle: creation, expiry evaluation and atomic view counting
//! on top of a [`KvStore`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PasteError, Result};
use crate::kv::{KvStore, StoreError};
use crate::paste::id::{generate_id, is_valid_id};
use crate::paste::record::{PasteRecord, VIEWS_FIELD};

/// Prefix of every paste key in the store.
pub const KEY_PREFIX: &str = "paste:";

/// Fresh IDs tried before giving up on a create.
const MAX_ID_ATTEMPTS: usize = 16;

/// Store key holding the paste `id`.
pub fn storage_key(id: &str) -> String {
    format!("{}{}", KEY_PREFIX, id)
}

// == Outcomes ==
/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedPaste {
    pub id: String,
    /// Shareable link, `{base_url}/p/{id}`
    pub url: String,
    pub record: PasteRecord,
}

/// What a reader gets back from an available paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteView {
    pub content: String,
    /// None for pastes without a view limit
    pub remaining_views: Option<u64>,
    /// ISO 8601 expiry instant, None for pastes without a TTL
    pub expires_at: Option<String>,
}

/// Verdict of a read attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Available(PasteView),
    /// Missing, expired or view-exhausted. Deliberately indistinguishable.
    Unavailable,
}

// == Paste Store ==
/// Creates and reads pastes. Cheap to clone; clones share the backing store.
#[derive(Clone)]
pub struct PasteStore {
    store: Arc<dyn KvStore>,
    base_url: String,
    timeout: Duration,
    max_content_bytes: usize,
}

impl PasteStore {
    // == Constructor ==
    /// Creates a PasteStore over `store`.
    ///
    /// # Arguments
    /// * `store` - Backing key-value store
    /// * `base_url` - Origin used for shareable links
    /// * `timeout` - Upper bound on each store round trip
    /// * `max_content_bytes` - Largest accepted content
    pub fn new(
        store: Arc<dyn KvStore>,
        base_url: impl Into<String>,
        timeout: Duration,
        max_content_bytes: usize,
    ) -> Self {
        Self {
            store,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            max_content_bytes,
        }
    }

    /// Creates a PasteStore with parameters from the Config.
    pub fn from_config(store: Arc<dyn KvStore>, config: &Config) -> Self {
        Self::new(
            store,
            config.base_url.clone(),
            Duration::from_millis(config.request_timeout_ms),
            config.max_content_bytes,
        )
    }

    /// Largest accepted content in bytes.
    pub fn max_content_bytes(&self) -> usize {
        self.max_content_bytes
    }

    /// Shareable link for a paste ID.
    pub fn paste_url(&self, id: &str) -> String {
        format!("{}/p/{}", self.base_url, id)
    }

    // == Create ==
    /// Validates the input and persists a new paste.
    ///
    /// All validation happens before the store is touched. The record and its
    /// storage TTL are written in one store operation.
    ///
    /// # Arguments
    /// * `content` - Text to share; must not be blank
    /// * `ttl_seconds` - Optional lifetime, at least 1
    /// * `max_views` - Optional view limit, at least 1
    /// * `now_ms` - Creation time (Unix milliseconds)
    pub async fn create(
        &self,
        content: String,
        ttl_seconds: Option<i64>,
        max_views: Option<i64>,
        now_ms: i64,
    ) -> Result<CreatedPaste> {
        if content.trim().is_empty() {
            return Err(PasteError::Validation("Content is required".to_string()));
        }
        if content.len() > self.max_content_bytes {
            return Err(PasteError::Validation(format!(
                "Content exceeds maximum size of {} bytes",
                self.max_content_bytes
            )));
        }

        let max_views = positive("max_views", max_views)?;
        let ttl_seconds = positive("ttl_seconds", ttl_seconds)?;

        let expires_at = match ttl_seconds {
            Some(ttl) => Some(expiry_after(now_ms, ttl)?),
            None => None,
        };

        let id = self.allocate_id().await?;
        let record = PasteRecord::new(content, now_ms, expires_at, max_views);
        let ttl = ttl_seconds.map(Duration::from_secs);

        self.bounded(self.store.set_hash(&storage_key(&id), record.to_fields(), ttl))
            .await?;

        info!(
            "Created paste {} (ttl={:?}s, max_views={:?})",
            id, ttl_seconds, max_views
        );

        Ok(CreatedPaste {
            url: self.paste_url(&id),
            id,
            record,
        })
    }

    // == Read ==
    /// Reads a paste at time `now_ms`, counting the view.
    ///
    /// Time expiry is checked before the counter is touched. For view-limited
    /// pastes the counter is incremented atomically and the new value decides
    /// the verdict; an increment that tips the paste over its limit is kept.
    /// Store failures are errors, never `Unavailable`.
    pub async fn read(&self, id: &str, now_ms: i64) -> Result<ReadOutcome> {
        if !is_valid_id(id) {
            debug!("Rejected malformed paste id");
            return Ok(ReadOutcome::Unavailable);
        }

        let key = storage_key(id);
        let fields = match self.bounded(self.store.get_hash(&key)).await? {
            Some(fields) => fields,
            None => {
                debug!("Paste {} not found", id);
                return Ok(ReadOutcome::Unavailable);
            }
        };

        let record = PasteRecord::from_fields(&fields)?;

        if record.is_expired_at(now_ms) {
            debug!("Paste {} expired", id);
            self.reap(&key).await;
            return Ok(ReadOutcome::Unavailable);
        }

        let remaining_views = if record.max_views.is_some() {
            let views = match self
                .bounded(self.store.incr_field(&key, VIEWS_FIELD, 1))
                .await?
            {
                Some(views) => views,
                None => {
                    // Expired or deleted between the fetch and the increment
                    debug!("Paste {} vanished before its view was counted", id);
                    return Ok(ReadOutcome::Unavailable);
                }
            };
            let views = u64::try_from(views).map_err(|_| {
                PasteError::Internal(format!("paste {} has a negative view counter", id))
            })?;

            if record.is_exhausted_by(views) {
                debug!("Paste {} exhausted at {} views", id, views);
                return Ok(ReadOutcome::Unavailable);
            }
            record.remaining_views(views)
        } else {
            None
        };

        Ok(ReadOutcome::Available(PasteView {
            expires_at: record.expires_at_iso(),
            content: record.content,
            remaining_views,
        }))
    }

    // == Helpers ==
    /// Picks an ID that is not in use yet.
    async fn allocate_id(&self) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_id(&mut rand::thread_rng());
            if !self.bounded(self.store.exists(&storage_key(&id))).await? {
                return Ok(id);
            }
            warn!("Paste id collision on {}, retrying", id);
        }

        Err(PasteError::Internal(
            "failed to generate a unique paste id".to_string(),
        ))
    }

    /// Best-effort removal of a paste that can no longer be read.
    async fn reap(&self, key: &str) {
        if let Err(e) = self.bounded(self.store.delete(key)).await {
            warn!("Failed to delete unavailable paste {}: {}", key, e);
        }
    }

    /// Runs a store operation under the configured timeout.
    async fn bounded<T, F>(&self, op: F) -> std::result::Result<T, StoreError>
    where
        F: Future<Output = std::result::Result<T, StoreError>>,
    {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}

/// Checks an optional limit is at least 1.
fn positive(name: &str, value: Option<i64>) -> Result<Option<u64>> {
    match value {
        None => Ok(None),
        Some(v) if v >= 1 => Ok(Some(v as u64)),
        Some(_) => Err(PasteError::Validation(format!(
            "{} must be a positive integer",
            name
        ))),
    }
}

/// Expiration timestamp `ttl_seconds` after `now_ms`.
fn expiry_after(now_ms: i64, ttl_seconds: u64) -> Result<i64> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(|ttl| ttl.checked_mul(1000))
        .and_then(|ttl_ms| now_ms.checked_add(ttl_ms))
        .ok_or_else(|| PasteError::Validation("ttl_seconds is too large".to_string()))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{Fields, MemoryStore};
    use async_trait::async_trait;

    const NOW: i64 = 1_700_000_000_000;

    fn paste_store() -> (Arc<MemoryStore>, PasteStore) {
        let backing = Arc::new(MemoryStore::new());
        let pastes = PasteStore::new(
            backing.clone(),
            "https://paste.example.com/",
            Duration::from_secs(1),
            1024,
        );
        (backing, pastes)
    }

    async fn views_of(backing: &MemoryStore, id: &str) -> String {
        backing.get_hash(&storage_key(id)).await.unwrap().unwrap()[VIEWS_FIELD].clone()
    }

    /// Store whose every command fails.
    struct DownStore;

    #[async_trait]
    impl KvStore for DownStore {
        async fn set_hash(
            &self,
            _: &str,
            _: Fields,
            _: Option<Duration>,
        ) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn get_hash(&self, _: &str) -> std::result::Result<Option<Fields>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn incr_field(
            &self,
            _: &str,
            _: &str,
            _: i64,
        ) -> std::result::Result<Option<i64>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn exists(&self, _: &str) -> std::result::Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn delete(&self, _: &str) -> std::result::Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        async fn ping(&self) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_create_returns_id_and_url() {
        let (backing, pastes) = paste_store();

        let created = pastes.create("hello".to_string(), None, None, NOW).await.unwrap();

        assert!(is_valid_id(&created.id));
        assert_eq!(
            created.url,
            format!("https://paste.example.com/p/{}", created.id)
        );
        assert_eq!(created.record.created_at, NOW);
        assert_eq!(created.record.views, 0);
        assert_eq!(backing.len().await, 1);
        assert_eq!(views_of(&backing, &created.id).await, "0");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_content() {
        let (backing, pastes) = paste_store();

        for content in ["", "   ", "\n\t "] {
            let result = pastes.create(content.to_string(), None, None, NOW).await;
            assert!(matches!(result, Err(PasteError::Validation(_))));
        }
        assert!(backing.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_content() {
        let (_, pastes) = paste_store();

        let result = pastes.create("x".repeat(1025), None, None, NOW).await;
        assert!(matches!(result, Err(PasteError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_limits() {
        let (backing, pastes) = paste_store();

        let zero_ttl = pastes.create("x".to_string(), Some(0), None, NOW).await;
        assert!(matches!(zero_ttl, Err(PasteError::Validation(_))));

        let negative_views = pastes.create("x".to_string(), None, Some(-1), NOW).await;
        assert!(matches!(negative_views, Err(PasteError::Validation(_))));

        let zero_views = pastes.create("x".to_string(), None, Some(0), NOW).await;
        assert!(matches!(zero_views, Err(PasteError::Validation(_))));

        assert!(backing.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_rejects_overflowing_ttl() {
        let (_, pastes) = paste_store();

        let result = pastes.create("x".to_string(), Some(i64::MAX), None, NOW).await;
        assert!(matches!(result, Err(PasteError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_attaches_storage_ttl() {
        let (backing, pastes) = paste_store();

        let created = pastes.create("x".to_string(), Some(60), None, NOW).await.unwrap();
        assert_eq!(created.record.expires_at, Some(NOW + 60_000));

        let ttl = backing.ttl_ms(&storage_key(&created.id)).await.unwrap();
        assert!(ttl > 59_000 && ttl <= 60_000);

        let unlimited = pastes.create("y".to_string(), None, None, NOW).await.unwrap();
        assert!(backing.ttl_ms(&storage_key(&unlimited.id)).await.is_none());
    }

    #[tokio::test]
    async fn test_round_trip_without_limits() {
        let (backing, pastes) = paste_store();
        let created = pastes.create("X".to_string(), None, None, NOW).await.unwrap();

        for _ in 0..5 {
            let outcome = pastes.read(&created.id, NOW).await.unwrap();
            assert_eq!(
                outcome,
                ReadOutcome::Available(PasteView {
                    content: "X".to_string(),
                    remaining_views: None,
                    expires_at: None,
                })
            );
        }

        // Unlimited pastes never touch the counter
        assert_eq!(views_of(&backing, &created.id).await, "0");
    }

    #[tokio::test]
    async fn test_view_exhaustion() {
        let (backing, pastes) = paste_store();
        let created = pastes.create("X".to_string(), None, Some(2), NOW).await.unwrap();

        let first = pastes.read(&created.id, NOW).await.unwrap();
        assert!(matches!(
            first,
            ReadOutcome::Available(PasteView { remaining_views: Some(1), .. })
        ));

        let second = pastes.read(&created.id, NOW).await.unwrap();
        assert!(matches!(
            second,
            ReadOutcome::Available(PasteView { remaining_views: Some(0), .. })
        ));

        for _ in 0..3 {
            assert_eq!(
                pastes.read(&created.id, NOW).await.unwrap(),
                ReadOutcome::Unavailable
            );
        }

        // Rejected attempts still consumed a slot
        assert_eq!(views_of(&backing, &created.id).await, "5");
    }

    #[tokio::test]
    async fn test_expiry_ordering() {
        let (_, pastes) = paste_store();
        let created = pastes.create("X".to_string(), Some(1), None, NOW).await.unwrap();

        let before = pastes.read(&created.id, NOW + 500).await.unwrap();
        match before {
            ReadOutcome::Available(view) => {
                assert_eq!(view.expires_at.as_deref(), Some("2023-11-14T22:13:21.000Z"));
            }
            ReadOutcome::Unavailable => panic!("paste should still be readable"),
        }

        let after = pastes.read(&created.id, NOW + 1500).await.unwrap();
        assert_eq!(after, ReadOutcome::Unavailable);

        // Time never reverses for a reaped paste
        let again = pastes.read(&created.id, NOW + 500).await.unwrap();
        assert_eq!(again, ReadOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_expiry_boundary_is_still_readable() {
        let (_, pastes) = paste_store();
        let created = pastes.create("X".to_string(), Some(1), None, NOW).await.unwrap();

        let outcome = pastes.read(&created.id, NOW + 1000).await.unwrap();
        assert!(matches!(outcome, ReadOutcome::Available(_)));
    }

    #[tokio::test]
    async fn test_expired_paste_does_not_count_views() {
        let (backing, pastes) = paste_store();
        let created = pastes
            .create("X".to_string(), Some(1), Some(5), NOW)
            .await
            .unwrap();
        let key = storage_key(&created.id);

        // Keep a copy so the counter is observable after the lazy delete
        let snapshot = backing.get_hash(&key).await.unwrap().unwrap();

        assert_eq!(
            pastes.read(&created.id, NOW + 5_000).await.unwrap(),
            ReadOutcome::Unavailable
        );
        assert!(backing.get_hash(&key).await.unwrap().is_none());
        assert_eq!(snapshot[VIEWS_FIELD], "0");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let (_, pastes) = paste_store();

        assert_eq!(
            pastes.read("AbCd1234", NOW).await.unwrap(),
            ReadOutcome::Unavailable
        );
        assert_eq!(
            pastes.read("../etc", NOW).await.unwrap(),
            ReadOutcome::Unavailable
        );
    }

    /// Store whose records disappear right after they are fetched, as when
    /// the TTL lapses or another reader deletes the paste mid-read.
    struct VanishingStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl KvStore for VanishingStore {
        async fn set_hash(
            &self,
            key: &str,
            fields: Fields,
            ttl: Option<Duration>,
        ) -> std::result::Result<(), StoreError> {
            self.inner.set_hash(key, fields, ttl).await
        }
        async fn get_hash(&self, key: &str) -> std::result::Result<Option<Fields>, StoreError> {
            let fields = self.inner.get_hash(key).await?;
            self.inner.delete(key).await?;
            Ok(fields)
        }
        async fn incr_field(
            &self,
            key: &str,
            field: &str,
            delta: i64,
        ) -> std::result::Result<Option<i64>, StoreError> {
            self.inner.incr_field(key, field, delta).await
        }
        async fn exists(&self, key: &str) -> std::result::Result<bool, StoreError> {
            self.inner.exists(key).await
        }
        async fn delete(&self, key: &str) -> std::result::Result<bool, StoreError> {
            self.inner.delete(key).await
        }
        async fn ping(&self) -> std::result::Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_paste_vanishing_mid_read_leaves_no_counter() {
        let backing = Arc::new(VanishingStore {
            inner: MemoryStore::new(),
        });
        let pastes = PasteStore::new(
            backing.clone(),
            "http://localhost:3000",
            Duration::from_secs(1),
            1024,
        );
        let created = pastes.create("X".to_string(), Some(60), Some(3), NOW).await.unwrap();

        assert_eq!(
            pastes.read(&created.id, NOW).await.unwrap(),
            ReadOutcome::Unavailable
        );
        assert!(backing.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failures_are_internal() {
        let pastes = PasteStore::new(
            Arc::new(DownStore),
            "http://localhost:3000",
            Duration::from_secs(1),
            1024,
        );

        let created = pastes.create("X".to_string(), None, None, NOW).await;
        assert!(matches!(created, Err(PasteError::Internal(_))));

        let read = pastes.read("AbCd1234", NOW).await;
        assert!(matches!(read, Err(PasteError::Internal(_))));
    }

    #[tokio::test]
    async fn test_validation_precedes_store_access() {
        let pastes = PasteStore::new(
            Arc::new(DownStore),
            "http://localhost:3000",
            Duration::from_secs(1),
            1024,
        );

        let result = pastes.create(" ".to_string(), None, None, NOW).await;
        assert!(matches!(result, Err(PasteError::Validation(_))));
    }

    #[tokio::test]
    async fn test_concurrent_reads_single_winner() {
        let (backing, pastes) = paste_store();
        let created = pastes.create("X".to_string(), None, Some(1), NOW).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..32 {
            let pastes = pastes.clone();
            let id = created.id.clone();
            handles.push(tokio::spawn(async move { pastes.read(&id, NOW).await.unwrap() }));
        }

        let mut available = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), ReadOutcome::Available(_)) {
                available += 1;
            }
        }

        assert_eq!(available, 1);
        assert_eq!(views_of(&backing, &created.id).await, "32");
    }
}
