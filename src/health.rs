//! Health Check Module
//!
//! Reports whether the persistence layer answers.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::kv::{KvStore, StoreError};

/// Reachability of the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub reachable: bool,
    /// Present only when the store could not be reached
    pub error: Option<String>,
}

/// Pings the store on demand.
#[derive(Clone)]
pub struct HealthCheck {
    store: Arc<dyn KvStore>,
    timeout: Duration,
}

impl HealthCheck {
    pub fn new(store: Arc<dyn KvStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Pings the store. Failures are reported in the status, never returned.
    pub async fn check(&self) -> HealthStatus {
        let result = match tokio::time::timeout(self.timeout, self.store.ping()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        };

        match result {
            Ok(()) => HealthStatus {
                reachable: true,
                error: None,
            },
            Err(e) => {
                warn!("Health check failed: {}", e);
                HealthStatus {
                    reachable: false,
                    error: Some("Persistence unreachable".to_string()),
                }
            }
        }
    }
}
