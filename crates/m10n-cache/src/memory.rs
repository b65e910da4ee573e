//! In-process cache store
//!
//! A thread-safe map of JSON values with per-entry expiry, used when no
//! Redis URL is configured and throughout the test suites. There is no
//! background eviction sweep; expiry is checked lazily on read, and expired
//! entries are dropped at that point.
//!
//! Entries are stamped with `tokio::time::Instant`, so tests running on a
//! paused runtime can drive expiry deterministically with
//! `tokio::time::advance`.

use async_trait::async_trait;
use m10n_core::error::AppError;
use m10n_core::traits::CacheStore;
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use tokio::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    json: String,
    expires_at: Instant,
}

/// Thread-safe in-process cache with per-entry TTL
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: std::sync::Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including ones past their TTL
    /// that have not been read since expiring.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let now = Instant::now();

        let json = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => Some(entry.json.clone()),
                Some(_) => None, // expired, removed below
                None => None,
            }
        };

        match json {
            Some(json) => {
                debug!("Cache HIT: {}", key);
                let value = serde_json::from_str::<T>(&json).map_err(|e| {
                    AppError::Serialization(format!("Deserialization failed: {}", e))
                })?;
                Ok(Some(value))
            }
            None => {
                // Drop the entry if it was present but expired.
                let mut entries = self.entries.write();
                if entries.get(key).is_some_and(|e| e.expires_at <= now) {
                    entries.remove(key);
                }
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), AppError> {
        debug!("SET {} (TTL: {}s)", key, ttl_secs);
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Serialization(format!("Serialization failed: {}", e)))?;

        let entry = Entry {
            json,
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, AppError> {
        debug!("DEL {}", key);
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("k", &"value".to_string(), 60).await.unwrap();
        let result: Option<String> = store.get("k").await.unwrap();
        assert_eq!(result, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = MemoryStore::new();
        let result: Option<String> = store.get("missing").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.set("k", &1_i32, 60).await.unwrap();

        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_lazily() {
        let store = MemoryStore::new();
        store.set("k", &42_i32, 60).await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        let result: Option<i32> = store.get("k").await.unwrap();
        assert_eq!(result, Some(42));

        tokio::time::advance(Duration::from_secs(2)).await;
        let result: Option<i32> = store.get("k").await.unwrap();
        assert_eq!(result, None);

        // The expired entry was dropped by the read.
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_renews_expiry() {
        let store = MemoryStore::new();
        store.set("k", &1_i32, 60).await.unwrap();

        tokio::time::advance(Duration::from_secs(40)).await;
        store.set("k", &2_i32, 60).await.unwrap();

        // 40 + 30 is past the first expiry but within the second.
        tokio::time::advance(Duration::from_secs(30)).await;
        let result: Option<i32> = store.get("k").await.unwrap();
        assert_eq!(result, Some(2));
    }
}
