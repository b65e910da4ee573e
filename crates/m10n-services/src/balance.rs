//! Prepaid balance service with cache gating
//!
//! Sits between the HTTP surface and the upstream billing API. Balance
//! snapshots are expensive to fetch and briefly stale data is acceptable,
//! so reads go through a TTL cache; a forced refresh drops the cached
//! snapshot before fetching so a failed fetch can never resurrect stale
//! data.

use m10n_cache::keys::prepaid_balances_key;
use m10n_core::{
    models::{BalanceSnapshot, BillingSubject},
    traits::{BalanceService, BillingClient, CacheStore},
    AppError,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Balance service implementation with caching
///
/// Cache failures degrade to direct upstream calls; upstream failures
/// always propagate. The gate performs no retries and holds no state of
/// its own between calls.
pub struct BalanceGate<B: BillingClient, S: CacheStore> {
    client: Arc<B>,
    store: Arc<S>,

    /// Snapshot lifetime in seconds. Zero disables caching entirely.
    ttl_secs: u64,
}

impl<B: BillingClient, S: CacheStore> BalanceGate<B, S> {
    pub fn new(client: Arc<B>, store: Arc<S>, ttl_secs: u64) -> Self {
        Self {
            client,
            store,
            ttl_secs,
        }
    }

    /// Try to get a cached snapshot
    async fn read_cached(&self, key: &str) -> Option<BalanceSnapshot> {
        match self.store.get::<BalanceSnapshot>(key).await {
            Ok(snapshot) => {
                if snapshot.is_some() {
                    debug!("Balance cache HIT for key: {}", key);
                }
                snapshot
            }
            Err(e) => {
                warn!("Cache read error for {}: {}", key, e);
                // Degrade to a direct upstream call
                None
            }
        }
    }

    /// Store a snapshot in cache
    async fn write_cached(&self, key: &str, snapshot: &BalanceSnapshot) {
        if let Err(e) = self.store.set(key, snapshot, self.ttl_secs).await {
            warn!("Failed to cache balance snapshot for {}: {}", key, e);
        }
    }

    /// Drop the cached snapshot for a forced refresh
    async fn drop_cached(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            warn!("Failed to drop cached balance snapshot for {}: {}", key, e);
        }
    }
}

#[async_trait]
impl<B: BillingClient, S: CacheStore> BalanceService for BalanceGate<B, S> {
    #[instrument(skip(self))]
    async fn get_balances(
        &self,
        subject: &BillingSubject,
        force_refresh: bool,
    ) -> Result<BalanceSnapshot, AppError> {
        // TTL of zero means the store is never consulted, not even to
        // invalidate
        if self.ttl_secs == 0 {
            debug!("Balance caching disabled, fetching directly");
            return self.client.fetch_prepaid_balances(subject).await;
        }

        let key = prepaid_balances_key(subject);

        if force_refresh {
            // Invalidate before fetching so a failed fetch leaves no
            // stale snapshot behind
            self.drop_cached(&key).await;
        } else if let Some(snapshot) = self.read_cached(&key).await {
            return Ok(snapshot);
        }

        debug!("Balance cache MISS for subject: {}", subject.billing_id());
        let snapshot = self.client.fetch_prepaid_balances(subject).await?;

        self.write_cached(&key, &snapshot).await;

        Ok(snapshot)
    }
}
