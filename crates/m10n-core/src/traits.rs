//! Common traits for collaborators and services
//!
//! Defines the seams between the balance cache gate, the upstream billing
//! API, the cache store, and the presentation layer. Collaborators are
//! passed in explicitly via constructors rather than resolved from any
//! process-wide registry.

use crate::models::{
    AddCreditProduct, BalanceSnapshot, BillingSubject, PurchasedPlan, RatePlan, SupportedCurrency,
};
use crate::AppResult;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Client for the upstream monetization API
///
/// Performs the actual network calls. May fail with `AppError::Transient`
/// (network/upstream outage) or `AppError::NotEntitled` (no billing
/// relationship for the subject). Implementations perform no retries;
/// callers decide whether a transient failure is worth another attempt.
#[async_trait]
pub trait BillingClient: Send + Sync {
    /// Fetch the full set of prepaid balances for a developer or team
    async fn fetch_prepaid_balances(&self, subject: &BillingSubject)
        -> AppResult<BalanceSnapshot>;

    /// List all rate plans of the organization
    async fn list_rate_plans(&self) -> AppResult<Vec<RatePlan>>;

    /// List a developer's rate plan subscriptions
    async fn list_purchased_plans(&self, developer_id: &str) -> AppResult<Vec<PurchasedPlan>>;

    /// List the currencies the organization supports
    async fn list_supported_currencies(&self) -> AppResult<Vec<SupportedCurrency>>;
}

/// Generic key/value cache with per-entry TTL
///
/// Values are JSON-serialized. Expiry is enforced by the store: `get` never
/// returns an entry past its TTL.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>>;

    /// Set a value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> AppResult<()>;

    /// Delete a value from cache. Idempotent; returns whether a value existed.
    async fn delete(&self, key: &str) -> AppResult<bool>;
}

/// Prepaid balance access with caching
///
/// The single entry point the presentation layer uses for balances.
/// Authorization (who may view or refresh whose balances) is the caller's
/// responsibility, not this service's.
#[async_trait]
pub trait BalanceService: Send + Sync {
    /// Return the subject's balance snapshot, served from cache when fresh.
    ///
    /// `force_refresh` drops any cached snapshot before fetching, so a
    /// failed refresh never leaves stale data behind.
    async fn get_balances(
        &self,
        subject: &BillingSubject,
        force_refresh: bool,
    ) -> AppResult<BalanceSnapshot>;
}

/// Rate plan catalog access
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List the rate plans a subject can currently purchase
    async fn purchasable_plans(&self, subject: &BillingSubject) -> AppResult<Vec<RatePlan>>;

    /// List a developer's rate plan subscriptions, newest first
    async fn purchased_plans(&self, developer_id: &str) -> AppResult<Vec<PurchasedPlan>>;
}

/// Supported currency listing and add-credit product planning
#[async_trait]
pub trait CurrencyService: Send + Sync {
    /// List the currencies the billing organization supports
    async fn supported_currencies(&self) -> AppResult<Vec<SupportedCurrency>>;

    /// Plan one add-credit product per importable currency that does not
    /// have one yet
    async fn plan_add_credit_products(&self) -> AppResult<Vec<AddCreditProduct>>;
}
