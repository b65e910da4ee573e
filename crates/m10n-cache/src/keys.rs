//! Cache key builders and TTL defaults for m10n-portal
//!
//! Standardized key naming for all cached data, preventing collisions
//! between resources.
//!
//! # Key Patterns
//!
//! - `developer:{developer_id}:prepaid_balances` - a developer's balance snapshot
//! - `team:{team}:prepaid_balances` - a team's balance snapshot
//! - `catalog:rate_plans` - the organization's rate plan catalog
//! - `catalog:supported_currencies` - the organization's supported currencies

use m10n_core::models::BillingSubject;

/// Prefix for per-developer cached data
///
/// Format: `developer:{developer_id}:{resource}`
pub const DEVELOPER_PREFIX: &str = "developer";

/// Prefix for per-team cached data
///
/// Format: `team:{team}:{resource}`
pub const TEAM_PREFIX: &str = "team";

/// Prefix for organization-wide catalog data
///
/// Format: `catalog:{resource}`
pub const CATALOG_PREFIX: &str = "catalog";

/// Resource suffix for prepaid balance snapshots
pub const PREPAID_BALANCES_SUFFIX: &str = "prepaid_balances";

/// Default TTL for the rate plan catalog (5 minutes)
pub const CATALOG_TTL_SECS: u64 = 300;

/// Default TTL for supported currencies (1 hour)
pub const CURRENCY_TTL_SECS: u64 = 3600;

/// Build the cache key for a subject's prepaid balance snapshot
///
/// The prefix is selected by the presence of team context, so a developer
/// and a team with the same name never share an entry.
///
/// # Example
///
/// ```
/// use m10n_cache::keys::prepaid_balances_key;
/// use m10n_core::models::BillingSubject;
///
/// let key = prepaid_balances_key(&BillingSubject::developer("dev@example.com"));
/// assert_eq!(key, "developer:dev@example.com:prepaid_balances");
/// ```
pub fn prepaid_balances_key(subject: &BillingSubject) -> String {
    let prefix = if subject.is_team() {
        TEAM_PREFIX
    } else {
        DEVELOPER_PREFIX
    };
    format!(
        "{}:{}:{}",
        prefix,
        subject.billing_id(),
        PREPAID_BALANCES_SUFFIX
    )
}

/// Build the cache key for the rate plan catalog
pub fn rate_plan_catalog_key() -> String {
    format!("{}:rate_plans", CATALOG_PREFIX)
}

/// Build the cache key for the supported currency list
pub fn supported_currencies_key() -> String {
    format!("{}:supported_currencies", CATALOG_PREFIX)
}
