//! Monetization services for m10n-portal
//!
//! This crate contains the business logic between the HTTP surface and the
//! upstream billing API: balance reads with cache gating, the rate plan
//! catalog, pricing band summaries, and add-credit product planning.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service owns its dependencies (billing client, cache store)
//! - Services are wrapped in Arc for safe sharing across async tasks
//! - All operations are instrumented with tracing
//! - Cache failures degrade to direct upstream calls; upstream failures
//!   always propagate to the caller
//!
//! # Services
//!
//! - `BalanceGate` - Prepaid balance reads with TTL caching and forced refresh
//! - `CatalogGate` - Purchasable and purchased rate plan listing
//! - `CurrencyGate` - Supported currencies and add-credit product planning
//! - `pricing` - Human-readable pricing band summaries

pub mod add_credit;
pub mod balance;
pub mod catalog;
pub mod pricing;

pub use add_credit::CurrencyGate;
pub use balance::BalanceGate;
pub use catalog::CatalogGate;

/// Business logic constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Largest amount a single add-credit purchase may top up
    pub const MAX_TOP_UP_AMOUNT: Decimal = dec!(999);
}
