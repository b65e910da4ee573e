//! Domain models for m10n-portal
//!
//! This module contains the core domain models used throughout the application.

pub mod balance;
pub mod currency;
pub mod money;
pub mod purchased;
pub mod rate_plan;
pub mod subject;

pub use balance::{BalanceSnapshot, PrepaidBalance};
pub use currency::{AddCreditProduct, CurrencyStatus, SupportedCurrency};
pub use money::Money;
pub use purchased::PurchasedPlan;
pub use rate_plan::{BillingPeriod, ConsumptionRate, RatePlan, RatePlanState, RevenueShareRate};
pub use subject::BillingSubject;
