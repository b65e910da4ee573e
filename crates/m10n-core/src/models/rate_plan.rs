//! Rate plan model
//!
//! Rate plans are the billing catalog entries a developer can purchase for
//! an API product: a setup fee, a recurring fee, consumption-based pricing
//! bands, and revenue-share bands.

use crate::models::Money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a rate plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatePlanState {
    /// Not yet visible to developers
    #[default]
    Draft,
    /// Published and purchasable while its activity window is open
    Published,
    /// Past its end time
    Expired,
}

impl fmt::Display for RatePlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatePlanState::Draft => write!(f, "DRAFT"),
            RatePlanState::Published => write!(f, "PUBLISHED"),
            RatePlanState::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// Billing period for recurring fees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Weekly,
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "MONTHLY"),
            BillingPeriod::Weekly => write!(f, "WEEKLY"),
        }
    }
}

/// A revenue-share band
///
/// `start`/`end` bound the transaction volume the band applies to; an
/// unbounded band shares a flat percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RevenueShareRate {
    pub start: Option<Decimal>,
    pub end: Option<Decimal>,
    pub share_percentage: Option<Decimal>,
}

/// A consumption-based pricing band with a per-unit fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsumptionRate {
    pub start: Option<Decimal>,
    pub end: Option<Decimal>,
    pub fee: Money,
}

/// A rate plan from the billing catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePlan {
    /// Upstream identifier
    pub id: String,

    /// Human-readable name shown in the catalog
    pub display_name: String,

    /// The API product the plan charges for
    pub api_product: String,

    /// Currency code (ISO 4217) all fees are expressed in
    pub currency_code: String,

    pub state: RatePlanState,

    pub billing_period: BillingPeriod,

    /// One-time fee charged on purchase
    pub setup_fee: Option<Money>,

    /// Fee charged every billing period
    pub recurring_fee: Option<Money>,

    pub consumption_rates: Vec<ConsumptionRate>,

    pub revenue_share_rates: Vec<RevenueShareRate>,

    /// Start of the plan's activity window
    pub start_time: Option<DateTime<Utc>>,

    /// End of the plan's activity window; open-ended when absent
    pub end_time: Option<DateTime<Utc>>,
}

impl RatePlan {
    #[inline]
    pub fn is_published(&self) -> bool {
        self.state == RatePlanState::Published
    }

    /// Whether the plan's activity window covers `now`
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        let started = self.start_time.map_or(true, |start| start <= now);
        let not_ended = self.end_time.map_or(true, |end| now < end);
        started && not_ended
    }

    /// A plan is purchasable when it is published and its window is open
    pub fn is_purchasable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_published() && self.is_open_at(now)
    }
}

impl Default for RatePlan {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: String::new(),
            api_product: String::new(),
            currency_code: "USD".to_string(),
            state: RatePlanState::Draft,
            billing_period: BillingPeriod::Monthly,
            setup_fee: None,
            recurring_fee: None,
            consumption_rates: Vec::new(),
            revenue_share_rates: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }
}
