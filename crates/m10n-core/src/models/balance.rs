//! Prepaid balance models
//!
//! A developer's prepaid balances are fetched from the billing API as a
//! snapshot: the full set of per-currency balances at one point in time.
//! Snapshots are immutable and replaced wholesale on refresh, never merged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single per-currency prepaid balance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaidBalance {
    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currently available credit
    pub available: Decimal,

    /// Total credit added through top-ups
    pub top_ups: Decimal,

    /// Total usage charged against the balance
    pub usage: Decimal,
}

impl PrepaidBalance {
    /// Whether the developer has consumed more than was topped up
    #[inline]
    pub fn is_overdrawn(&self) -> bool {
        self.available < Decimal::ZERO
    }
}

/// The full set of prepaid balances for one developer at one fetch
///
/// Owned by the cache store once written; the gate never retains a private
/// copy across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// The subject the snapshot belongs to: a developer email or a team name
    pub subject_id: String,

    /// Per-currency balance records
    pub balances: Vec<PrepaidBalance>,

    /// When the snapshot was fetched from the billing API
    pub fetched_at: DateTime<Utc>,
}

impl BalanceSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(subject_id: impl Into<String>, balances: Vec<PrepaidBalance>) -> Self {
        Self {
            subject_id: subject_id.into(),
            balances,
            fetched_at: Utc::now(),
        }
    }

    /// Look up the balance record for a currency (case-insensitive)
    pub fn balance_for(&self, currency_code: &str) -> Option<&PrepaidBalance> {
        self.balances
            .iter()
            .find(|b| b.currency_code.eq_ignore_ascii_case(currency_code))
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
