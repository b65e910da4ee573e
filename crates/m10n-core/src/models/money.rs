//! Monetary amounts
//!
//! The upstream billing API represents money as whole units plus nanos
//! (billionths of a unit) alongside an ISO 4217 currency code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in the upstream wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Money {
    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Whole units of the amount
    pub units: i64,

    /// Nano units (10^-9). Carries the same sign as `units` for
    /// non-zero amounts.
    pub nanos: i32,
}

impl Money {
    pub fn new(currency_code: impl Into<String>, units: i64, nanos: i32) -> Self {
        Self {
            currency_code: currency_code.into(),
            units,
            nanos,
        }
    }

    /// Convert to a decimal amount
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.units) + Decimal::new(i64::from(self.nanos), 9)
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.nanos == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal().normalize(), self.currency_code)
    }
}
