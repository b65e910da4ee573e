//! Supported currencies and add-credit products
//!
//! The billing organization supports a set of currencies developers can hold
//! prepaid balances in. For each importable currency the commerce layer gets
//! one "add credit" product so developers can top up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a supported currency in the billing organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrencyStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for CurrencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyStatus::Active => write!(f, "ACTIVE"),
            CurrencyStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

/// A currency the billing organization supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportedCurrency {
    /// Currency code (ISO 4217, upper case)
    pub code: String,

    /// Human-readable name, e.g. "United States Dollars"
    pub display_name: String,

    pub status: CurrencyStatus,

    /// Smallest amount a developer may top up in one purchase
    pub minimum_top_up_amount: Decimal,
}

impl SupportedCurrency {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == CurrencyStatus::Active
    }
}

/// A planned commerce product that lets developers add credit in one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCreditProduct {
    /// Stock keeping unit, `ADD-CREDIT-{CODE}`
    pub sku: String,

    pub title: String,

    pub currency_code: String,

    /// Default purchase price (the currency's minimum top-up)
    pub price: Decimal,

    /// Lower bound of the allowed top-up range
    pub minimum: Decimal,

    /// Upper bound of the allowed top-up range
    pub maximum: Decimal,
}
