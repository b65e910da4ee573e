//! Supported currency and add-credit product DTOs

use m10n_core::models::{AddCreditProduct, SupportedCurrency};
use rust_decimal::Decimal;
use serde::Serialize;

/// A currency the billing organization supports
#[derive(Debug, Clone, Serialize)]
pub struct SupportedCurrencyResponse {
    pub code: String,
    pub display_name: String,
    pub status: String,
    pub minimum_top_up_amount: Decimal,
}

impl From<SupportedCurrency> for SupportedCurrencyResponse {
    fn from(currency: SupportedCurrency) -> Self {
        Self {
            status: currency.status.to_string(),
            code: currency.code,
            display_name: currency.display_name,
            minimum_top_up_amount: currency.minimum_top_up_amount,
        }
    }
}

/// A planned add-credit product for one currency
#[derive(Debug, Clone, Serialize)]
pub struct AddCreditProductResponse {
    pub sku: String,
    pub title: String,
    pub currency_code: String,
    pub price: Decimal,
    pub minimum: Decimal,
    pub maximum: Decimal,
}

impl From<AddCreditProduct> for AddCreditProductResponse {
    fn from(product: AddCreditProduct) -> Self {
        Self {
            sku: product.sku,
            title: product.title,
            currency_code: product.currency_code,
            price: product.price,
            minimum: product.minimum,
            maximum: product.maximum,
        }
    }
}
