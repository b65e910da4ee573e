//! Supported currencies and add-credit product planning
//!
//! For every importable currency the billing organization supports, the
//! commerce layer needs one add-credit product developers can buy to top
//! up their prepaid balance. This service lists supported currencies and
//! plans the products that are still missing.

use crate::constants::MAX_TOP_UP_AMOUNT;
use m10n_cache::keys::{supported_currencies_key, CURRENCY_TTL_SECS};
use m10n_core::{
    models::{AddCreditProduct, SupportedCurrency},
    traits::{BillingClient, CacheStore, CurrencyService},
    AppError,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Currency codes the commerce layer can price in
///
/// A supported currency outside this set cannot get an add-credit product
/// and is skipped during planning.
const COMMERCE_CURRENCY_CODES: &[&str] = &[
    "AUD", "BRL", "CAD", "CHF", "EUR", "GBP", "INR", "JPY", "MXN", "NZD", "USD", "ZAR",
];

/// Whether the commerce layer knows `code`
pub fn is_commerce_currency(code: &str) -> bool {
    COMMERCE_CURRENCY_CODES.contains(&code)
}

/// Whether an add-credit product can be created for a currency
///
/// Requires the currency to be active upstream and known to the commerce
/// layer.
pub fn is_importable(currency: &SupportedCurrency) -> bool {
    currency.is_active() && is_commerce_currency(&currency.code)
}

/// Build the SKU for a currency's add-credit product
pub fn add_credit_sku(code: &str) -> String {
    format!("ADD-CREDIT-{}", code)
}

/// Currency service implementation with caching
///
/// `configured_skus` holds the SKUs of add-credit products that already
/// exist, so planning only proposes the missing ones. Upstream failures
/// during planning propagate; a half-configured currency setup is worth
/// surfacing, not logging away.
pub struct CurrencyGate<B: BillingClient, S: CacheStore> {
    client: Arc<B>,
    store: Arc<S>,
    configured_skus: Vec<String>,
}

impl<B: BillingClient, S: CacheStore> CurrencyGate<B, S> {
    pub fn new(client: Arc<B>, store: Arc<S>, configured_skus: Vec<String>) -> Self {
        Self {
            client,
            store,
            configured_skus,
        }
    }

    fn is_configured(&self, sku: &str) -> bool {
        self.configured_skus.iter().any(|s| s == sku)
    }
}

#[async_trait]
impl<B: BillingClient, S: CacheStore> CurrencyService for CurrencyGate<B, S> {
    #[instrument(skip(self))]
    async fn supported_currencies(&self) -> Result<Vec<SupportedCurrency>, AppError> {
        let key = supported_currencies_key();

        match self.store.get::<Vec<SupportedCurrency>>(&key).await {
            Ok(Some(currencies)) => {
                debug!("Supported currency cache HIT");
                return Ok(currencies);
            }
            Ok(None) => debug!("Supported currency cache MISS"),
            Err(e) => warn!("Cache error for supported currencies: {}", e),
        }

        let currencies = self.client.list_supported_currencies().await?;

        if let Err(e) = self.store.set(&key, &currencies, CURRENCY_TTL_SECS).await {
            warn!("Failed to cache supported currencies: {}", e);
        }

        Ok(currencies)
    }

    #[instrument(skip(self))]
    async fn plan_add_credit_products(&self) -> Result<Vec<AddCreditProduct>, AppError> {
        let currencies = self.supported_currencies().await?;

        let products = currencies
            .iter()
            .filter(|currency| is_importable(currency))
            .filter_map(|currency| {
                let sku = add_credit_sku(&currency.code);
                if self.is_configured(&sku) {
                    debug!("Add-credit product {} already configured, skipping", sku);
                    return None;
                }
                Some(AddCreditProduct {
                    sku,
                    title: format!("Add credit: {}", currency.display_name),
                    currency_code: currency.code.clone(),
                    price: currency.minimum_top_up_amount,
                    minimum: currency.minimum_top_up_amount,
                    maximum: MAX_TOP_UP_AMOUNT,
                })
            })
            .collect();

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use m10n_cache::MemoryStore;
    use m10n_core::models::{BalanceSnapshot, BillingSubject, CurrencyStatus, PurchasedPlan, RatePlan};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockClient {
        currencies: Vec<SupportedCurrency>,
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl BillingClient for MockClient {
        async fn fetch_prepaid_balances(
            &self,
            subject: &BillingSubject,
        ) -> Result<BalanceSnapshot, AppError> {
            Ok(BalanceSnapshot::new(subject.billing_id(), vec![]))
        }

        async fn list_rate_plans(&self) -> Result<Vec<RatePlan>, AppError> {
            Ok(vec![])
        }

        async fn list_purchased_plans(
            &self,
            _developer_id: &str,
        ) -> Result<Vec<PurchasedPlan>, AppError> {
            Ok(vec![])
        }

        async fn list_supported_currencies(&self) -> Result<Vec<SupportedCurrency>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Transient("upstream down".to_string()));
            }
            Ok(self.currencies.clone())
        }
    }

    fn currency(code: &str, status: CurrencyStatus) -> SupportedCurrency {
        SupportedCurrency {
            code: code.to_string(),
            display_name: format!("{} currency", code),
            status,
            minimum_top_up_amount: dec!(10),
        }
    }

    fn gate(
        currencies: Vec<SupportedCurrency>,
        configured: Vec<String>,
    ) -> (Arc<MockClient>, CurrencyGate<MockClient, MemoryStore>) {
        let client = Arc::new(MockClient {
            currencies,
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let gate = CurrencyGate::new(client.clone(), Arc::new(MemoryStore::default()), configured);
        (client, gate)
    }

    #[test]
    fn test_is_importable() {
        assert!(is_importable(&currency("USD", CurrencyStatus::Active)));
        assert!(!is_importable(&currency("USD", CurrencyStatus::Inactive)));
        assert!(!is_importable(&currency("XTS", CurrencyStatus::Active)));
    }

    #[test]
    fn test_add_credit_sku() {
        assert_eq!(add_credit_sku("USD"), "ADD-CREDIT-USD");
    }

    #[tokio::test]
    async fn test_plan_skips_inactive_and_unknown_currencies() {
        let (_client, gate) = gate(
            vec![
                currency("USD", CurrencyStatus::Active),
                currency("EUR", CurrencyStatus::Inactive),
                currency("XTS", CurrencyStatus::Active),
            ],
            vec![],
        );

        let products = gate.plan_add_credit_products().await.unwrap();
        assert_eq!(products.len(), 1);

        let usd = &products[0];
        assert_eq!(usd.sku, "ADD-CREDIT-USD");
        assert_eq!(usd.price, dec!(10));
        assert_eq!(usd.minimum, dec!(10));
        assert_eq!(usd.maximum, dec!(999));
    }

    #[tokio::test]
    async fn test_plan_skips_configured_products() {
        let (_client, gate) = gate(
            vec![
                currency("USD", CurrencyStatus::Active),
                currency("EUR", CurrencyStatus::Active),
            ],
            vec!["ADD-CREDIT-USD".to_string()],
        );

        let products = gate.plan_add_credit_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].sku, "ADD-CREDIT-EUR");
    }

    #[tokio::test]
    async fn test_currencies_cached_across_calls() {
        let (client, gate) = gate(vec![currency("USD", CurrencyStatus::Active)], vec![]);

        gate.supported_currencies().await.unwrap();
        gate.plan_add_credit_products().await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let client = Arc::new(MockClient {
            currencies: vec![],
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let gate = CurrencyGate::new(client, Arc::new(MemoryStore::default()), vec![]);

        let result = gate.plan_add_credit_products().await;
        assert!(matches!(result, Err(AppError::Transient(_))));
    }
}
