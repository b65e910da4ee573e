//! Wire representations of upstream management API resources
//!
//! The management API speaks camelCase JSON and serializes 64-bit integers
//! as strings in some responses and as numbers in others. These types absorb
//! that looseness at the boundary and convert into the domain models from
//! `m10n_core`.

use chrono::{DateTime, Utc};
use m10n_core::models::{
    BalanceSnapshot, BillingPeriod, ConsumptionRate, CurrencyStatus, Money, PrepaidBalance,
    PurchasedPlan, RatePlan, RatePlanState, RevenueShareRate, SupportedCurrency,
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A monetary amount as the upstream serializes it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMoney {
    #[serde(default)]
    pub currency_code: String,

    /// Whole units, serialized as a string or a number
    #[serde(default, deserialize_with = "deserialize_i64_flex")]
    pub units: i64,

    #[serde(default)]
    pub nanos: i32,
}

impl From<WireMoney> for Money {
    fn from(wire: WireMoney) -> Self {
        Money::new(wire.currency_code, wire.units, wire.nanos)
    }
}

impl WireMoney {
    fn to_decimal(&self) -> Decimal {
        Decimal::from(self.units) + Decimal::new(i64::from(self.nanos), 9)
    }
}

/// Response body of `GET /developers/{id}/balance` and the team variant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperBalanceResponse {
    #[serde(default)]
    pub wallets: Vec<WireWallet>,
}

/// One per-currency wallet inside a developer balance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireWallet {
    pub balance: WireMoney,

    #[serde(default)]
    pub total_top_ups: Option<WireMoney>,

    #[serde(default)]
    pub total_usage: Option<WireMoney>,
}

impl DeveloperBalanceResponse {
    /// Convert into a freshly-stamped snapshot for `subject_id`
    pub fn into_snapshot(self, subject_id: &str) -> BalanceSnapshot {
        let balances = self
            .wallets
            .into_iter()
            .map(|wallet| PrepaidBalance {
                currency_code: wallet.balance.currency_code.clone(),
                available: wallet.balance.to_decimal(),
                top_ups: wallet
                    .total_top_ups
                    .map(|m| m.to_decimal())
                    .unwrap_or_default(),
                usage: wallet
                    .total_usage
                    .map(|m| m.to_decimal())
                    .unwrap_or_default(),
            })
            .collect();
        BalanceSnapshot::new(subject_id, balances)
    }
}

/// Response body of `GET /developers/{id}/subscriptions`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPurchasedPlansResponse {
    #[serde(default)]
    pub developer_subscriptions: Vec<WirePurchasedPlan>,
}

/// One rate plan subscription on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePurchasedPlan {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub apiproduct: String,

    /// Epoch milliseconds, string or number
    #[serde(default, deserialize_with = "deserialize_opt_i64_flex")]
    pub start_time: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_i64_flex")]
    pub end_time: Option<i64>,
}

impl From<WirePurchasedPlan> for PurchasedPlan {
    fn from(wire: WirePurchasedPlan) -> Self {
        PurchasedPlan {
            name: wire.name,
            api_product: wire.apiproduct,
            start_time: wire.start_time.and_then(millis_to_datetime),
            end_time: wire.end_time.and_then(millis_to_datetime),
        }
    }
}

/// Response body of `GET /apiproducts/-/rateplans`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRatePlansResponse {
    #[serde(default)]
    pub rate_plans: Vec<WireRatePlan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRatePlan {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub apiproduct: String,

    #[serde(default)]
    pub currency_code: String,

    #[serde(default)]
    pub state: RatePlanState,

    #[serde(default)]
    pub billing_period: BillingPeriod,

    #[serde(default)]
    pub setup_fee: Option<WireMoney>,

    #[serde(default)]
    pub fixed_recurring_fee: Option<WireMoney>,

    #[serde(default)]
    pub consumption_pricing_rates: Vec<WireRateRange>,

    #[serde(default)]
    pub revenue_share_rates: Vec<WireRevenueShareRate>,

    /// Epoch milliseconds, string or number
    #[serde(default, deserialize_with = "deserialize_opt_i64_flex")]
    pub start_time: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_opt_i64_flex")]
    pub end_time: Option<i64>,
}

/// A consumption pricing band on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRateRange {
    #[serde(default)]
    pub start: Option<Decimal>,

    #[serde(default)]
    pub end: Option<Decimal>,

    #[serde(default)]
    pub fee: WireMoney,
}

/// A revenue share band on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRevenueShareRate {
    #[serde(default)]
    pub start: Option<Decimal>,

    #[serde(default)]
    pub end: Option<Decimal>,

    #[serde(default)]
    pub share_percentage: Option<Decimal>,
}

impl From<WireRatePlan> for RatePlan {
    fn from(wire: WireRatePlan) -> Self {
        RatePlan {
            id: wire.name,
            display_name: wire.display_name,
            api_product: wire.apiproduct,
            currency_code: wire.currency_code.to_uppercase(),
            state: wire.state,
            billing_period: wire.billing_period,
            setup_fee: wire.setup_fee.map(Money::from),
            recurring_fee: wire.fixed_recurring_fee.map(Money::from),
            consumption_rates: wire
                .consumption_pricing_rates
                .into_iter()
                .map(|range| ConsumptionRate {
                    start: range.start,
                    end: range.end,
                    fee: range.fee.into(),
                })
                .collect(),
            revenue_share_rates: wire
                .revenue_share_rates
                .into_iter()
                .map(|rate| RevenueShareRate {
                    start: rate.start,
                    end: rate.end,
                    share_percentage: rate.share_percentage,
                })
                .collect(),
            start_time: wire.start_time.and_then(millis_to_datetime),
            end_time: wire.end_time.and_then(millis_to_datetime),
        }
    }
}

/// Response body of `GET /supportedCurrencies`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSupportedCurrenciesResponse {
    #[serde(default)]
    pub supported_currency: Vec<WireCurrency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCurrency {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub status: CurrencyStatus,

    #[serde(default)]
    pub minimum_topup_amount: Decimal,
}

impl From<WireCurrency> for SupportedCurrency {
    fn from(wire: WireCurrency) -> Self {
        SupportedCurrency {
            code: wire.name.to_uppercase(),
            display_name: wire.display_name,
            status: wire.status,
            minimum_top_up_amount: wire.minimum_topup_amount,
        }
    }
}

fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Deserialize an i64 from either a string or a number
fn deserialize_i64_flex<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct I64OrStringVisitor;

    impl<'de> Visitor<'de> for I64OrStringVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value as i64)
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value.parse::<i64>().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(I64OrStringVisitor)
}

fn deserialize_opt_i64_flex<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_i64_flex")] i64);

    let wrapper: Option<Wrapper> = Option::deserialize(deserializer)?;
    Ok(wrapper.map(|Wrapper(value)| value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wire_money_units_from_string_or_number() {
        let from_string: WireMoney =
            serde_json::from_str(r#"{"currencyCode":"USD","units":"5","nanos":250000000}"#)
                .unwrap();
        assert_eq!(from_string.to_decimal(), dec!(5.25));

        let from_number: WireMoney =
            serde_json::from_str(r#"{"currencyCode":"USD","units":5,"nanos":250000000}"#).unwrap();
        assert_eq!(from_number.to_decimal(), dec!(5.25));
    }

    #[test]
    fn test_balance_response_into_snapshot() {
        let json = r#"{
            "wallets": [
                {
                    "balance": {"currencyCode": "USD", "units": "42", "nanos": 500000000},
                    "totalTopUps": {"currencyCode": "USD", "units": "100"},
                    "totalUsage": {"currencyCode": "USD", "units": "57", "nanos": 500000000}
                },
                {
                    "balance": {"currencyCode": "EUR", "units": "-1", "nanos": -250000000}
                }
            ]
        }"#;
        let response: DeveloperBalanceResponse = serde_json::from_str(json).unwrap();
        let snapshot = response.into_snapshot("dev@example.com");

        assert_eq!(snapshot.subject_id, "dev@example.com");
        assert_eq!(snapshot.balances.len(), 2);

        let usd = snapshot.balance_for("USD").unwrap();
        assert_eq!(usd.available, dec!(42.5));
        assert_eq!(usd.top_ups, dec!(100));
        assert_eq!(usd.usage, dec!(57.5));

        let eur = snapshot.balance_for("EUR").unwrap();
        assert_eq!(eur.available, dec!(-1.25));
        assert!(eur.is_overdrawn());
        assert_eq!(eur.top_ups, dec!(0));
    }

    #[test]
    fn test_empty_balance_response() {
        let response: DeveloperBalanceResponse = serde_json::from_str("{}").unwrap();
        let snapshot = response.into_snapshot("dev@example.com");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_rate_plan_conversion() {
        let json = r#"{
            "ratePlans": [
                {
                    "name": "plan-1",
                    "displayName": "Gold",
                    "apiproduct": "weather",
                    "currencyCode": "usd",
                    "state": "PUBLISHED",
                    "billingPeriod": "MONTHLY",
                    "setupFee": {"currencyCode": "USD", "units": "10"},
                    "fixedRecurringFee": {"currencyCode": "USD", "units": "5"},
                    "consumptionPricingRates": [
                        {"start": 0, "end": 1000, "fee": {"currencyCode": "USD", "nanos": 20000000}}
                    ],
                    "revenueShareRates": [
                        {"start": 0, "sharePercentage": 17.5}
                    ],
                    "startTime": "1704067200000",
                    "endTime": 1735689600000
                }
            ]
        }"#;
        let response: ListRatePlansResponse = serde_json::from_str(json).unwrap();
        let plan: RatePlan = response.rate_plans.into_iter().next().unwrap().into();

        assert_eq!(plan.id, "plan-1");
        assert_eq!(plan.currency_code, "USD");
        assert_eq!(plan.state, RatePlanState::Published);
        assert_eq!(plan.setup_fee.as_ref().unwrap().units, 10);
        assert_eq!(plan.consumption_rates[0].fee.to_decimal(), dec!(0.02));
        assert_eq!(
            plan.revenue_share_rates[0].share_percentage,
            Some(dec!(17.5))
        );
        assert_eq!(
            plan.start_time.unwrap(),
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap()
        );
        assert!(plan.end_time.is_some());
    }

    #[test]
    fn test_sparse_rate_plan_uses_defaults() {
        let json = r#"{"name": "bare"}"#;
        let wire: WireRatePlan = serde_json::from_str(json).unwrap();
        let plan: RatePlan = wire.into();

        assert_eq!(plan.state, RatePlanState::Draft);
        assert!(plan.setup_fee.is_none());
        assert!(plan.start_time.is_none());
        assert!(plan.consumption_rates.is_empty());
    }

    #[test]
    fn test_purchased_plan_conversion() {
        let json = r#"{
            "developerSubscriptions": [
                {
                    "name": "sub-1",
                    "apiproduct": "weather",
                    "startTime": "1704067200000"
                },
                {
                    "name": "sub-0",
                    "apiproduct": "geocoding",
                    "startTime": 1672531200000,
                    "endTime": 1675209600000
                }
            ]
        }"#;
        let response: ListPurchasedPlansResponse = serde_json::from_str(json).unwrap();
        let plans: Vec<PurchasedPlan> = response
            .developer_subscriptions
            .into_iter()
            .map(Into::into)
            .collect();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].name, "sub-1");
        assert_eq!(plans[0].api_product, "weather");
        assert_eq!(
            plans[0].start_time.unwrap(),
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap()
        );
        assert!(plans[0].end_time.is_none());
        assert!(plans[1].end_time.is_some());
    }

    #[test]
    fn test_empty_subscription_list() {
        let response: ListPurchasedPlansResponse = serde_json::from_str("{}").unwrap();
        assert!(response.developer_subscriptions.is_empty());
    }

    #[test]
    fn test_currency_code_uppercased() {
        let json = r#"{
            "supportedCurrency": [
                {
                    "name": "usd",
                    "displayName": "United States Dollars",
                    "status": "ACTIVE",
                    "minimumTopupAmount": 11.0
                }
            ]
        }"#;
        let response: ListSupportedCurrenciesResponse = serde_json::from_str(json).unwrap();
        let currency: SupportedCurrency =
            response.supported_currency.into_iter().next().unwrap().into();

        assert_eq!(currency.code, "USD");
        assert!(currency.is_active());
        assert_eq!(currency.minimum_top_up_amount, dec!(11));
    }
}
