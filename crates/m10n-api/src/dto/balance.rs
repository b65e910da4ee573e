//! Prepaid balance DTOs

use chrono::{DateTime, Utc};
use m10n_core::models::{BalanceSnapshot, PrepaidBalance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One per-currency balance in a response
#[derive(Debug, Clone, Serialize)]
pub struct PrepaidBalanceDto {
    pub currency_code: String,
    pub available: Decimal,
    pub top_ups: Decimal,
    pub usage: Decimal,
    /// Whether usage has exceeded the credit added
    pub overdrawn: bool,
}

impl From<PrepaidBalance> for PrepaidBalanceDto {
    fn from(balance: PrepaidBalance) -> Self {
        let overdrawn = balance.is_overdrawn();
        Self {
            currency_code: balance.currency_code,
            available: balance.available,
            top_ups: balance.top_ups,
            usage: balance.usage,
            overdrawn,
        }
    }
}

/// Response body for balance reads and refreshes
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSnapshotResponse {
    /// Developer email or team name the balances belong to
    pub subject_id: String,
    pub balances: Vec<PrepaidBalanceDto>,
    /// When the snapshot was fetched upstream; cached responses keep the
    /// original fetch time
    pub fetched_at: DateTime<Utc>,
}

impl From<BalanceSnapshot> for BalanceSnapshotResponse {
    fn from(snapshot: BalanceSnapshot) -> Self {
        Self {
            subject_id: snapshot.subject_id,
            balances: snapshot.balances.into_iter().map(Into::into).collect(),
            fetched_at: snapshot.fetched_at,
        }
    }
}

/// Query parameters for balance reads
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BalanceQuery {
    /// Restrict the response to one currency (ISO 4217 code)
    #[validate(length(min = 3, max = 3))]
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_overdrawn_flag_derived() {
        let dto = PrepaidBalanceDto::from(PrepaidBalance {
            currency_code: "EUR".to_string(),
            available: dec!(-0.5),
            top_ups: dec!(10),
            usage: dec!(10.5),
        });
        assert!(dto.overdrawn);
    }

    #[test]
    fn test_currency_query_validation() {
        let valid = BalanceQuery {
            currency: Some("USD".to_string()),
        };
        assert!(valid.validate().is_ok());

        let invalid = BalanceQuery {
            currency: Some("US".to_string()),
        };
        assert!(invalid.validate().is_err());

        let absent = BalanceQuery { currency: None };
        assert!(absent.validate().is_ok());
    }
}
