//! Rate plan DTOs

use chrono::{DateTime, Utc};
use m10n_core::models::{Money, PurchasedPlan, RatePlan};
use m10n_services::pricing;
use serde::Serialize;

/// A purchasable rate plan as listed to developers
#[derive(Debug, Clone, Serialize)]
pub struct RatePlanResponse {
    pub id: String,
    pub display_name: String,
    pub api_product: String,
    pub currency_code: String,
    pub state: String,
    pub billing_period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_fee: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_fee: Option<Money>,
    /// Pre-rendered consumption pricing bands, one line per band
    pub consumption_rates: Vec<String>,
    /// Pre-rendered revenue share bands, one line per band
    pub revenue_share_rates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl From<RatePlan> for RatePlanResponse {
    fn from(plan: RatePlan) -> Self {
        Self {
            consumption_rates: pricing::consumption_rate_summary(&plan.consumption_rates),
            revenue_share_rates: pricing::revenue_share_summary(&plan.revenue_share_rates),
            id: plan.id,
            display_name: plan.display_name,
            api_product: plan.api_product,
            currency_code: plan.currency_code,
            state: plan.state.to_string(),
            billing_period: plan.billing_period.to_string(),
            setup_fee: plan.setup_fee,
            recurring_fee: plan.recurring_fee,
            start_time: plan.start_time,
            end_time: plan.end_time,
        }
    }
}

/// A rate plan subscription as listed to developers
#[derive(Debug, Clone, Serialize)]
pub struct PurchasedPlanResponse {
    pub name: String,
    pub api_product: String,
    /// `Active` while the subscription runs, `Ended` afterwards
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl From<PurchasedPlan> for PurchasedPlanResponse {
    fn from(plan: PurchasedPlan) -> Self {
        let status = if plan.is_active(Utc::now()) {
            "Active"
        } else {
            "Ended"
        };
        Self {
            status: status.to_string(),
            name: plan.name,
            api_product: plan.api_product,
            start_time: plan.start_time,
            end_time: plan.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use m10n_core::models::{RatePlanState, RevenueShareRate};
    use rust_decimal_macros::dec;

    #[test]
    fn test_bands_rendered_as_labels() {
        let plan = RatePlan {
            display_name: "Gold".to_string(),
            state: RatePlanState::Published,
            revenue_share_rates: vec![RevenueShareRate {
                start: None,
                end: Some(dec!(1000)),
                share_percentage: Some(dec!(12)),
            }],
            ..Default::default()
        };

        let response = RatePlanResponse::from(plan);
        assert_eq!(response.state, "PUBLISHED");
        assert_eq!(
            response.revenue_share_rates,
            vec!["Greater than 0 up to 1000: 12%"]
        );
        assert!(response.consumption_rates.is_empty());
    }

    #[test]
    fn test_purchased_plan_status_derived() {
        let running = PurchasedPlanResponse::from(PurchasedPlan {
            name: "sub-1".to_string(),
            api_product: "weather".to_string(),
            start_time: Some(Utc::now() - Duration::days(7)),
            end_time: None,
        });
        assert_eq!(running.status, "Active");

        let ended = PurchasedPlanResponse::from(PurchasedPlan {
            end_time: Some(Utc::now() - Duration::days(1)),
            ..Default::default()
        });
        assert_eq!(ended.status, "Ended");
    }
}
