//! Purchased plan model
//!
//! A purchased plan is a developer's active or past subscription to a rate
//! plan. The billing API is the system of record; we only list them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rate plan subscription of a developer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PurchasedPlan {
    /// Upstream name of the subscription
    pub name: String,

    /// The API product the purchased plan covers
    pub api_product: String,

    pub start_time: Option<DateTime<Utc>>,

    /// Absent while the subscription is still running
    pub end_time: Option<DateTime<Utc>>,
}

impl PurchasedPlan {
    /// Whether the subscription is still running at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.end_time {
            Some(end) => end > now,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_open_ended_subscription_is_active() {
        let plan = PurchasedPlan {
            name: "sub-1".to_string(),
            api_product: "weather".to_string(),
            start_time: Some(Utc::now() - Duration::days(30)),
            end_time: None,
        };
        assert!(plan.is_active(Utc::now()));
    }

    #[test]
    fn test_ended_subscription_is_inactive() {
        let now = Utc::now();
        let plan = PurchasedPlan {
            end_time: Some(now - Duration::days(1)),
            ..Default::default()
        };
        assert!(!plan.is_active(now));

        let running = PurchasedPlan {
            end_time: Some(now + Duration::days(1)),
            ..Default::default()
        };
        assert!(running.is_active(now));
    }
}
