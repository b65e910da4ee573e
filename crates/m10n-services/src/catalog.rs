//! Rate plan catalog service
//!
//! Lists the rate plans a developer can currently purchase. The full
//! catalog is cached organization-wide; purchasability is evaluated per
//! request against the current time, so a plan whose window closes while
//! the catalog sits in cache disappears from listings immediately.

use m10n_cache::keys::{rate_plan_catalog_key, CATALOG_TTL_SECS};
use m10n_core::{
    models::{BillingSubject, PurchasedPlan, RatePlan},
    traits::{BillingClient, CacheStore, CatalogService},
    AppError,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Catalog service implementation with caching
pub struct CatalogGate<B: BillingClient, S: CacheStore> {
    client: Arc<B>,
    store: Arc<S>,
}

impl<B: BillingClient, S: CacheStore> CatalogGate<B, S> {
    pub fn new(client: Arc<B>, store: Arc<S>) -> Self {
        Self { client, store }
    }

    /// Get the full catalog, from cache when fresh
    async fn full_catalog(&self) -> Result<Vec<RatePlan>, AppError> {
        let key = rate_plan_catalog_key();

        match self.store.get::<Vec<RatePlan>>(&key).await {
            Ok(Some(plans)) => {
                debug!("Rate plan catalog cache HIT");
                return Ok(plans);
            }
            Ok(None) => debug!("Rate plan catalog cache MISS"),
            Err(e) => warn!("Cache error for rate plan catalog: {}", e),
        }

        let plans = self.client.list_rate_plans().await?;

        if let Err(e) = self.store.set(&key, &plans, CATALOG_TTL_SECS).await {
            warn!("Failed to cache rate plan catalog: {}", e);
        }

        Ok(plans)
    }
}

/// Reject malformed subjects before any upstream call
fn validate_subject(subject: &BillingSubject) -> Result<(), AppError> {
    match &subject.team {
        Some(team) if team.is_empty() => {
            Err(AppError::Validation("Empty team name".to_string()))
        }
        // Developer ids are email addresses upstream
        None if !subject.developer_id.contains('@') => Err(AppError::Validation(format!(
            "Invalid developer id: {}",
            subject.developer_id
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
impl<B: BillingClient, S: CacheStore> CatalogService for CatalogGate<B, S> {
    #[instrument(skip(self))]
    async fn purchasable_plans(&self, subject: &BillingSubject) -> Result<Vec<RatePlan>, AppError> {
        validate_subject(subject)?;

        let now = Utc::now();
        let mut plans: Vec<RatePlan> = self
            .full_catalog()
            .await?
            .into_iter()
            .filter(|plan| plan.is_purchasable_at(now))
            .collect();

        plans.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        Ok(plans)
    }

    #[instrument(skip(self))]
    async fn purchased_plans(&self, developer_id: &str) -> Result<Vec<PurchasedPlan>, AppError> {
        if !developer_id.contains('@') {
            return Err(AppError::Validation(format!(
                "Invalid developer id: {}",
                developer_id
            )));
        }

        // Subscriptions are per-developer and change on purchase, so they
        // are fetched fresh rather than cached
        let mut plans = self.client.list_purchased_plans(developer_id).await?;
        plans.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        Ok(plans)
    }
}
