//! Upstream billing API client for m10n-portal
//!
//! [`ApigeeClient`] implements [`BillingClient`] against the management API
//! of an Apigee organization. It performs no caching and no retries; the
//! service layer decides what to cache and callers decide whether a
//! transient failure is worth another attempt.

pub mod wire;

use m10n_core::config::ApigeeConfig;
use m10n_core::error::AppError;
use m10n_core::models::{
    BalanceSnapshot, BillingSubject, PurchasedPlan, RatePlan, SupportedCurrency,
};
use m10n_core::traits::BillingClient;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::wire::{
    DeveloperBalanceResponse, ListPurchasedPlansResponse, ListRatePlansResponse,
    ListSupportedCurrenciesResponse,
};

/// HTTP client for the Apigee management API
///
/// All requests are scoped to one organization and authenticated with a
/// bearer token.
#[derive(Debug, Clone)]
pub struct ApigeeClient {
    http: reqwest::Client,
    base_url: String,
    organization: String,
    access_token: String,
}

impl ApigeeClient {
    pub fn new(config: &ApigeeConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            organization: config.organization.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/organizations/{}{}",
            self.base_url, self.organization, path
        )
    }

    /// Balance endpoint for a subject; teams are companies upstream
    fn balance_path(subject: &BillingSubject) -> String {
        match &subject.team {
            Some(team) => format!("/companies/{}/balance", team),
            None => format!("/developers/{}/balance", subject.developer_id),
        }
    }

    /// GET a JSON resource under the organization
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.url(path);
        debug!(%url, "Requesting upstream resource");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| map_request_error(path, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status(path, status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Serialization(format!("Invalid response for {}: {}", path, e)))
    }
}

/// Map a transport-level failure onto an [`AppError`]
fn map_request_error(path: &str, err: &reqwest::Error) -> AppError {
    if err.is_timeout() || err.is_connect() {
        AppError::Transient(format!("Upstream unreachable for {}: {}", path, err))
    } else {
        AppError::Internal(format!("Request for {} failed: {}", path, err))
    }
}

/// Map a non-success upstream status onto an [`AppError`]
///
/// A 404 means the developer has no billing relationship, not that the
/// route is wrong, so it maps to `NotEntitled` rather than a generic
/// not-found.
fn map_status(path: &str, status: StatusCode) -> AppError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
            AppError::NotEntitled(format!("Upstream returned {} for {}", status, path))
        }
        StatusCode::UNAUTHORIZED => {
            AppError::Unauthorized("Upstream rejected the access token".to_string())
        }
        s if s.is_server_error() => {
            AppError::Transient(format!("Upstream returned {} for {}", status, path))
        }
        _ => AppError::Internal(format!("Upstream returned {} for {}", status, path)),
    }
}

#[async_trait]
impl BillingClient for ApigeeClient {
    #[instrument(skip(self))]
    async fn fetch_prepaid_balances(
        &self,
        subject: &BillingSubject,
    ) -> Result<BalanceSnapshot, AppError> {
        let path = Self::balance_path(subject);
        let response: DeveloperBalanceResponse = self.get_json(&path).await?;
        Ok(response.into_snapshot(subject.billing_id()))
    }

    #[instrument(skip(self))]
    async fn list_rate_plans(&self) -> Result<Vec<RatePlan>, AppError> {
        let response: ListRatePlansResponse =
            self.get_json("/apiproducts/-/rateplans?expand=true").await?;
        Ok(response.rate_plans.into_iter().map(RatePlan::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_purchased_plans(
        &self,
        developer_id: &str,
    ) -> Result<Vec<PurchasedPlan>, AppError> {
        let path = format!("/developers/{}/subscriptions", developer_id);
        let response: ListPurchasedPlansResponse = self.get_json(&path).await?;
        Ok(response
            .developer_subscriptions
            .into_iter()
            .map(PurchasedPlan::from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_supported_currencies(&self) -> Result<Vec<SupportedCurrency>, AppError> {
        let response: ListSupportedCurrenciesResponse =
            self.get_json("/supportedCurrencies").await?;
        Ok(response
            .supported_currency
            .into_iter()
            .map(SupportedCurrency::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApigeeClient {
        let config = ApigeeConfig {
            base_url: "https://apigee.googleapis.com/v1/".to_string(),
            organization: "acme".to_string(),
            access_token: "token".to_string(),
            timeout_secs: 5,
        };
        ApigeeClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let client = client();
        assert_eq!(
            client.url("/developers/dev@example.com/balance"),
            "https://apigee.googleapis.com/v1/organizations/acme/developers/dev@example.com/balance"
        );
    }

    #[test]
    fn test_balance_path_selected_by_team_context() {
        assert_eq!(
            ApigeeClient::balance_path(&BillingSubject::developer("dev@example.com")),
            "/developers/dev@example.com/balance"
        );
        assert_eq!(
            ApigeeClient::balance_path(&BillingSubject::for_team("dev@example.com", "acme")),
            "/companies/acme/balance"
        );
    }

    #[test]
    fn test_map_status_not_entitled() {
        assert!(matches!(
            map_status("/developers/x/balance", StatusCode::NOT_FOUND),
            AppError::NotEntitled(_)
        ));
        assert!(matches!(
            map_status("/developers/x/balance", StatusCode::FORBIDDEN),
            AppError::NotEntitled(_)
        ));
    }

    #[test]
    fn test_map_status_transient_on_server_errors() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let err = map_status("/supportedCurrencies", status);
            assert!(err.is_transient(), "{} should be transient", status);
        }
    }

    #[test]
    fn test_map_status_unauthorized() {
        assert!(matches!(
            map_status("/supportedCurrencies", StatusCode::UNAUTHORIZED),
            AppError::Unauthorized(_)
        ));
    }
}
