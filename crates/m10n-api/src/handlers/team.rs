//! Team monetization handlers
//!
//! Team members can view and refresh their team's prepaid balances and
//! browse the plans the team can purchase. The same services back these
//! routes as the developer routes; only the subject carries team context.

use crate::dto::balance::{BalanceQuery, BalanceSnapshotResponse};
use crate::dto::rate_plan::RatePlanResponse;
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use m10n_auth::AuthenticatedUser;
use m10n_core::models::BillingSubject;
use m10n_core::traits::{BalanceService, CatalogService};
use m10n_core::AppError;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Read a team's prepaid balances
///
/// GET /api/v1/teams/{team}/balances
#[instrument(skip(service, user))]
pub async fn get_team_balances(
    service: web::Data<Arc<dyn BalanceService>>,
    path: web::Path<String>,
    query: web::Query<BalanceQuery>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let team = path.into_inner();

    query.validate().map_err(|e| {
        warn!("Balance query validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    if !user.can_view_team_balances(&team) {
        warn!(
            caller = %user.developer_id,
            team = %team,
            "Team balance view denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(team = %team, "Reading team prepaid balances");

    let subject = BillingSubject::for_team(user.developer_id.clone(), team);
    let snapshot = service.get_balances(&subject, false).await?;

    let mut response = BalanceSnapshotResponse::from(snapshot);
    if let Some(currency) = &query.currency {
        response
            .balances
            .retain(|b| b.currency_code.eq_ignore_ascii_case(currency));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Force-refresh a team's prepaid balances
///
/// POST /api/v1/teams/{team}/balances/refresh
#[instrument(skip(service, user))]
pub async fn refresh_team_balances(
    service: web::Data<Arc<dyn BalanceService>>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let team = path.into_inner();

    if !user.can_refresh_team_balances(&team) {
        warn!(
            caller = %user.developer_id,
            team = %team,
            "Team balance refresh denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(team = %team, "Force-refreshing team prepaid balances");

    let subject = BillingSubject::for_team(user.developer_id.clone(), team);
    let snapshot = service.get_balances(&subject, true).await?;

    let response = BalanceSnapshotResponse::from(snapshot);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, "Balances refreshed.")))
}

/// List the rate plans a team can currently purchase
///
/// GET /api/v1/teams/{team}/plans
#[instrument(skip(service, user))]
pub async fn list_team_plans(
    service: web::Data<Arc<dyn CatalogService>>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let team = path.into_inner();

    if !user.can_view_team_rate_plans(&team) {
        warn!(
            caller = %user.developer_id,
            team = %team,
            "Team rate plan listing denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(team = %team, "Listing team purchasable rate plans");

    let subject = BillingSubject::for_team(user.developer_id.clone(), team);
    let plans = service.purchasable_plans(&subject).await?;

    let response_data: Vec<RatePlanResponse> = plans.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// Configure team routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teams/{team}")
            .route("/balances", web::get().to(get_team_balances))
            .route("/balances/refresh", web::post().to(refresh_team_balances))
            .route("/plans", web::get().to(list_team_plans)),
    );
}
