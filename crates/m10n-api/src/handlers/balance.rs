//! Prepaid balance handlers
//!
//! HTTP handlers for reading and force-refreshing a developer's prepaid
//! balances. Reads are served through the balance cache; the refresh
//! endpoint drops the cached snapshot and fetches a fresh one.

use crate::dto::balance::{BalanceQuery, BalanceSnapshotResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use m10n_auth::AuthenticatedUser;
use m10n_core::models::BillingSubject;
use m10n_core::traits::BalanceService;
use m10n_core::AppError;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Read a developer's prepaid balances
///
/// GET /api/v1/developers/{developer_id}/balances
#[instrument(skip(service, user))]
pub async fn get_balances(
    service: web::Data<Arc<dyn BalanceService>>,
    path: web::Path<String>,
    query: web::Query<BalanceQuery>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let developer_id = path.into_inner();

    query.validate().map_err(|e| {
        warn!("Balance query validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    if !user.can_view_balances(&developer_id) {
        warn!(
            caller = %user.developer_id,
            target = %developer_id,
            "Balance view denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(developer_id = %developer_id, "Reading prepaid balances");

    let subject = BillingSubject::developer(developer_id);
    let snapshot = service.get_balances(&subject, false).await?;

    let mut response = BalanceSnapshotResponse::from(snapshot);
    if let Some(currency) = &query.currency {
        response
            .balances
            .retain(|b| b.currency_code.eq_ignore_ascii_case(currency));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Force-refresh a developer's prepaid balances
///
/// POST /api/v1/developers/{developer_id}/balances/refresh
#[instrument(skip(service, user))]
pub async fn refresh_balances(
    service: web::Data<Arc<dyn BalanceService>>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let developer_id = path.into_inner();

    if !user.can_refresh_balances(&developer_id) {
        warn!(
            caller = %user.developer_id,
            target = %developer_id,
            "Balance refresh denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(developer_id = %developer_id, "Force-refreshing prepaid balances");

    let subject = BillingSubject::developer(developer_id);
    let snapshot = service.get_balances(&subject, true).await?;

    let response = BalanceSnapshotResponse::from(snapshot);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, "Balances refreshed.")))
}

/// Configure balance routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/developers/{developer_id}/balances")
            .route("", web::get().to(get_balances))
            .route("/refresh", web::post().to(refresh_balances)),
    );
}
