//! Rate plan handlers
//!
//! HTTP handlers for listing the rate plans a developer can purchase and
//! the plans they have already purchased.

use crate::dto::rate_plan::{PurchasedPlanResponse, RatePlanResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use m10n_auth::AuthenticatedUser;
use m10n_core::models::BillingSubject;
use m10n_core::traits::CatalogService;
use m10n_core::AppError;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// List the rate plans a developer can currently purchase
///
/// GET /api/v1/developers/{developer_id}/plans
#[instrument(skip(service, user))]
pub async fn list_purchasable_plans(
    service: web::Data<Arc<dyn CatalogService>>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let developer_id = path.into_inner();

    if !user.can_view_rate_plans(&developer_id) {
        warn!(
            caller = %user.developer_id,
            target = %developer_id,
            "Rate plan listing denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(developer_id = %developer_id, "Listing purchasable rate plans");

    let subject = BillingSubject::developer(developer_id);
    let plans = service.purchasable_plans(&subject).await?;

    let response_data: Vec<RatePlanResponse> = plans.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// List a developer's rate plan subscriptions
///
/// GET /api/v1/developers/{developer_id}/purchased-plans
#[instrument(skip(service, user))]
pub async fn list_purchased_plans(
    service: web::Data<Arc<dyn CatalogService>>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let developer_id = path.into_inner();

    if !user.can_view_rate_plans(&developer_id) {
        warn!(
            caller = %user.developer_id,
            target = %developer_id,
            "Purchased plan listing denied"
        );
        return Err(AppError::Forbidden);
    }

    debug!(developer_id = %developer_id, "Listing purchased plans");

    let plans = service.purchased_plans(&developer_id).await?;

    let response_data: Vec<PurchasedPlanResponse> = plans.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// Configure rate plan routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/developers/{developer_id}/plans")
            .route("", web::get().to(list_purchasable_plans)),
    )
    .service(
        web::scope("/developers/{developer_id}/purchased-plans")
            .route("", web::get().to(list_purchased_plans)),
    );
}
