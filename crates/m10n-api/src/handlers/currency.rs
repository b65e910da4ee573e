//! Supported currency handlers
//!
//! HTTP handlers for listing supported currencies and planning add-credit
//! products. Planning is an administrative concern and requires the
//! portal administration permission.

use crate::dto::currency::{AddCreditProductResponse, SupportedCurrencyResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use m10n_auth::{AuthenticatedUser, PortalAdmin};
use m10n_core::traits::CurrencyService;
use m10n_core::AppError;
use std::sync::Arc;
use tracing::{debug, instrument};

/// List the currencies the billing organization supports
///
/// GET /api/v1/currencies
#[instrument(skip(service, _user))]
pub async fn list_currencies(
    service: web::Data<Arc<dyn CurrencyService>>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    debug!("Listing supported currencies");

    let currencies = service.supported_currencies().await?;

    let response_data: Vec<SupportedCurrencyResponse> =
        currencies.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// Plan the add-credit products still missing for importable currencies
///
/// GET /api/v1/currencies/add-credit-products
#[instrument(skip(service, admin))]
pub async fn list_add_credit_products(
    service: web::Data<Arc<dyn CurrencyService>>,
    admin: PortalAdmin,
) -> Result<HttpResponse, AppError> {
    debug!(admin = %admin.developer_id, "Planning add-credit products");

    let products = service.plan_add_credit_products().await?;

    let response_data: Vec<AddCreditProductResponse> =
        products.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// Configure currency routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/currencies")
            .route("", web::get().to(list_currencies))
            .route("/add-credit-products", web::get().to(list_add_credit_products)),
    );
}
