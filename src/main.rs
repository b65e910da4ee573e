//! m10n-portal server
//!
//! Monetization portal backend: exposes developer and team prepaid
//! balances, the rate plan catalog, and supported currency data from an
//! Apigee organization, with per-resource cache gating in front of the
//! management API.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use m10n_api::handlers::{
    configure_balances, configure_currencies, configure_rate_plans, configure_teams,
};
use m10n_auth::JwtService;
use m10n_cache::{CacheBackend, MemoryStore, RedisStore};
use m10n_client::ApigeeClient;
use m10n_core::config::AppConfig;
use m10n_core::traits::{BalanceService, CatalogService, CurrencyService};
use m10n_services::{BalanceGate, CatalogGate, CurrencyGate};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "m10n-portal",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            // Prepaid balance endpoints
            .configure(configure_balances)
            // Rate plan endpoints
            .configure(configure_rate_plans)
            // Team monetization endpoints
            .configure(configure_teams)
            // Currency and add-credit endpoints
            .configure(configure_currencies),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "m10n_portal={},m10n_api={},m10n_services={},m10n_client={},actix_web=info",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting m10n-portal v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().expect("Failed to load configuration");

    let billing_client =
        Arc::new(ApigeeClient::new(&config.apigee).expect("Failed to build billing client"));
    info!(
        "Billing client configured for organization {}",
        config.apigee.organization
    );

    // Cache backend: Redis when configured, in-process otherwise
    let store = match &config.redis.url {
        Some(url) => {
            let redis = RedisStore::new(url)
                .await
                .expect("Failed to connect to Redis");
            info!("Using Redis cache store");
            Arc::new(CacheBackend::Redis(redis))
        }
        None => {
            info!("No Redis URL configured, using in-process cache store");
            Arc::new(CacheBackend::Memory(MemoryStore::default()))
        }
    };

    if config.balance.cache_ttl_secs == 0 {
        info!("Balance caching disabled (TTL is 0)");
    } else {
        info!(
            "Balance snapshots cached for {} seconds",
            config.balance.cache_ttl_secs
        );
    }

    // Services, type-erased for handler injection
    let balance_service: Arc<dyn BalanceService> = Arc::new(BalanceGate::new(
        billing_client.clone(),
        store.clone(),
        config.balance.cache_ttl_secs,
    ));
    let catalog_service: Arc<dyn CatalogService> =
        Arc::new(CatalogGate::new(billing_client.clone(), store.clone()));
    let currency_service: Arc<dyn CurrencyService> = Arc::new(CurrencyGate::new(
        billing_client.clone(),
        store.clone(),
        config.add_credit.configured_products.clone(),
    ));

    let jwt_service = Arc::new(JwtService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expiration_secs,
    ));
    info!(
        "JWT service configured with {} second token expiration",
        config.auth.jwt_expiration_secs
    );

    let cors_origins = config.server.cors_origins.clone();
    let workers = config.server.workers;
    let bind_addr = config.server_addr();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        // Configure CORS - clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::COOKIE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(balance_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(currency_service.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message
                    })),
                )
                .into()
            }))
            // Middleware
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
