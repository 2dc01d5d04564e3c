//! HTTP interface for the water billing service.
//!
//! Exposes the ledger operations as a JSON API under `/api/v1` and serves
//! stored receipt files under `/uploads`. All routes share one [`AppState`]
//! carrying the domain service and the loaded configuration.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod uploads;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use domain_ledger::service::LedgerService;

use crate::config::ApiConfig;

/// Receipt uploads above this size are rejected before buffering.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LedgerService>,
    pub config: ApiConfig,
}

/// Build the application router.
///
/// Health probes stay outside the `/api/v1` prefix so infrastructure can
/// reach them without knowing the API version.
pub fn create_router(service: Arc<LedgerService>, config: ApiConfig) -> Router {
    let uploads_dir = config.uploads_dir.clone();
    let state = AppState { service, config };

    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::customers::create_customer).get(handlers::customers::list_customers),
        )
        .route("/:id", get(handlers::customers::get_customer))
        .route("/:id/meter", get(handlers::customers::meter_for_customer))
        .route("/:id/invoices", get(handlers::customers::customer_invoices))
        .route("/:id/payments", get(handlers::customers::customer_payments));

    let meter_routes = Router::new()
        .route(
            "/",
            post(handlers::meters::create_meter).get(handlers::meters::list_meters),
        )
        .route(
            "/:id",
            put(handlers::meters::update_meter).delete(handlers::meters::delete_meter),
        )
        .route("/:id/reset", put(handlers::meters::reset_meter))
        .route("/:id/readings", get(handlers::meters::meter_readings));

    let expense_routes = Router::new()
        .route(
            "/",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .route(
            "/:id",
            put(handlers::expenses::update_expense).delete(handlers::expenses::delete_expense),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/meters", meter_routes)
        .nest("/expenses", expense_routes)
        .route("/readings", post(handlers::billing::record_reading))
        .route("/payments", post(handlers::billing::record_payment))
        .route("/dashboard", get(handlers::reports::dashboard))
        .route("/reports/customers", get(handlers::reports::customer_report))
        .route(
            "/settings/unit-price",
            get(handlers::settings::get_unit_price).put(handlers::settings::update_unit_price),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .nest("/api/v1", api_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
