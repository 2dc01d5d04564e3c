//! Reporting handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::report::{CustomerReportEntry, DashboardResponse};
use crate::error::ApiError;
use crate::AppState;

/// Operator dashboard: income, expenses, cash box and outstanding debt.
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let summary = state.service.dashboard_summary().await?;
    Ok(Json(DashboardResponse::from(summary)))
}

/// Per-customer consumption report for metered customers.
pub async fn customer_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerReportEntry>>, ApiError> {
    let rows = state.service.customer_report().await?;
    Ok(Json(rows.into_iter().map(CustomerReportEntry::from).collect()))
}
