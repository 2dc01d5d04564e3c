//! Settings handlers.

use axum::extract::State;
use axum::Json;

use core_kernel::Money;

use crate::dto::settings::{UnitPriceResponse, UpdateUnitPriceRequest};
use crate::error::ApiError;
use crate::AppState;

/// Fetch the unit price currently used to bill consumption.
pub async fn get_unit_price(
    State(state): State<AppState>,
) -> Result<Json<UnitPriceResponse>, ApiError> {
    let price = state.service.unit_price().await?;
    Ok(Json(UnitPriceResponse::from(price)))
}

/// Change the unit price. Takes effect for readings billed afterwards;
/// already-issued invoices keep their amounts.
pub async fn update_unit_price(
    State(state): State<AppState>,
    Json(request): Json<UpdateUnitPriceRequest>,
) -> Result<Json<UnitPriceResponse>, ApiError> {
    let price = state
        .service
        .set_unit_price(Money::new(request.unit_price))
        .await?;
    Ok(Json(UnitPriceResponse::from(price)))
}
