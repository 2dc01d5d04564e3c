//! Meter handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{CustomerId, MeterId};
use domain_ledger::ports::NewMeter;

use crate::dto::billing::ReadingResponse;
use crate::dto::meter::{
    BaselineAdjustmentResponse, CreateMeterRequest, MeterResponse, UpdateMeterRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Install a meter for a customer.
pub async fn create_meter(
    State(state): State<AppState>,
    Json(request): Json<CreateMeterRequest>,
) -> Result<(StatusCode, Json<MeterResponse>), ApiError> {
    request.validate()?;

    let meter = state
        .service
        .install_meter(NewMeter {
            serial_number: request.serial_number,
            customer_id: CustomerId::from(request.customer_id),
            initial_reading: request.initial_reading,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MeterResponse::from(meter))))
}

/// List all installed meters, newest first.
pub async fn list_meters(
    State(state): State<AppState>,
) -> Result<Json<Vec<MeterResponse>>, ApiError> {
    let meters = state.service.list_meters().await?;
    Ok(Json(meters.into_iter().map(MeterResponse::from).collect()))
}

/// Correct a meter's baseline counter.
///
/// The difference against the old baseline is billed (or refunded) at the
/// current unit price without creating a reading row.
pub async fn update_meter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMeterRequest>,
) -> Result<Json<BaselineAdjustmentResponse>, ApiError> {
    let outcome = state
        .service
        .adjust_meter_baseline(MeterId::from(id), request.last_reading)
        .await?;
    Ok(Json(BaselineAdjustmentResponse::from(outcome)))
}

/// Reset a meter's counter to zero, e.g. after a physical replacement.
pub async fn reset_meter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.reset_meter(MeterId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a meter. Readings and invoices already recorded survive.
pub async fn delete_meter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_meter(MeterId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the readings recorded against a meter, newest first.
pub async fn meter_readings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReadingResponse>>, ApiError> {
    let readings = state.service.readings_for_meter(MeterId::from(id)).await?;
    Ok(Json(readings.into_iter().map(ReadingResponse::from).collect()))
}
