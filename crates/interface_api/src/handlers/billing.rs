//! Billing handlers for readings and payments.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use core_kernel::{CustomerId, MeterId, Money};

use crate::dto::billing::{
    PaymentOutcomeResponse, ReadingOutcomeResponse, RecordPaymentRequest, RecordReadingRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Record a monthly meter reading and bill the consumption.
pub async fn record_reading(
    State(state): State<AppState>,
    Json(request): Json<RecordReadingRequest>,
) -> Result<(StatusCode, Json<ReadingOutcomeResponse>), ApiError> {
    request.validate()?;

    let outcome = state
        .service
        .record_reading(
            MeterId::from(request.meter_id),
            request.current_reading,
            request.note,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ReadingOutcomeResponse::from(outcome))))
}

/// Record a payment into a customer's wallet.
pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentOutcomeResponse>), ApiError> {
    let outcome = state
        .service
        .record_payment(CustomerId::from(request.customer_id), Money::new(request.amount))
        .await?;

    Ok((StatusCode::CREATED, Json(PaymentOutcomeResponse::from(outcome))))
}
