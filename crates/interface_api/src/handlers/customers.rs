//! Customer handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use core_kernel::CustomerId;
use domain_ledger::ports::NewCustomer;

use crate::dto::billing::{InvoiceResponse, PaymentResponse};
use crate::dto::customer::{CreateCustomerRequest, CustomerResponse};
use crate::dto::meter::MeterLookupResponse;
use crate::error::ApiError;
use crate::AppState;

/// Register a new customer.
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    request.validate()?;

    let customer = state
        .service
        .register_customer(NewCustomer {
            full_name: request.full_name,
            phone: request.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// List all customers, newest first.
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state.service.list_customers().await?;
    Ok(Json(customers.into_iter().map(CustomerResponse::from).collect()))
}

/// Fetch a single customer.
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.service.get_customer(CustomerId::from(id)).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// Look up the meter installed for a customer.
///
/// A customer without a meter is a normal state, not an error, so the
/// response carries an explicit `no_meter` marker instead of a 404.
pub async fn meter_for_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MeterLookupResponse>, ApiError> {
    let meter = state.service.meter_for_customer(CustomerId::from(id)).await?;
    Ok(Json(MeterLookupResponse::from(meter)))
}

/// List the invoices billed to a customer, newest first.
pub async fn customer_invoices(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.service.invoices_for_customer(CustomerId::from(id)).await?;
    Ok(Json(invoices.into_iter().map(InvoiceResponse::from).collect()))
}

/// List the payments recorded for a customer, newest first.
pub async fn customer_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let payments = state.service.payments_for_customer(CustomerId::from(id)).await?;
    Ok(Json(payments.into_iter().map(PaymentResponse::from).collect()))
}
