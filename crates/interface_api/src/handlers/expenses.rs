//! Expense handlers.
//!
//! Expense writes arrive as `multipart/form-data` so a receipt image can ride
//! along with the title and amount in a single request.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use core_kernel::ExpenseId;

use crate::dto::expense::{ExpenseForm, ExpenseResponse};
use crate::error::ApiError;
use crate::AppState;

/// Record an operating expense, optionally with a receipt file.
pub async fn create_expense(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    let form = ExpenseForm::from_multipart(multipart).await?;

    let expense = state
        .service
        .create_expense(form.title, form.amount, form.receipt)
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

/// Update an expense. A new receipt replaces the old file; omitting the
/// file part keeps the existing receipt.
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let form = ExpenseForm::from_multipart(multipart).await?;

    let expense = state
        .service
        .update_expense(ExpenseId::from(id), form.title, form.amount, form.receipt)
        .await?;

    Ok(Json(ExpenseResponse::from(expense)))
}

/// Delete an expense and its stored receipt.
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_expense(ExpenseId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all recorded expenses, newest first.
pub async fn list_expenses(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let expenses = state.service.list_expenses().await?;
    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}
