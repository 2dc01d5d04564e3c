//! Expense DTOs and multipart form parsing
//!
//! Expenses arrive as multipart forms so a receipt image can ride along
//! with the fields: `title` (text), `amount` (decimal text), and an
//! optional `file` part.

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use core_kernel::Money;
use domain_ledger::{Expense, ReceiptUpload};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ApiError;

/// Parsed expense form, shared by create and update
#[derive(Debug)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: Money,
    pub receipt: Option<ReceiptUpload>,
}

impl ExpenseForm {
    /// Reads the multipart stream into a validated form.
    ///
    /// Missing or malformed `title`/`amount` fields are shape errors (422).
    /// A `file` part without a name and without bytes is how browsers submit
    /// an empty file input; it counts as "no receipt".
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut title: Option<String> = None;
        let mut amount_raw: Option<String> = None;
        let mut receipt: Option<ReceiptUpload> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| ApiError::BadRequest(format!("malformed multipart body: {err}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("title") => {
                    title = Some(read_text(field, "title").await?);
                }
                Some("amount") => {
                    amount_raw = Some(read_text(field, "amount").await?);
                }
                Some("file") => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|err| {
                        ApiError::BadRequest(format!("could not read file part: {err}"))
                    })?;
                    if file_name.is_none() && bytes.is_empty() {
                        continue;
                    }
                    receipt = Some(ReceiptUpload {
                        file_name: file_name.unwrap_or_else(|| "receipt".to_string()),
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {}
            }
        }

        let mut details = Vec::new();

        let title = match title {
            Some(value) if !value.trim().is_empty() => Some(value),
            Some(_) => {
                details.push("title: must not be empty".to_string());
                None
            }
            None => {
                details.push("title: is required".to_string());
                None
            }
        };

        let amount = match amount_raw {
            Some(raw) => match Decimal::from_str(raw.trim()) {
                Ok(value) => Some(Money::new(value)),
                Err(_) => {
                    details.push(format!("amount: '{raw}' is not a valid decimal"));
                    None
                }
            },
            None => {
                details.push("amount: is required".to_string());
                None
            }
        };

        match (title, amount) {
            (Some(title), Some(amount)) => Ok(Self {
                title,
                amount,
                receipt,
            }),
            _ => Err(ApiError::Validation {
                message: "request validation failed".to_string(),
                details,
            }),
        }
    }
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|err| ApiError::BadRequest(format!("could not read {name} field: {err}")))
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub receipt_path: Option<String>,
    /// Where the stored receipt is served, when one exists
    pub receipt_url: Option<String>,
    pub spent_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        let receipt_url = expense
            .receipt_path
            .as_deref()
            .map(|path| format!("/uploads/{path}"));
        Self {
            id: expense.id.into(),
            title: expense.title,
            amount: expense.amount.amount(),
            receipt_path: expense.receipt_path,
            receipt_url,
            spent_at: expense.spent_at,
        }
    }
}
