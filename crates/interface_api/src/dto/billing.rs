//! Reading and payment DTOs
//!
//! Amount positivity and counter monotonicity are domain rules, validated by
//! the billing protocols; the DTOs only constrain request shape.

use chrono::{DateTime, Utc};
use domain_ledger::{BillingOutcome, Invoice, Payment, PaymentOutcome, Reading};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordReadingRequest {
    pub meter_id: Uuid,
    pub current_reading: i64,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub note: Option<String>,
}

/// What one accepted reading did to the ledger
#[derive(Debug, Serialize)]
pub struct ReadingOutcomeResponse {
    pub consumption: i64,
    pub cost: Decimal,
    pub new_balance: Decimal,
}

impl From<BillingOutcome> for ReadingOutcomeResponse {
    fn from(outcome: BillingOutcome) -> Self {
        Self {
            consumption: outcome.consumption,
            cost: outcome.cost.amount(),
            new_balance: outcome.new_balance.amount(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub customer_id: Uuid,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PaymentOutcomeResponse {
    pub new_balance: Decimal,
}

impl From<PaymentOutcome> for PaymentOutcomeResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        Self {
            new_balance: outcome.new_balance.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub id: Uuid,
    pub meter_id: Uuid,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub consumption: i64,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        let consumption = reading.consumption();
        Self {
            id: reading.id.into(),
            meter_id: reading.meter_id.into(),
            previous_reading: reading.previous_reading,
            current_reading: reading.current_reading,
            consumption,
            note: reading.note,
            recorded_at: reading.recorded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub reading_id: Uuid,
    pub amount: Decimal,
    pub issued_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.into(),
            customer_id: invoice.customer_id.into(),
            reading_id: invoice.reading_id.into(),
            amount: invoice.amount.amount(),
            issued_at: invoice.issued_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.into(),
            customer_id: payment.customer_id.into(),
            amount: payment.amount.amount(),
            paid_at: payment.paid_at,
        }
    }
}
