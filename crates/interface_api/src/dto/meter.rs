//! Meter DTOs

use chrono::{DateTime, Utc};
use domain_ledger::{BaselineOutcome, Meter};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMeterRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub serial_number: String,
    pub customer_id: Uuid,
    /// Counter already on the device at installation; defaults to zero
    #[serde(default)]
    pub initial_reading: i64,
}

/// Administrative baseline correction (`PUT /meters/:id`)
#[derive(Debug, Deserialize)]
pub struct UpdateMeterRequest {
    pub last_reading: i64,
}

#[derive(Debug, Serialize)]
pub struct MeterResponse {
    pub id: Uuid,
    pub serial_number: String,
    pub customer_id: Uuid,
    pub last_reading: i64,
    pub installed_at: DateTime<Utc>,
}

impl From<Meter> for MeterResponse {
    fn from(meter: Meter) -> Self {
        Self {
            id: meter.id.into(),
            serial_number: meter.serial_number,
            customer_id: meter.customer_id.into(),
            last_reading: meter.last_reading,
            installed_at: meter.installed_at,
        }
    }
}

/// Lookup result for `GET /customers/:id/meter`: the customer exists either
/// way, the tag says whether a meter is installed.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeterLookupResponse {
    Found { meter: MeterResponse },
    NoMeter,
}

impl From<Option<Meter>> for MeterLookupResponse {
    fn from(meter: Option<Meter>) -> Self {
        match meter {
            Some(meter) => MeterLookupResponse::Found {
                meter: meter.into(),
            },
            None => MeterLookupResponse::NoMeter,
        }
    }
}

/// Outcome of a baseline correction: the signed charge the wallet absorbed
#[derive(Debug, Serialize)]
pub struct BaselineAdjustmentResponse {
    pub previous_baseline: i64,
    pub new_baseline: i64,
    pub charge: Decimal,
    pub new_balance: Decimal,
}

impl From<BaselineOutcome> for BaselineAdjustmentResponse {
    fn from(outcome: BaselineOutcome) -> Self {
        Self {
            previous_baseline: outcome.previous_baseline,
            new_baseline: outcome.new_baseline,
            charge: outcome.charge.amount(),
            new_balance: outcome.new_balance.amount(),
        }
    }
}
