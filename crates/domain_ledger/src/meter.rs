//! Meter and Reading entities
//!
//! A meter carries a monotonically increasing cumulative counter. The
//! `last_reading` field is the baseline for the next consumption
//! calculation; it only moves forward through the billing protocol, is
//! overwritten by administrative baseline corrections, and drops to zero on
//! an explicit reset (physical meter replacement).
//!
//! Readings are the append-only history of counter transitions. They are
//! never updated or deleted, and they survive deletion of their meter.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, MeterId, ReadingId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub id: MeterId,
    pub serial_number: String,
    pub customer_id: CustomerId,
    /// Baseline for the next consumption calculation
    pub last_reading: i64,
    pub installed_at: DateTime<Utc>,
}

impl Meter {
    pub fn new(
        serial_number: impl Into<String>,
        customer_id: CustomerId,
        initial_reading: i64,
    ) -> Self {
        Self {
            id: MeterId::new_v7(),
            serial_number: serial_number.into(),
            customer_id,
            last_reading: initial_reading,
            installed_at: Utc::now(),
        }
    }
}

/// One accepted counter transition: `previous_reading` is the meter's
/// baseline snapshotted at submission time, `current_reading` the newly
/// submitted cumulative value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub meter_id: MeterId,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Reading {
    pub fn new(
        meter_id: MeterId,
        previous_reading: i64,
        current_reading: i64,
        note: Option<String>,
    ) -> Self {
        Self {
            id: ReadingId::new_v7(),
            meter_id,
            previous_reading,
            current_reading,
            note,
            recorded_at: Utc::now(),
        }
    }

    /// Units consumed over this transition
    pub fn consumption(&self) -> i64 {
        self.current_reading - self.previous_reading
    }
}
