//! Invoice entity
//!
//! Exactly one invoice exists per accepted reading; its amount is the
//! reading's consumption costed at the unit price in force at submission
//! time. Invoices are immutable and are never re-priced.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, InvoiceId, Money, ReadingId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    /// One-to-one with the reading that produced this charge
    pub reading_id: ReadingId,
    pub amount: Money,
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(customer_id: CustomerId, reading_id: ReadingId, amount: Money) -> Self {
        Self {
            id: InvoiceId::new_v7(),
            customer_id,
            reading_id,
            amount,
            issued_at: Utc::now(),
        }
    }
}
