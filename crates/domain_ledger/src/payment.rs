//! Payment entity
//!
//! A positive credit to a customer's wallet. Immutable once recorded.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, Money, PaymentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub customer_id: CustomerId,
    pub amount: Money,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(customer_id: CustomerId, amount: Money) -> Self {
        Self {
            id: PaymentId::new_v7(),
            customer_id,
            amount,
            paid_at: Utc::now(),
        }
    }
}
