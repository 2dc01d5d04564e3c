//! Expense entity
//!
//! Operating costs of the water system (fuel, repairs, chemicals), each
//! optionally carrying a stored receipt file. Expenses are independent of
//! customers and meters; they only feed the dashboard's expense total.

use chrono::{DateTime, Utc};
use core_kernel::{ExpenseId, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub amount: Money,
    /// Path within the receipt store, when a receipt was uploaded
    pub receipt_path: Option<String>,
    pub spent_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(title: impl Into<String>, amount: Money, receipt_path: Option<String>) -> Self {
        Self {
            id: ExpenseId::new_v7(),
            title: title.into(),
            amount,
            receipt_path,
            spent_at: Utc::now(),
        }
    }
}
