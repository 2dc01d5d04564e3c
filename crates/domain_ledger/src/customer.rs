//! Customer entity
//!
//! A customer's `wallet_balance` is a signed running account: negative means
//! the customer owes the operator, positive means prepaid credit. The balance
//! is only ever moved by the billing protocol (debit), the payment protocol
//! (credit), and administrative baseline corrections.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    /// Natural key; unique across all customers
    pub phone: String,
    pub wallet_balance: Money,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Registers a new customer with a zero balance
    pub fn new(full_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new_v7(),
            full_name: full_name.into(),
            phone: phone.into(),
            wallet_balance: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// True if the customer currently owes money
    pub fn owes(&self) -> bool {
        self.wallet_balance.is_negative()
    }

    /// The outstanding debt as a positive amount, zero when in credit
    pub fn debt(&self) -> Money {
        if self.owes() {
            self.wallet_balance.abs()
        } else {
            Money::zero()
        }
    }
}
