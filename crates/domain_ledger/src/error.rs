//! Ledger error taxonomy
//!
//! Three caller-visible families plus a storage catch-all:
//! - not-found: a referenced Customer, Meter, or Expense does not exist
//! - invalid input: a validation rule rejected the request (the message
//!   always names the offending values)
//! - conflict: a concurrent update race was detected by the store
//! - storage: infrastructure failure in the adapter (pool, driver, IO)

use core_kernel::{CustomerId, ExpenseId, MeterId, Money};
use thiserror::Error;

/// Errors produced by ledger protocols and store adapters
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("meter {0} not found")]
    MeterNotFound(MeterId),

    #[error("expense {0} not found")]
    ExpenseNotFound(ExpenseId),

    /// Phone numbers are the natural key for customers
    #[error("a customer with phone '{0}' is already registered")]
    DuplicatePhone(String),

    /// Each customer has at most one installed meter
    #[error("customer {0} already has a meter installed")]
    MeterAlreadyInstalled(CustomerId),

    /// Cumulative counters only move forward; the message carries both the
    /// rejected value and the baseline so callers can show a precise
    /// diagnostic
    #[error(
        "submitted reading ({submitted}) must be greater than the meter's last reading ({baseline})"
    )]
    ReadingNotMonotonic { submitted: i64, baseline: i64 },

    #[error("payment amount must be positive, got {0}")]
    NonPositivePayment(Money),

    #[error("unit price must be positive, got {0}")]
    NonPositiveUnitPrice(Money),

    #[error("concurrent update conflict: {0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Wraps an adapter-level failure
    pub fn storage(err: impl std::fmt::Display) -> Self {
        LedgerError::Storage(err.to_string())
    }

    /// True for the not-found family
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::CustomerNotFound(_)
                | LedgerError::MeterNotFound(_)
                | LedgerError::ExpenseNotFound(_)
        )
    }

    /// True for the invalid-input family
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            LedgerError::DuplicatePhone(_)
                | LedgerError::MeterAlreadyInstalled(_)
                | LedgerError::ReadingNotMonotonic { .. }
                | LedgerError::NonPositivePayment(_)
                | LedgerError::NonPositiveUnitPrice(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonicity_message_names_both_values() {
        let err = LedgerError::ReadingNotMonotonic {
            submitted: 120,
            baseline: 150,
        };
        let msg = err.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("150"));
    }

    #[test]
    fn test_family_predicates() {
        assert!(LedgerError::MeterNotFound(MeterId::new()).is_not_found());
        assert!(LedgerError::DuplicatePhone("0700000001".into()).is_invalid_input());
        assert!(!LedgerError::Conflict("race".into()).is_not_found());
        assert!(!LedgerError::Storage("pool closed".into()).is_invalid_input());
    }
}
