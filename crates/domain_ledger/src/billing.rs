//! Billing protocol math
//!
//! The pure calculations behind the transactional protocols. Store adapters
//! call these inside their transaction scope so that the Postgres and the
//! in-memory implementations reject and cost readings identically:
//!
//! - [`assess_reading`]: monotonicity validation plus consumption costing
//!   for `record_reading`
//! - [`assess_baseline_change`]: the wallet delta implied by an
//!   administrative baseline correction
//! - [`validate_payment_amount`]: payment positivity check
//! - [`replay_balance`]: reconstructs a wallet balance from full history,
//!   used to verify the running-balance invariant
//!
//! All functions are synchronous and side-effect free.

use core_kernel::Money;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::pricing::UnitPrice;

/// Validated outcome of assessing one submitted reading against a baseline.
///
/// Existence of a value of this type implies the monotonicity precondition
/// held: `current_reading > previous_reading`, hence `consumption >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingAssessment {
    pub previous_reading: i64,
    pub current_reading: i64,
    pub consumption: i64,
    pub cost: Money,
}

/// Validates a submitted cumulative reading and costs its consumption.
///
/// Fails with [`LedgerError::ReadingNotMonotonic`] when the submitted value
/// does not strictly exceed the baseline; equal values are rejected too,
/// since a cumulative counter that has not moved is not a billable event.
pub fn assess_reading(
    baseline: i64,
    submitted: i64,
    price: UnitPrice,
) -> Result<ReadingAssessment, LedgerError> {
    if submitted <= baseline {
        return Err(LedgerError::ReadingNotMonotonic {
            submitted,
            baseline,
        });
    }

    let consumption = submitted - baseline;
    Ok(ReadingAssessment {
        previous_reading: baseline,
        current_reading: submitted,
        consumption,
        cost: price.cost_of(consumption),
    })
}

/// The wallet effect of overwriting a meter's baseline directly.
///
/// `charge` is signed: raising the baseline charges the customer as if the
/// delta had been consumed, lowering it refunds. No Reading or Invoice row
/// accompanies this; it is a correction, not a billing event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineAdjustment {
    pub previous_baseline: i64,
    pub new_baseline: i64,
    pub charge: Money,
}

pub fn assess_baseline_change(
    baseline: i64,
    new_baseline: i64,
    price: UnitPrice,
) -> BaselineAdjustment {
    let delta = new_baseline - baseline;
    BaselineAdjustment {
        previous_baseline: baseline,
        new_baseline,
        charge: price.cost_of(delta),
    }
}

/// Rejects zero and negative payment amounts before anything is written
pub fn validate_payment_amount(amount: Money) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::NonPositivePayment(amount));
    }
    Ok(())
}

/// Reconstructs a wallet balance by replaying full history from zero:
/// the sum of all payments minus the sum of all invoices.
///
/// Administrative baseline corrections move balances without leaving an
/// invoice, so the replay matches the stored balance exactly on histories
/// that contain none.
pub fn replay_balance<'a, P, I>(payments: P, invoices: I) -> Money
where
    P: IntoIterator<Item = &'a Payment>,
    I: IntoIterator<Item = &'a Invoice>,
{
    let credited: Money = payments.into_iter().map(|p| p.amount).sum();
    let debited: Money = invoices.into_iter().map(|i| i.amount).sum();
    credited - debited
}

/// Result of the billing protocol, returned to the caller for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillingOutcome {
    pub consumption: i64,
    pub cost: Money,
    pub new_balance: Money,
}

/// Result of the payment protocol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub new_balance: Money,
}

/// Result of an administrative baseline correction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineOutcome {
    pub previous_baseline: i64,
    pub new_baseline: i64,
    pub charge: Money,
    pub new_balance: Money,
}
