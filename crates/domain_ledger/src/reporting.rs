//! Reporting view types
//!
//! Read-only aggregations over committed ledger state. Both store
//! implementations compute these fresh on every call; nothing here is
//! cached or incrementally maintained.

use core_kernel::{CustomerId, Money};
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::meter::{Meter, Reading};

/// Cash-flow totals for the whole operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Sum of all payments received
    pub total_income: Money,
    /// Sum of all recorded expenses
    pub total_expenses: Money,
    /// Income minus expenses: the cash box position
    pub box_balance: Money,
    /// Sum of the absolute values of all negative wallet balances
    pub total_debts: Money,
}

impl DashboardSummary {
    /// Builds a summary from the three independent totals; the box balance
    /// is derived, never stored
    pub fn from_totals(total_income: Money, total_expenses: Money, total_debts: Money) -> Self {
        Self {
            total_income,
            total_expenses,
            box_balance: total_income - total_expenses,
            total_debts,
        }
    }
}

/// One row of the per-customer report: the customer, their meter, their
/// most recent reading (by insertion order), and that reading's invoice
/// amount, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerReportRow {
    pub customer_id: CustomerId,
    pub full_name: String,
    pub serial_number: String,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub consumption: i64,
    pub last_invoice_amount: Money,
    pub note: Option<String>,
    pub wallet_balance: Money,
}

impl CustomerReportRow {
    /// Row for a metered customer with no readings yet: reading fields
    /// default to zero, the note is empty
    pub fn without_readings(customer: &Customer, meter: &Meter) -> Self {
        Self {
            customer_id: customer.id,
            full_name: customer.full_name.clone(),
            serial_number: meter.serial_number.clone(),
            previous_reading: 0,
            current_reading: 0,
            consumption: 0,
            last_invoice_amount: Money::zero(),
            note: None,
            wallet_balance: customer.wallet_balance,
        }
    }

    /// Row built from the latest reading and its invoice amount
    pub fn from_latest_reading(
        customer: &Customer,
        meter: &Meter,
        reading: &Reading,
        invoice_amount: Money,
    ) -> Self {
        Self {
            customer_id: customer.id,
            full_name: customer.full_name.clone(),
            serial_number: meter.serial_number.clone(),
            previous_reading: reading.previous_reading,
            current_reading: reading.current_reading,
            consumption: reading.consumption(),
            last_invoice_amount: invoice_amount,
            note: reading.note.clone(),
            wallet_balance: customer.wallet_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_box_balance_is_income_minus_expenses() {
        let summary = DashboardSummary::from_totals(
            Money::new(dec!(10000)),
            Money::new(dec!(3500)),
            Money::new(dec!(1200)),
        );
        assert_eq!(summary.box_balance, Money::new(dec!(6500)));
    }

    #[test]
    fn test_row_without_readings_defaults_to_zero() {
        let customer = Customer::new("Asha Mwangi", "0700111222");
        let meter = Meter::new("WM-0001", customer.id, 0);

        let row = CustomerReportRow::without_readings(&customer, &meter);
        assert_eq!(row.previous_reading, 0);
        assert_eq!(row.current_reading, 0);
        assert_eq!(row.consumption, 0);
        assert_eq!(row.last_invoice_amount, Money::zero());
        assert_eq!(row.note, None);
    }

    #[test]
    fn test_row_from_latest_reading_flattens_fields() {
        let customer = Customer::new("Asha Mwangi", "0700111222");
        let meter = Meter::new("WM-0001", customer.id, 0);
        let reading = Reading::new(meter.id, 100, 150, Some("rear yard tap".into()));

        let row = CustomerReportRow::from_latest_reading(
            &customer,
            &meter,
            &reading,
            Money::new(dec!(5000)),
        );
        assert_eq!(row.previous_reading, 100);
        assert_eq!(row.current_reading, 150);
        assert_eq!(row.consumption, 50);
        assert_eq!(row.last_invoice_amount, Money::new(dec!(5000)));
        assert_eq!(row.note.as_deref(), Some("rear yard tap"));
    }
}
