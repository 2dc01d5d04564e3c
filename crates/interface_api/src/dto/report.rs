//! Reporting DTOs

use domain_ledger::{CustomerReportRow, DashboardSummary};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub box_balance: Decimal,
    pub total_debts: Decimal,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_income: summary.total_income.amount(),
            total_expenses: summary.total_expenses.amount(),
            box_balance: summary.box_balance.amount(),
            total_debts: summary.total_debts.amount(),
        }
    }
}

/// One flattened row of the per-customer report
#[derive(Debug, Serialize)]
pub struct CustomerReportEntry {
    pub customer_id: Uuid,
    pub full_name: String,
    pub serial_number: String,
    pub previous_reading: i64,
    pub current_reading: i64,
    pub consumption: i64,
    pub last_invoice_amount: Decimal,
    pub note: Option<String>,
    pub wallet_balance: Decimal,
}

impl From<CustomerReportRow> for CustomerReportEntry {
    fn from(row: CustomerReportRow) -> Self {
        Self {
            customer_id: row.customer_id.into(),
            full_name: row.full_name,
            serial_number: row.serial_number,
            previous_reading: row.previous_reading,
            current_reading: row.current_reading,
            consumption: row.consumption,
            last_invoice_amount: row.last_invoice_amount.amount(),
            note: row.note,
            wallet_balance: row.wallet_balance.amount(),
        }
    }
}
