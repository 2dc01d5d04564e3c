//! Ledger domain for the water billing system
//!
//! This crate holds everything the billing core needs, independent of any
//! transport or storage technology:
//!
//! - The persistent entities: [`Customer`], [`Meter`], [`Reading`],
//!   [`Invoice`], [`Payment`], [`Expense`]
//! - The pricing resolver ([`pricing`]) with its fallback default
//! - The billing protocol math ([`billing`]): monotonicity validation,
//!   consumption costing, baseline corrections, and balance replay
//! - Reporting row types ([`reporting`])
//! - The storage and receipt-file ports ([`ports`]) with an in-memory
//!   implementation for tests (feature `mock`)
//! - The application service ([`service::LedgerService`]) that orchestrates
//!   price resolution and receipt-file side effects around the store
//!
//! Storage adapters implement [`ports::LedgerStore`]; every multi-step
//! protocol (recording a reading, recording a payment, adjusting a baseline)
//! is a single trait method so adapters can make it atomic.

pub mod billing;
pub mod customer;
pub mod error;
pub mod expense;
pub mod invoice;
pub mod meter;
pub mod payment;
pub mod ports;
pub mod pricing;
pub mod reporting;
pub mod service;

pub use billing::{BaselineOutcome, BillingOutcome, PaymentOutcome};
pub use customer::Customer;
pub use error::LedgerError;
pub use expense::Expense;
pub use invoice::Invoice;
pub use meter::{Meter, Reading};
pub use payment::Payment;
pub use ports::{
    ExpenseUpdate, LedgerStore, NewCustomer, NewExpense, NewMeter, ReceiptStore,
};
pub use pricing::{UnitPrice, UNIT_PRICE_KEY};
pub use reporting::{CustomerReportRow, DashboardSummary};
pub use service::{LedgerService, ReceiptUpload};
