//! Core Kernel - Foundational types for the water billing system
//!
//! This crate provides the building blocks shared by the ledger domain and
//! its adapters:
//! - Money: precise decimal amounts for invoices, payments, and balances
//! - Strongly-typed identifiers for every ledger entity

pub mod identifiers;
pub mod money;

pub use identifiers::{CustomerId, ExpenseId, InvoiceId, MeterId, PaymentId, ReadingId};
pub use money::Money;
