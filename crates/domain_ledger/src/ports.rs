//! Ledger Domain Ports
//!
//! This module defines the port interfaces the ledger domain needs from the
//! outside world, enabling swappable implementations:
//!
//! - [`LedgerStore`]: the persistent ledger. The production adapter is
//!   PostgreSQL (`infra_db`); an in-memory implementation lives in [`mock`]
//!   for tests.
//! - [`ReceiptStore`]: the file-blob store for expense receipts. The
//!   production adapter writes to an uploads directory (`interface_api`).
//!
//! # Atomicity contract
//!
//! Every multi-step protocol (recording a reading, recording a payment,
//! adjusting a meter baseline) is a single trait method. Implementations
//! must apply all of a protocol's writes or none of them: a rejected or
//! failed call leaves no observable partial state. Validation shared by all
//! implementations lives in [`crate::billing`] so the in-memory store and
//! the database store reject identically.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerService, ports::LedgerStore};
//! use std::sync::Arc;
//!
//! // Application code receives the port, never a concrete store
//! let service = LedgerService::new(store: Arc<dyn LedgerStore>, receipts);
//! let outcome = service.record_reading(meter_id, 150, None).await?;
//! ```

use async_trait::async_trait;
use core_kernel::{CustomerId, ExpenseId, MeterId, Money};

use crate::billing::{BaselineOutcome, BillingOutcome, PaymentOutcome};
use crate::customer::Customer;
use crate::error::LedgerError;
use crate::expense::Expense;
use crate::invoice::Invoice;
use crate::meter::{Meter, Reading};
use crate::payment::Payment;
use crate::pricing::UnitPrice;
use crate::reporting::{CustomerReportRow, DashboardSummary};

/// Input for registering a customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub full_name: String,
    /// Natural key; the store rejects duplicates
    pub phone: String,
}

/// Input for installing a meter
#[derive(Debug, Clone)]
pub struct NewMeter {
    pub serial_number: String,
    pub customer_id: CustomerId,
    /// Counter value already on the physical device at installation
    pub initial_reading: i64,
}

/// Input for recording an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    /// Path returned by the receipt store, when a receipt was uploaded
    pub receipt_path: Option<String>,
}

/// Input for updating an expense.
///
/// `receipt_path` replaces the stored path when `Some`; `None` keeps the
/// existing receipt untouched.
#[derive(Debug, Clone)]
pub struct ExpenseUpdate {
    pub title: String,
    pub amount: Money,
    pub receipt_path: Option<String>,
}

/// The persistent ledger behind all billing operations.
///
/// Implementations provide atomic execution for the protocol methods and
/// plain reads for everything else. All methods return [`LedgerError`] with
/// the taxonomy described in [`crate::error`].
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Verifies the store is reachable (readiness checks)
    async fn ping(&self) -> Result<(), LedgerError>;

    // ========================================================================
    // Customers
    // ========================================================================

    /// Registers a customer with a zero wallet balance.
    ///
    /// Fails with `DuplicatePhone` without writing anything when the phone
    /// number is already registered.
    async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, LedgerError>;

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, LedgerError>;

    /// All customers in registration order
    async fn list_customers(&self) -> Result<Vec<Customer>, LedgerError>;

    // ========================================================================
    // Meters
    // ========================================================================

    /// Installs a meter for a customer.
    ///
    /// Fails with `CustomerNotFound` for an unknown customer and
    /// `MeterAlreadyInstalled` when the customer already has one (each
    /// customer has at most one meter).
    async fn insert_meter(&self, new: NewMeter) -> Result<Meter, LedgerError>;

    async fn get_meter(&self, id: MeterId) -> Result<Meter, LedgerError>;

    /// All meters in installation order
    async fn list_meters(&self) -> Result<Vec<Meter>, LedgerError>;

    /// The customer's meter, or `None` when no meter is installed
    async fn meter_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Meter>, LedgerError>;

    /// Removes a meter. Its Readings and Invoices survive as orphaned
    /// history; nothing cascades.
    async fn delete_meter(&self, id: MeterId) -> Result<(), LedgerError>;

    /// Sets `last_reading` to zero without touching the wallet balance
    /// (physical meter replacement)
    async fn reset_meter(&self, id: MeterId) -> Result<(), LedgerError>;

    /// Administrative baseline correction: charges or refunds the wallet
    /// for the baseline delta at the given price, then overwrites
    /// `last_reading`. Creates no Reading and no Invoice. Atomic.
    async fn adjust_meter_baseline(
        &self,
        id: MeterId,
        new_last_reading: i64,
        price: UnitPrice,
    ) -> Result<BaselineOutcome, LedgerError>;

    // ========================================================================
    // Billing and payment protocols
    // ========================================================================

    /// The billing protocol. Atomically: validates monotonicity, persists a
    /// Reading and its Invoice, debits the customer's wallet by
    /// `consumption x price`, and advances the meter's `last_reading`.
    ///
    /// The price is a snapshot resolved by the caller before the
    /// transaction opens; the store never reads settings mid-protocol.
    async fn record_reading(
        &self,
        meter_id: MeterId,
        current_reading: i64,
        note: Option<String>,
        price: UnitPrice,
    ) -> Result<BillingOutcome, LedgerError>;

    /// The payment protocol. Atomically persists a Payment and credits the
    /// customer's wallet. Rejects non-positive amounts before writing.
    async fn record_payment(
        &self,
        customer_id: CustomerId,
        amount: Money,
    ) -> Result<PaymentOutcome, LedgerError>;

    // ========================================================================
    // History
    // ========================================================================

    /// Append-ordered reading history for a meter. Returns rows even after
    /// the meter itself was deleted (history is never cascaded away).
    async fn readings_for_meter(&self, meter_id: MeterId) -> Result<Vec<Reading>, LedgerError>;

    /// Invoice history for an existing customer, oldest first
    async fn invoices_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Invoice>, LedgerError>;

    /// Payment history for an existing customer, oldest first
    async fn payments_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Payment>, LedgerError>;

    // ========================================================================
    // Expenses
    // ========================================================================

    async fn insert_expense(&self, new: NewExpense) -> Result<Expense, LedgerError>;

    async fn get_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError>;

    async fn update_expense(
        &self,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> Result<Expense, LedgerError>;

    /// Deletes the row and returns it, so callers can clean up the
    /// associated receipt file
    async fn delete_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError>;

    /// All expenses, newest first
    async fn list_expenses(&self) -> Result<Vec<Expense>, LedgerError>;

    // ========================================================================
    // Settings
    // ========================================================================

    async fn get_setting(&self, key: &str) -> Result<Option<String>, LedgerError>;

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), LedgerError>;

    // ========================================================================
    // Reporting
    // ========================================================================

    /// Cash-flow totals, computed fresh from committed state
    async fn dashboard_summary(&self) -> Result<DashboardSummary, LedgerError>;

    /// One flattened row per metered customer; see
    /// [`crate::reporting::CustomerReportRow`]
    async fn customer_report(&self) -> Result<Vec<CustomerReportRow>, LedgerError>;
}

/// File-blob storage for expense receipts.
///
/// `delete` tolerates already-absent paths: removing a receipt whose file
/// was cleaned up externally is not an error.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Stores the bytes and returns the path to persist on the expense row
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, LedgerError>;

    /// Removes a stored receipt; missing paths succeed silently
    async fn delete(&self, path: &str) -> Result<(), LedgerError>;
}

/// In-memory implementations for testing without a database or filesystem.
///
/// `MockLedgerStore` implements the full protocol semantics, validating
/// every step before mutating so rejected operations leave no partial
/// state, exactly like the transactional Postgres adapter.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use crate::billing::{assess_baseline_change, assess_reading, validate_payment_amount};

    #[derive(Debug, Default)]
    struct MockState {
        customers: Vec<Customer>,
        meters: Vec<Meter>,
        readings: Vec<Reading>,
        invoices: Vec<Invoice>,
        payments: Vec<Payment>,
        expenses: Vec<Expense>,
        settings: HashMap<String, String>,
    }

    /// In-memory ledger store. Vec-backed so insertion order is the
    /// iteration order, mirroring the time-ordered keys of the database
    /// adapter.
    #[derive(Debug, Default)]
    pub struct MockLedgerStore {
        state: Arc<RwLock<MockState>>,
    }

    impl MockLedgerStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl LedgerStore for MockLedgerStore {
        async fn ping(&self) -> Result<(), LedgerError> {
            Ok(())
        }

        async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, LedgerError> {
            let mut guard = self.state.write().await;
            if guard.customers.iter().any(|c| c.phone == new.phone) {
                return Err(LedgerError::DuplicatePhone(new.phone));
            }
            let customer = Customer::new(new.full_name, new.phone);
            guard.customers.push(customer.clone());
            Ok(customer)
        }

        async fn get_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
            self.state
                .read()
                .await
                .customers
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or(LedgerError::CustomerNotFound(id))
        }

        async fn list_customers(&self) -> Result<Vec<Customer>, LedgerError> {
            Ok(self.state.read().await.customers.clone())
        }

        async fn insert_meter(&self, new: NewMeter) -> Result<Meter, LedgerError> {
            let mut guard = self.state.write().await;
            if !guard.customers.iter().any(|c| c.id == new.customer_id) {
                return Err(LedgerError::CustomerNotFound(new.customer_id));
            }
            if guard.meters.iter().any(|m| m.customer_id == new.customer_id) {
                return Err(LedgerError::MeterAlreadyInstalled(new.customer_id));
            }
            let meter = Meter::new(new.serial_number, new.customer_id, new.initial_reading);
            guard.meters.push(meter.clone());
            Ok(meter)
        }

        async fn get_meter(&self, id: MeterId) -> Result<Meter, LedgerError> {
            self.state
                .read()
                .await
                .meters
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or(LedgerError::MeterNotFound(id))
        }

        async fn list_meters(&self) -> Result<Vec<Meter>, LedgerError> {
            Ok(self.state.read().await.meters.clone())
        }

        async fn meter_for_customer(
            &self,
            customer_id: CustomerId,
        ) -> Result<Option<Meter>, LedgerError> {
            Ok(self
                .state
                .read()
                .await
                .meters
                .iter()
                .find(|m| m.customer_id == customer_id)
                .cloned())
        }

        async fn delete_meter(&self, id: MeterId) -> Result<(), LedgerError> {
            let mut guard = self.state.write().await;
            let idx = guard
                .meters
                .iter()
                .position(|m| m.id == id)
                .ok_or(LedgerError::MeterNotFound(id))?;
            guard.meters.remove(idx);
            Ok(())
        }

        async fn reset_meter(&self, id: MeterId) -> Result<(), LedgerError> {
            let mut guard = self.state.write().await;
            let meter = guard
                .meters
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(LedgerError::MeterNotFound(id))?;
            meter.last_reading = 0;
            Ok(())
        }

        async fn adjust_meter_baseline(
            &self,
            id: MeterId,
            new_last_reading: i64,
            price: UnitPrice,
        ) -> Result<BaselineOutcome, LedgerError> {
            let mut guard = self.state.write().await;
            let state = &mut *guard;

            let meter_idx = state
                .meters
                .iter()
                .position(|m| m.id == id)
                .ok_or(LedgerError::MeterNotFound(id))?;
            let customer_id = state.meters[meter_idx].customer_id;
            let adjustment =
                assess_baseline_change(state.meters[meter_idx].last_reading, new_last_reading, price);

            let customer = state
                .customers
                .iter_mut()
                .find(|c| c.id == customer_id)
                .ok_or(LedgerError::CustomerNotFound(customer_id))?;
            customer.wallet_balance -= adjustment.charge;
            let new_balance = customer.wallet_balance;
            state.meters[meter_idx].last_reading = new_last_reading;

            Ok(BaselineOutcome {
                previous_baseline: adjustment.previous_baseline,
                new_baseline: adjustment.new_baseline,
                charge: adjustment.charge,
                new_balance,
            })
        }

        async fn record_reading(
            &self,
            meter_id: MeterId,
            current_reading: i64,
            note: Option<String>,
            price: UnitPrice,
        ) -> Result<BillingOutcome, LedgerError> {
            let mut guard = self.state.write().await;
            let state = &mut *guard;

            // validate everything before the first mutation
            let meter_idx = state
                .meters
                .iter()
                .position(|m| m.id == meter_id)
                .ok_or(LedgerError::MeterNotFound(meter_id))?;
            let assessment =
                assess_reading(state.meters[meter_idx].last_reading, current_reading, price)?;
            let customer_id = state.meters[meter_idx].customer_id;

            let customer = state
                .customers
                .iter_mut()
                .find(|c| c.id == customer_id)
                .ok_or(LedgerError::CustomerNotFound(customer_id))?;

            let reading = Reading::new(
                meter_id,
                assessment.previous_reading,
                assessment.current_reading,
                note,
            );
            let invoice = Invoice::new(customer_id, reading.id, assessment.cost);

            customer.wallet_balance -= assessment.cost;
            let new_balance = customer.wallet_balance;
            state.meters[meter_idx].last_reading = assessment.current_reading;
            state.readings.push(reading);
            state.invoices.push(invoice);

            Ok(BillingOutcome {
                consumption: assessment.consumption,
                cost: assessment.cost,
                new_balance,
            })
        }

        async fn record_payment(
            &self,
            customer_id: CustomerId,
            amount: Money,
        ) -> Result<PaymentOutcome, LedgerError> {
            let mut guard = self.state.write().await;
            let state = &mut *guard;

            validate_payment_amount(amount)?;
            let customer = state
                .customers
                .iter_mut()
                .find(|c| c.id == customer_id)
                .ok_or(LedgerError::CustomerNotFound(customer_id))?;

            customer.wallet_balance += amount;
            let new_balance = customer.wallet_balance;
            state.payments.push(Payment::new(customer_id, amount));

            Ok(PaymentOutcome { new_balance })
        }

        async fn readings_for_meter(
            &self,
            meter_id: MeterId,
        ) -> Result<Vec<Reading>, LedgerError> {
            Ok(self
                .state
                .read()
                .await
                .readings
                .iter()
                .filter(|r| r.meter_id == meter_id)
                .cloned()
                .collect())
        }

        async fn invoices_for_customer(
            &self,
            customer_id: CustomerId,
        ) -> Result<Vec<Invoice>, LedgerError> {
            let guard = self.state.read().await;
            if !guard.customers.iter().any(|c| c.id == customer_id) {
                return Err(LedgerError::CustomerNotFound(customer_id));
            }
            Ok(guard
                .invoices
                .iter()
                .filter(|i| i.customer_id == customer_id)
                .cloned()
                .collect())
        }

        async fn payments_for_customer(
            &self,
            customer_id: CustomerId,
        ) -> Result<Vec<Payment>, LedgerError> {
            let guard = self.state.read().await;
            if !guard.customers.iter().any(|c| c.id == customer_id) {
                return Err(LedgerError::CustomerNotFound(customer_id));
            }
            Ok(guard
                .payments
                .iter()
                .filter(|p| p.customer_id == customer_id)
                .cloned()
                .collect())
        }

        async fn insert_expense(&self, new: NewExpense) -> Result<Expense, LedgerError> {
            let mut guard = self.state.write().await;
            let expense = Expense::new(new.title, new.amount, new.receipt_path);
            guard.expenses.push(expense.clone());
            Ok(expense)
        }

        async fn get_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError> {
            self.state
                .read()
                .await
                .expenses
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or(LedgerError::ExpenseNotFound(id))
        }

        async fn update_expense(
            &self,
            id: ExpenseId,
            update: ExpenseUpdate,
        ) -> Result<Expense, LedgerError> {
            let mut guard = self.state.write().await;
            let expense = guard
                .expenses
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(LedgerError::ExpenseNotFound(id))?;
            expense.title = update.title;
            expense.amount = update.amount;
            if let Some(path) = update.receipt_path {
                expense.receipt_path = Some(path);
            }
            Ok(expense.clone())
        }

        async fn delete_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError> {
            let mut guard = self.state.write().await;
            let idx = guard
                .expenses
                .iter()
                .position(|e| e.id == id)
                .ok_or(LedgerError::ExpenseNotFound(id))?;
            Ok(guard.expenses.remove(idx))
        }

        async fn list_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
            let mut expenses = self.state.read().await.expenses.clone();
            expenses.reverse();
            Ok(expenses)
        }

        async fn get_setting(&self, key: &str) -> Result<Option<String>, LedgerError> {
            Ok(self.state.read().await.settings.get(key).cloned())
        }

        async fn put_setting(&self, key: &str, value: &str) -> Result<(), LedgerError> {
            self.state
                .write()
                .await
                .settings
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn dashboard_summary(&self) -> Result<DashboardSummary, LedgerError> {
            let guard = self.state.read().await;
            let total_income: Money = guard.payments.iter().map(|p| p.amount).sum();
            let total_expenses: Money = guard.expenses.iter().map(|e| e.amount).sum();
            let total_debts: Money = guard.customers.iter().map(|c| c.debt()).sum();
            Ok(DashboardSummary::from_totals(
                total_income,
                total_expenses,
                total_debts,
            ))
        }

        async fn customer_report(&self) -> Result<Vec<CustomerReportRow>, LedgerError> {
            let guard = self.state.read().await;
            let mut rows = Vec::new();
            for customer in &guard.customers {
                let Some(meter) = guard.meters.iter().find(|m| m.customer_id == customer.id)
                else {
                    continue;
                };
                // latest reading by insertion order
                let latest = guard.readings.iter().rev().find(|r| r.meter_id == meter.id);
                let row = match latest {
                    Some(reading) => {
                        let invoice_amount = guard
                            .invoices
                            .iter()
                            .find(|i| i.reading_id == reading.id)
                            .map(|i| i.amount)
                            .unwrap_or_else(Money::zero);
                        CustomerReportRow::from_latest_reading(
                            customer,
                            meter,
                            reading,
                            invoice_amount,
                        )
                    }
                    None => CustomerReportRow::without_readings(customer, meter),
                };
                rows.push(row);
            }
            Ok(rows)
        }
    }

    /// In-memory receipt store keyed by the generated path
    #[derive(Debug, Default)]
    pub struct MockReceiptStore {
        files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    }

    impl MockReceiptStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// True when a receipt is stored at `path`
        pub async fn contains(&self, path: &str) -> bool {
            self.files.read().await.contains_key(path)
        }

        /// Number of stored receipts
        pub async fn file_count(&self) -> usize {
            self.files.read().await.len()
        }

        /// Drops a file behind the store's back, simulating external cleanup
        pub async fn remove_externally(&self, path: &str) {
            self.files.write().await.remove(path);
        }
    }

    #[async_trait]
    impl ReceiptStore for MockReceiptStore {
        async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, LedgerError> {
            let path = format!("receipts/{}-{}", Uuid::now_v7(), file_name);
            self.files
                .write()
                .await
                .insert(path.clone(), bytes.to_vec());
            Ok(path)
        }

        async fn delete(&self, path: &str) -> Result<(), LedgerError> {
            // missing files are tolerated
            self.files.write().await.remove(path);
            Ok(())
        }
    }
}
