//! Ledger application service
//!
//! [`LedgerService`] is the single entry point the interface layer talks to.
//! It wires the two ports together and owns the orchestration the store
//! cannot do alone: resolving the unit price before a billing protocol
//! opens, and keeping expense rows and their receipt files in step.
//!
//! Most methods are thin passthroughs to [`LedgerStore`]; the protocol
//! atomicity lives behind that trait, not here.

use std::sync::Arc;

use tracing::warn;

use core_kernel::{CustomerId, ExpenseId, MeterId, Money};

use crate::billing::{BaselineOutcome, BillingOutcome, PaymentOutcome};
use crate::customer::Customer;
use crate::error::LedgerError;
use crate::expense::Expense;
use crate::invoice::Invoice;
use crate::meter::{Meter, Reading};
use crate::payment::Payment;
use crate::ports::{ExpenseUpdate, LedgerStore, NewCustomer, NewExpense, NewMeter, ReceiptStore};
use crate::pricing::{UnitPrice, UNIT_PRICE_KEY};
use crate::reporting::{CustomerReportRow, DashboardSummary};

/// An uploaded receipt file, as extracted from a multipart request
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Application service for the billing ledger
///
/// Orchestrates the ledger and receipt stores. Construct once at startup
/// and share via `Arc`; all methods take `&self`.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    receipts: Arc<dyn ReceiptStore>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>, receipts: Arc<dyn ReceiptStore>) -> Self {
        Self { store, receipts }
    }

    /// Verifies the backing store is reachable
    pub async fn ping(&self) -> Result<(), LedgerError> {
        self.store.ping().await
    }

    // ========================================================================
    // Customers
    // ========================================================================

    pub async fn register_customer(&self, new: NewCustomer) -> Result<Customer, LedgerError> {
        self.store.insert_customer(new).await
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.store.get_customer(id).await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, LedgerError> {
        self.store.list_customers().await
    }

    // ========================================================================
    // Meters
    // ========================================================================

    pub async fn install_meter(&self, new: NewMeter) -> Result<Meter, LedgerError> {
        self.store.insert_meter(new).await
    }

    pub async fn get_meter(&self, id: MeterId) -> Result<Meter, LedgerError> {
        self.store.get_meter(id).await
    }

    pub async fn list_meters(&self) -> Result<Vec<Meter>, LedgerError> {
        self.store.list_meters().await
    }

    pub async fn meter_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Meter>, LedgerError> {
        self.store.meter_for_customer(customer_id).await
    }

    pub async fn delete_meter(&self, id: MeterId) -> Result<(), LedgerError> {
        self.store.delete_meter(id).await
    }

    pub async fn reset_meter(&self, id: MeterId) -> Result<(), LedgerError> {
        self.store.reset_meter(id).await
    }

    /// Corrects a meter's baseline, settling the delta against the wallet at
    /// the current unit price
    pub async fn adjust_meter_baseline(
        &self,
        id: MeterId,
        new_last_reading: i64,
    ) -> Result<BaselineOutcome, LedgerError> {
        let price = self.unit_price().await?;
        self.store
            .adjust_meter_baseline(id, new_last_reading, price)
            .await
    }

    // ========================================================================
    // Billing and payments
    // ========================================================================

    /// Records a meter reading and bills the attached customer.
    ///
    /// The unit price is resolved here, before the store transaction opens,
    /// so the whole protocol runs against one price snapshot. A price change
    /// never affects readings already recorded.
    pub async fn record_reading(
        &self,
        meter_id: MeterId,
        current_reading: i64,
        note: Option<String>,
    ) -> Result<BillingOutcome, LedgerError> {
        let price = self.unit_price().await?;
        self.store
            .record_reading(meter_id, current_reading, note, price)
            .await
    }

    pub async fn record_payment(
        &self,
        customer_id: CustomerId,
        amount: Money,
    ) -> Result<PaymentOutcome, LedgerError> {
        self.store.record_payment(customer_id, amount).await
    }

    // ========================================================================
    // History
    // ========================================================================

    pub async fn readings_for_meter(&self, meter_id: MeterId) -> Result<Vec<Reading>, LedgerError> {
        self.store.readings_for_meter(meter_id).await
    }

    pub async fn invoices_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Invoice>, LedgerError> {
        self.store.invoices_for_customer(customer_id).await
    }

    pub async fn payments_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Payment>, LedgerError> {
        self.store.payments_for_customer(customer_id).await
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Records an expense, storing the receipt file first when one was
    /// uploaded. If the row insert fails the freshly written file is
    /// removed again so no orphan blobs accumulate.
    pub async fn create_expense(
        &self,
        title: String,
        amount: Money,
        receipt: Option<ReceiptUpload>,
    ) -> Result<Expense, LedgerError> {
        let receipt_path = match receipt {
            Some(upload) => Some(self.receipts.save(&upload.file_name, &upload.bytes).await?),
            None => None,
        };

        let new = NewExpense {
            title,
            amount,
            receipt_path: receipt_path.clone(),
        };
        match self.store.insert_expense(new).await {
            Ok(expense) => Ok(expense),
            Err(error) => {
                if let Some(path) = receipt_path {
                    if let Err(cleanup) = self.receipts.delete(&path).await {
                        warn!(%path, error = %cleanup, "could not remove receipt after failed insert");
                    }
                }
                Err(error)
            }
        }
    }

    pub async fn get_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError> {
        self.store.get_expense(id).await
    }

    /// Updates an expense.
    ///
    /// When a new receipt is uploaded it replaces the old one:
    /// 1. the new file is written,
    /// 2. the row is updated to point at it,
    /// 3. the old file is removed, tolerating it being gone already.
    ///
    /// Without an upload the stored receipt is left untouched.
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        title: String,
        amount: Money,
        receipt: Option<ReceiptUpload>,
    ) -> Result<Expense, LedgerError> {
        let existing = self.store.get_expense(id).await?;

        let new_path = match receipt {
            Some(upload) => Some(self.receipts.save(&upload.file_name, &upload.bytes).await?),
            None => None,
        };

        let update = ExpenseUpdate {
            title,
            amount,
            receipt_path: new_path.clone(),
        };
        match self.store.update_expense(id, update).await {
            Ok(updated) => {
                // only discard the old file once the row points at the new one
                if new_path.is_some() {
                    if let Some(old) = existing.receipt_path {
                        if let Err(error) = self.receipts.delete(&old).await {
                            warn!(path = %old, %error, "could not remove replaced receipt");
                        }
                    }
                }
                Ok(updated)
            }
            Err(error) => {
                if let Some(path) = new_path {
                    if let Err(cleanup) = self.receipts.delete(&path).await {
                        warn!(%path, error = %cleanup, "could not remove receipt after failed update");
                    }
                }
                Err(error)
            }
        }
    }

    /// Deletes an expense and its receipt file. A receipt that is already
    /// missing on disk does not fail the deletion.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError> {
        let deleted = self.store.delete_expense(id).await?;
        if let Some(path) = &deleted.receipt_path {
            if let Err(error) = self.receipts.delete(path).await {
                warn!(%path, %error, "could not remove receipt of deleted expense");
            }
        }
        Ok(deleted)
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        self.store.list_expenses().await
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// The effective unit price: the stored setting, or the default when the
    /// setting is absent or unparseable
    pub async fn unit_price(&self) -> Result<UnitPrice, LedgerError> {
        let stored = self.store.get_setting(UNIT_PRICE_KEY).await?;
        Ok(UnitPrice::from_setting(stored.as_deref()))
    }

    /// Sets the unit price applied to future readings
    ///
    /// # Errors
    ///
    /// Rejects zero and negative prices with `NonPositiveUnitPrice`.
    pub async fn set_unit_price(&self, price: Money) -> Result<UnitPrice, LedgerError> {
        if !price.is_positive() {
            return Err(LedgerError::NonPositiveUnitPrice(price));
        }
        self.store
            .put_setting(UNIT_PRICE_KEY, &price.to_string())
            .await?;
        Ok(UnitPrice::new(price))
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, LedgerError> {
        self.store.dashboard_summary().await
    }

    pub async fn customer_report(&self) -> Result<Vec<CustomerReportRow>, LedgerError> {
        self.store.customer_report().await
    }
}
