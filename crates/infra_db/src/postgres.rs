//! PostgreSQL Ledger Adapter
//!
//! This module implements the `LedgerStore` port on PostgreSQL.
//!
//! # Overview
//!
//! [`PgLedger`] is the production store behind all billing operations. It:
//!
//! - Runs every multi-step protocol in one transaction, taking a
//!   `FOR UPDATE` lock on the meter row so concurrent submissions against
//!   the same meter serialize
//! - Converts database rows back to domain models
//! - Translates constraint violations into the precise domain errors the
//!   interface layer maps to status codes
//!
//! # Locking order
//!
//! Protocols that touch both a meter and its customer always lock the
//! meter first, then update the customer. Payment only touches the
//! customer row. With a single shared resource per pair there is no lock
//! cycle between concurrent protocols.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::PgLedger;
//! use domain_ledger::LedgerStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn LedgerStore> = Arc::new(PgLedger::new(pool));
//! let outcome = store.record_reading(meter_id, 150, None, price).await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{CustomerId, ExpenseId, InvoiceId, MeterId, Money, PaymentId, ReadingId};
use domain_ledger::billing::{assess_baseline_change, assess_reading, validate_payment_amount};
use domain_ledger::{
    BaselineOutcome, BillingOutcome, Customer, CustomerReportRow, DashboardSummary, Expense,
    ExpenseUpdate, Invoice, LedgerError, LedgerStore, Meter, NewCustomer, NewExpense, NewMeter,
    Payment, PaymentOutcome, Reading, UnitPrice,
};

use crate::error::{to_ledger_error, DatabaseError};

/// PostgreSQL-backed implementation of the ledger store
#[derive(Debug, Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    /// Creates a new ledger store on the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool, for operations outside
    /// the port surface (health probes, ad-hoc maintenance)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn customer_exists(&self, id: CustomerId) -> Result<bool, LedgerError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)")
            .bind(Uuid::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(to_ledger_error)
    }
}

#[async_trait]
impl LedgerStore for PgLedger {
    async fn ping(&self) -> Result<(), LedgerError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(to_ledger_error)?;
        Ok(())
    }

    // ========================================================================
    // Customers
    // ========================================================================

    #[instrument(skip(self, new), fields(phone = %new.phone))]
    async fn insert_customer(&self, new: NewCustomer) -> Result<Customer, LedgerError> {
        debug!("Registering customer");

        let customer = Customer::new(new.full_name, new.phone);
        sqlx::query(
            r#"
            INSERT INTO customers (id, full_name, phone, wallet_balance, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::from(customer.id))
        .bind(&customer.full_name)
        .bind(&customer.phone)
        .bind(customer.wallet_balance.amount())
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(&e) {
            DatabaseError::DuplicateEntry { constraint, .. }
                if constraint.as_deref() == Some("customers_phone_key") =>
            {
                LedgerError::DuplicatePhone(customer.phone.clone())
            }
            other => other.into(),
        })?;

        Ok(customer)
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, full_name, phone, wallet_balance, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::CustomerNotFound(id))?;

        Ok(customer_from_row(row))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, LedgerError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, full_name, phone, wallet_balance, created_at
            FROM customers
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(customer_from_row).collect())
    }

    // ========================================================================
    // Meters
    // ========================================================================

    #[instrument(skip(self, new), fields(customer_id = %new.customer_id))]
    async fn insert_meter(&self, new: NewMeter) -> Result<Meter, LedgerError> {
        debug!("Installing meter");

        let customer_id = new.customer_id;
        let meter = Meter::new(new.serial_number, new.customer_id, new.initial_reading);
        sqlx::query(
            r#"
            INSERT INTO meters (id, serial_number, customer_id, last_reading, installed_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::from(meter.id))
        .bind(&meter.serial_number)
        .bind(Uuid::from(meter.customer_id))
        .bind(meter.last_reading)
        .bind(meter.installed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(&e) {
            DatabaseError::ForeignKeyViolation { constraint, .. }
                if constraint.as_deref() == Some("meters_customer_id_fkey") =>
            {
                LedgerError::CustomerNotFound(customer_id)
            }
            DatabaseError::DuplicateEntry { constraint, .. }
                if constraint.as_deref() == Some("meters_customer_id_key") =>
            {
                LedgerError::MeterAlreadyInstalled(customer_id)
            }
            other => other.into(),
        })?;

        Ok(meter)
    }

    async fn get_meter(&self, id: MeterId) -> Result<Meter, LedgerError> {
        let row = sqlx::query_as::<_, MeterRow>(
            r#"
            SELECT id, serial_number, customer_id, last_reading, installed_at
            FROM meters
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::MeterNotFound(id))?;

        Ok(meter_from_row(row))
    }

    async fn list_meters(&self) -> Result<Vec<Meter>, LedgerError> {
        let rows = sqlx::query_as::<_, MeterRow>(
            r#"
            SELECT id, serial_number, customer_id, last_reading, installed_at
            FROM meters
            ORDER BY installed_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(meter_from_row).collect())
    }

    async fn meter_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Meter>, LedgerError> {
        let row = sqlx::query_as::<_, MeterRow>(
            r#"
            SELECT id, serial_number, customer_id, last_reading, installed_at
            FROM meters
            WHERE customer_id = $1
            "#,
        )
        .bind(Uuid::from(customer_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(row.map(meter_from_row))
    }

    #[instrument(skip(self, id), fields(meter_id = %id))]
    async fn delete_meter(&self, id: MeterId) -> Result<(), LedgerError> {
        let result = sqlx::query("DELETE FROM meters WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(to_ledger_error)?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::MeterNotFound(id));
        }

        debug!("Meter deleted; readings and invoices remain");
        Ok(())
    }

    #[instrument(skip(self, id), fields(meter_id = %id))]
    async fn reset_meter(&self, id: MeterId) -> Result<(), LedgerError> {
        let result = sqlx::query("UPDATE meters SET last_reading = 0 WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(to_ledger_error)?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::MeterNotFound(id));
        }

        debug!("Meter counter reset to zero");
        Ok(())
    }

    #[instrument(skip(self, price, id), fields(meter_id = %id))]
    async fn adjust_meter_baseline(
        &self,
        id: MeterId,
        new_last_reading: i64,
        price: UnitPrice,
    ) -> Result<BaselineOutcome, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(to_ledger_error)?;

        let meter = sqlx::query_as::<_, MeterRow>(
            r#"
            SELECT id, serial_number, customer_id, last_reading, installed_at
            FROM meters
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::MeterNotFound(id))?;

        let adjustment = assess_baseline_change(meter.last_reading, new_last_reading, price);
        let customer_id = CustomerId::from(meter.customer_id);

        let new_balance = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE customers
            SET wallet_balance = wallet_balance - $2
            WHERE id = $1
            RETURNING wallet_balance
            "#,
        )
        .bind(meter.customer_id)
        .bind(adjustment.charge.amount())
        .fetch_optional(&mut *tx)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::CustomerNotFound(customer_id))?;

        sqlx::query("UPDATE meters SET last_reading = $2 WHERE id = $1")
            .bind(Uuid::from(id))
            .bind(new_last_reading)
            .execute(&mut *tx)
            .await
            .map_err(to_ledger_error)?;

        tx.commit().await.map_err(to_ledger_error)?;

        debug!(charge = %adjustment.charge, "Baseline adjusted");

        Ok(BaselineOutcome {
            previous_baseline: adjustment.previous_baseline,
            new_baseline: adjustment.new_baseline,
            charge: adjustment.charge,
            new_balance: Money::new(new_balance),
        })
    }

    // ========================================================================
    // Billing and payment protocols
    // ========================================================================

    #[instrument(
        skip(self, note, price, meter_id),
        fields(meter_id = %meter_id, price = %price)
    )]
    async fn record_reading(
        &self,
        meter_id: MeterId,
        current_reading: i64,
        note: Option<String>,
        price: UnitPrice,
    ) -> Result<BillingOutcome, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(to_ledger_error)?;

        // lock the meter row; concurrent submissions for this meter queue here
        let meter = sqlx::query_as::<_, MeterRow>(
            r#"
            SELECT id, serial_number, customer_id, last_reading, installed_at
            FROM meters
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(Uuid::from(meter_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::MeterNotFound(meter_id))?;

        let assessment = assess_reading(meter.last_reading, current_reading, price)?;
        let customer_id = CustomerId::from(meter.customer_id);

        let reading = Reading::new(
            meter_id,
            assessment.previous_reading,
            assessment.current_reading,
            note,
        );
        sqlx::query(
            r#"
            INSERT INTO readings (id, meter_id, previous_reading, current_reading, note, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::from(reading.id))
        .bind(Uuid::from(reading.meter_id))
        .bind(reading.previous_reading)
        .bind(reading.current_reading)
        .bind(reading.note.as_deref())
        .bind(reading.recorded_at)
        .execute(&mut *tx)
        .await
        .map_err(to_ledger_error)?;

        let invoice = Invoice::new(customer_id, reading.id, assessment.cost);
        sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_id, reading_id, amount, issued_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::from(invoice.id))
        .bind(Uuid::from(invoice.customer_id))
        .bind(Uuid::from(invoice.reading_id))
        .bind(invoice.amount.amount())
        .bind(invoice.issued_at)
        .execute(&mut *tx)
        .await
        .map_err(to_ledger_error)?;

        let new_balance = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE customers
            SET wallet_balance = wallet_balance - $2
            WHERE id = $1
            RETURNING wallet_balance
            "#,
        )
        .bind(meter.customer_id)
        .bind(assessment.cost.amount())
        .fetch_optional(&mut *tx)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::CustomerNotFound(customer_id))?;

        sqlx::query("UPDATE meters SET last_reading = $2 WHERE id = $1")
            .bind(Uuid::from(meter_id))
            .bind(assessment.current_reading)
            .execute(&mut *tx)
            .await
            .map_err(to_ledger_error)?;

        tx.commit().await.map_err(to_ledger_error)?;

        debug!(
            consumption = assessment.consumption,
            cost = %assessment.cost,
            "Reading recorded and billed"
        );

        Ok(BillingOutcome {
            consumption: assessment.consumption,
            cost: assessment.cost,
            new_balance: Money::new(new_balance),
        })
    }

    #[instrument(
        skip(self, customer_id, amount),
        fields(customer_id = %customer_id, amount = %amount)
    )]
    async fn record_payment(
        &self,
        customer_id: CustomerId,
        amount: Money,
    ) -> Result<PaymentOutcome, LedgerError> {
        validate_payment_amount(amount)?;

        let mut tx = self.pool.begin().await.map_err(to_ledger_error)?;

        let new_balance = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE customers
            SET wallet_balance = wallet_balance + $2
            WHERE id = $1
            RETURNING wallet_balance
            "#,
        )
        .bind(Uuid::from(customer_id))
        .bind(amount.amount())
        .fetch_optional(&mut *tx)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::CustomerNotFound(customer_id))?;

        let payment = Payment::new(customer_id, amount);
        sqlx::query(
            r#"
            INSERT INTO payments (id, customer_id, amount, paid_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::from(payment.id))
        .bind(Uuid::from(payment.customer_id))
        .bind(payment.amount.amount())
        .bind(payment.paid_at)
        .execute(&mut *tx)
        .await
        .map_err(to_ledger_error)?;

        tx.commit().await.map_err(to_ledger_error)?;

        debug!(balance = %new_balance, "Payment recorded");

        Ok(PaymentOutcome {
            new_balance: Money::new(new_balance),
        })
    }

    // ========================================================================
    // History
    // ========================================================================

    async fn readings_for_meter(&self, meter_id: MeterId) -> Result<Vec<Reading>, LedgerError> {
        let rows = sqlx::query_as::<_, ReadingRow>(
            r#"
            SELECT id, meter_id, previous_reading, current_reading, note, recorded_at
            FROM readings
            WHERE meter_id = $1
            ORDER BY recorded_at, id
            "#,
        )
        .bind(Uuid::from(meter_id))
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(reading_from_row).collect())
    }

    async fn invoices_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Invoice>, LedgerError> {
        if !self.customer_exists(customer_id).await? {
            return Err(LedgerError::CustomerNotFound(customer_id));
        }

        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, customer_id, reading_id, amount, issued_at
            FROM invoices
            WHERE customer_id = $1
            ORDER BY issued_at, id
            "#,
        )
        .bind(Uuid::from(customer_id))
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(invoice_from_row).collect())
    }

    async fn payments_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Payment>, LedgerError> {
        if !self.customer_exists(customer_id).await? {
            return Err(LedgerError::CustomerNotFound(customer_id));
        }

        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, customer_id, amount, paid_at
            FROM payments
            WHERE customer_id = $1
            ORDER BY paid_at, id
            "#,
        )
        .bind(Uuid::from(customer_id))
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(payment_from_row).collect())
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    #[instrument(skip(self, new), fields(title = %new.title))]
    async fn insert_expense(&self, new: NewExpense) -> Result<Expense, LedgerError> {
        debug!("Recording expense");

        let expense = Expense::new(new.title, new.amount, new.receipt_path);
        sqlx::query(
            r#"
            INSERT INTO expenses (id, title, amount, receipt_path, spent_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::from(expense.id))
        .bind(&expense.title)
        .bind(expense.amount.amount())
        .bind(expense.receipt_path.as_deref())
        .bind(expense.spent_at)
        .execute(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(expense)
    }

    async fn get_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, title, amount, receipt_path, spent_at
            FROM expenses
            WHERE id = $1
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::ExpenseNotFound(id))?;

        Ok(expense_from_row(row))
    }

    #[instrument(skip(self, update, id), fields(expense_id = %id))]
    async fn update_expense(
        &self,
        id: ExpenseId,
        update: ExpenseUpdate,
    ) -> Result<Expense, LedgerError> {
        // COALESCE keeps the stored receipt when no replacement was uploaded
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET title = $2,
                amount = $3,
                receipt_path = COALESCE($4, receipt_path)
            WHERE id = $1
            RETURNING id, title, amount, receipt_path, spent_at
            "#,
        )
        .bind(Uuid::from(id))
        .bind(&update.title)
        .bind(update.amount.amount())
        .bind(update.receipt_path.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::ExpenseNotFound(id))?;

        Ok(expense_from_row(row))
    }

    #[instrument(skip(self, id), fields(expense_id = %id))]
    async fn delete_expense(&self, id: ExpenseId) -> Result<Expense, LedgerError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            DELETE FROM expenses
            WHERE id = $1
            RETURNING id, title, amount, receipt_path, spent_at
            "#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(to_ledger_error)?
        .ok_or(LedgerError::ExpenseNotFound(id))?;

        debug!("Expense deleted");
        Ok(expense_from_row(row))
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, title, amount, receipt_path, spent_at
            FROM expenses
            ORDER BY spent_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(expense_from_row).collect())
    }

    // ========================================================================
    // Settings
    // ========================================================================

    async fn get_setting(&self, key: &str) -> Result<Option<String>, LedgerError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(to_ledger_error)
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(())
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    async fn dashboard_summary(&self) -> Result<DashboardSummary, LedgerError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                COALESCE((SELECT SUM(amount) FROM payments), 0) AS total_income,
                COALESCE((SELECT SUM(amount) FROM expenses), 0) AS total_expenses,
                COALESCE((SELECT SUM(-wallet_balance) FROM customers WHERE wallet_balance < 0), 0) AS total_debts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(DashboardSummary::from_totals(
            Money::new(row.total_income),
            Money::new(row.total_expenses),
            Money::new(row.total_debts),
        ))
    }

    async fn customer_report(&self) -> Result<Vec<CustomerReportRow>, LedgerError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT
                c.id AS customer_id,
                c.full_name,
                c.wallet_balance,
                m.serial_number,
                r.previous_reading,
                r.current_reading,
                r.note,
                i.amount AS last_invoice_amount
            FROM customers c
            JOIN meters m ON m.customer_id = c.id
            LEFT JOIN LATERAL (
                SELECT id, previous_reading, current_reading, note
                FROM readings
                WHERE meter_id = m.id
                ORDER BY recorded_at DESC, id DESC
                LIMIT 1
            ) r ON TRUE
            LEFT JOIN invoices i ON i.reading_id = r.id
            ORDER BY c.created_at, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_ledger_error)?;

        Ok(rows.into_iter().map(report_from_row).collect())
    }
}

// ============================================================================
// Row types and converters
// ============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    full_name: String,
    phone: String,
    wallet_balance: Decimal,
    created_at: DateTime<Utc>,
}

fn customer_from_row(row: CustomerRow) -> Customer {
    Customer {
        id: CustomerId::from(row.id),
        full_name: row.full_name,
        phone: row.phone,
        wallet_balance: Money::new(row.wallet_balance),
        created_at: row.created_at,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MeterRow {
    id: Uuid,
    serial_number: String,
    customer_id: Uuid,
    last_reading: i64,
    installed_at: DateTime<Utc>,
}

fn meter_from_row(row: MeterRow) -> Meter {
    Meter {
        id: MeterId::from(row.id),
        serial_number: row.serial_number,
        customer_id: CustomerId::from(row.customer_id),
        last_reading: row.last_reading,
        installed_at: row.installed_at,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReadingRow {
    id: Uuid,
    meter_id: Uuid,
    previous_reading: i64,
    current_reading: i64,
    note: Option<String>,
    recorded_at: DateTime<Utc>,
}

fn reading_from_row(row: ReadingRow) -> Reading {
    Reading {
        id: ReadingId::from(row.id),
        meter_id: MeterId::from(row.meter_id),
        previous_reading: row.previous_reading,
        current_reading: row.current_reading,
        note: row.note,
        recorded_at: row.recorded_at,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    customer_id: Uuid,
    reading_id: Uuid,
    amount: Decimal,
    issued_at: DateTime<Utc>,
}

fn invoice_from_row(row: InvoiceRow) -> Invoice {
    Invoice {
        id: InvoiceId::from(row.id),
        customer_id: CustomerId::from(row.customer_id),
        reading_id: ReadingId::from(row.reading_id),
        amount: Money::new(row.amount),
        issued_at: row.issued_at,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    customer_id: Uuid,
    amount: Decimal,
    paid_at: DateTime<Utc>,
}

fn payment_from_row(row: PaymentRow) -> Payment {
    Payment {
        id: PaymentId::from(row.id),
        customer_id: CustomerId::from(row.customer_id),
        amount: Money::new(row.amount),
        paid_at: row.paid_at,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: Uuid,
    title: String,
    amount: Decimal,
    receipt_path: Option<String>,
    spent_at: DateTime<Utc>,
}

fn expense_from_row(row: ExpenseRow) -> Expense {
    Expense {
        id: ExpenseId::from(row.id),
        title: row.title,
        amount: Money::new(row.amount),
        receipt_path: row.receipt_path,
        spent_at: row.spent_at,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    total_income: Decimal,
    total_expenses: Decimal,
    total_debts: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    customer_id: Uuid,
    full_name: String,
    wallet_balance: Decimal,
    serial_number: String,
    previous_reading: Option<i64>,
    current_reading: Option<i64>,
    note: Option<String>,
    last_invoice_amount: Option<Decimal>,
}

fn report_from_row(row: ReportRow) -> CustomerReportRow {
    // a meter with no readings yet reports zeros
    let previous_reading = row.previous_reading.unwrap_or(0);
    let current_reading = row.current_reading.unwrap_or(0);
    CustomerReportRow {
        customer_id: CustomerId::from(row.customer_id),
        full_name: row.full_name,
        serial_number: row.serial_number,
        previous_reading,
        current_reading,
        consumption: current_reading - previous_reading,
        last_invoice_amount: row
            .last_invoice_amount
            .map(Money::new)
            .unwrap_or_else(Money::zero),
        note: row.note,
        wallet_balance: Money::new(row.wallet_balance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_customer_row_conversion() {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let row = CustomerRow {
            id,
            full_name: "Asha Mwangi".to_string(),
            phone: "0712345678".to_string(),
            wallet_balance: dec!(-1500.00),
            created_at: now,
        };

        let customer = customer_from_row(row);
        assert_eq!(customer.id, CustomerId::from(id));
        assert_eq!(customer.full_name, "Asha Mwangi");
        assert_eq!(customer.wallet_balance, Money::new(dec!(-1500.00)));
        assert!(customer.owes());
        assert_eq!(customer.created_at, now);
    }

    #[test]
    fn test_meter_row_conversion() {
        let row = MeterRow {
            id: Uuid::now_v7(),
            serial_number: "WM-0042".to_string(),
            customer_id: Uuid::now_v7(),
            last_reading: 180,
            installed_at: Utc::now(),
        };

        let meter = meter_from_row(row);
        assert_eq!(meter.serial_number, "WM-0042");
        assert_eq!(meter.last_reading, 180);
    }

    #[test]
    fn test_reading_row_keeps_note() {
        let row = ReadingRow {
            id: Uuid::now_v7(),
            meter_id: Uuid::now_v7(),
            previous_reading: 100,
            current_reading: 150,
            note: Some("front tap".to_string()),
            recorded_at: Utc::now(),
        };

        let reading = reading_from_row(row);
        assert_eq!(reading.consumption(), 50);
        assert_eq!(reading.note.as_deref(), Some("front tap"));
    }

    #[test]
    fn test_report_row_defaults_without_readings() {
        let row = ReportRow {
            customer_id: Uuid::now_v7(),
            full_name: "Fresh Customer".to_string(),
            wallet_balance: dec!(0),
            serial_number: "WM-0099".to_string(),
            previous_reading: None,
            current_reading: None,
            note: None,
            last_invoice_amount: None,
        };

        let report = report_from_row(row);
        assert_eq!(report.previous_reading, 0);
        assert_eq!(report.current_reading, 0);
        assert_eq!(report.consumption, 0);
        assert!(report.last_invoice_amount.is_zero());
        assert!(report.note.is_none());
    }

    #[test]
    fn test_report_row_flattens_latest_reading() {
        let row = ReportRow {
            customer_id: Uuid::now_v7(),
            full_name: "Metered Customer".to_string(),
            wallet_balance: dec!(-3000),
            serial_number: "WM-0007".to_string(),
            previous_reading: Some(120),
            current_reading: Some(150),
            note: Some("rear tap".to_string()),
            last_invoice_amount: Some(dec!(3000)),
        };

        let report = report_from_row(row);
        assert_eq!(report.consumption, 30);
        assert_eq!(report.last_invoice_amount, Money::new(dec!(3000)));
        assert_eq!(report.wallet_balance, Money::new(dec!(-3000)));
    }
}
