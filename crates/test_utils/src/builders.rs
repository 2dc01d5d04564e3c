//! Test Data Builders
//!
//! Provides builder patterns for constructing domain entities with sensible
//! defaults. Tests specify only the fields they care about and take the
//! defaults for everything else.

use chrono::{DateTime, Utc};
use core_kernel::{CustomerId, MeterId, Money};
use domain_ledger::{Customer, Expense, Meter, Reading};
use rust_decimal_macros::dec;

use crate::fixtures::{StringFixtures, TemporalFixtures};

/// Builder for test customers
pub struct CustomerBuilder {
    id: CustomerId,
    full_name: String,
    phone: String,
    wallet_balance: Money,
    created_at: DateTime<Utc>,
}

impl Default for CustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: CustomerId::new_v7(),
            full_name: StringFixtures::full_name().to_string(),
            phone: StringFixtures::phone().to_string(),
            wallet_balance: Money::zero(),
            created_at: TemporalFixtures::year_start(),
        }
    }

    /// Sets the customer ID
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = id;
        self
    }

    /// Sets the full name
    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = name.into();
        self
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the wallet balance
    pub fn with_balance(mut self, balance: Money) -> Self {
        self.wallet_balance = balance;
        self
    }

    /// Puts the customer in debt by the given positive amount
    pub fn in_debt_by(mut self, amount: Money) -> Self {
        self.wallet_balance = -amount;
        self
    }

    /// Sets the registration timestamp
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        Customer {
            id: self.id,
            full_name: self.full_name,
            phone: self.phone,
            wallet_balance: self.wallet_balance,
            created_at: self.created_at,
        }
    }
}

/// Builder for test meters
pub struct MeterBuilder {
    id: MeterId,
    serial_number: String,
    customer_id: CustomerId,
    last_reading: i64,
    installed_at: DateTime<Utc>,
}

impl Default for MeterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeterBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: MeterId::new_v7(),
            serial_number: StringFixtures::serial_number().to_string(),
            customer_id: CustomerId::new_v7(),
            last_reading: 0,
            installed_at: TemporalFixtures::year_start(),
        }
    }

    /// Sets the meter ID
    pub fn with_id(mut self, id: MeterId) -> Self {
        self.id = id;
        self
    }

    /// Sets the serial number
    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = serial.into();
        self
    }

    /// Attaches the meter to a customer
    pub fn for_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    /// Sets the current counter baseline
    pub fn with_last_reading(mut self, reading: i64) -> Self {
        self.last_reading = reading;
        self
    }

    /// Builds the meter
    pub fn build(self) -> Meter {
        Meter {
            id: self.id,
            serial_number: self.serial_number,
            customer_id: self.customer_id,
            last_reading: self.last_reading,
            installed_at: self.installed_at,
        }
    }
}

/// Builder for test readings
pub struct ReadingBuilder {
    meter_id: MeterId,
    previous_reading: i64,
    current_reading: i64,
    note: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl Default for ReadingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingBuilder {
    /// Creates a new builder for a 100 -> 150 reading
    pub fn new() -> Self {
        Self {
            meter_id: MeterId::new_v7(),
            previous_reading: 100,
            current_reading: 150,
            note: None,
            recorded_at: TemporalFixtures::mid_january(),
        }
    }

    /// Sets the meter the reading belongs to
    pub fn for_meter(mut self, meter_id: MeterId) -> Self {
        self.meter_id = meter_id;
        self
    }

    /// Sets both counter values
    pub fn with_counters(mut self, previous: i64, current: i64) -> Self {
        self.previous_reading = previous;
        self.current_reading = current;
        self
    }

    /// Attaches a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the recording timestamp
    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = at;
        self
    }

    /// Builds the reading
    pub fn build(self) -> Reading {
        let mut reading = Reading::new(
            self.meter_id,
            self.previous_reading,
            self.current_reading,
            self.note,
        );
        reading.recorded_at = self.recorded_at;
        reading
    }
}

/// Builder for test expenses
pub struct ExpenseBuilder {
    title: String,
    amount: Money,
    receipt_path: Option<String>,
}

impl Default for ExpenseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            title: StringFixtures::expense_title().to_string(),
            amount: Money::new(dec!(1200)),
            receipt_path: None,
        }
    }

    /// Sets the expense title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Attaches a stored receipt path
    pub fn with_receipt(mut self, path: impl Into<String>) -> Self {
        self.receipt_path = Some(path.into());
        self
    }

    /// Builds the expense
    pub fn build(self) -> Expense {
        Expense::new(self.title, self.amount, self.receipt_path)
    }
}
