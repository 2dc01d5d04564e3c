//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the billing
//! system. The deterministic fixtures keep unit tests predictable; the
//! `random_*` helpers produce realistic values that will not collide when
//! tests share a database.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{CustomerId, ExpenseId, MeterId, Money, ReadingId};
use domain_ledger::UnitPrice;
use fake::faker::name::en::Name;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The tariff most tests bill against
    pub fn unit_price_100() -> UnitPrice {
        UnitPrice::new(Money::new(dec!(100)))
    }

    /// A typical payment covering fifty units at the standard tariff
    pub fn payment_5000() -> Money {
        Money::new(dec!(5000))
    }

    /// A small operating expense with a fractional amount
    pub fn small_expense() -> Money {
        Money::new(dec!(450.50))
    }

    /// Zero, for wallet-balance assertions
    pub fn zero() -> Money {
        Money::zero()
    }

    /// A negative amount for rejection tests
    pub fn negative() -> Money {
        Money::new(dec!(-250))
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Start of the billing year used in deterministic tests
    pub fn year_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    /// A mid-month timestamp, after `year_start`
    pub fn mid_january() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
    }

    /// The following month's reading day
    pub fn february_reading_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 15, 9, 30, 0).unwrap()
    }
}

static FIXED_CUSTOMER_ID: Lazy<CustomerId> = Lazy::new(|| {
    CustomerId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
});

static FIXED_METER_ID: Lazy<MeterId> = Lazy::new(|| {
    MeterId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
});

static FIXED_READING_ID: Lazy<ReadingId> = Lazy::new(|| {
    ReadingId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
});

static FIXED_EXPENSE_ID: Lazy<ExpenseId> = Lazy::new(|| {
    ExpenseId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
});

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic customer ID for testing
    pub fn customer_id() -> CustomerId {
        *FIXED_CUSTOMER_ID
    }

    /// Creates a deterministic meter ID for testing
    pub fn meter_id() -> MeterId {
        *FIXED_METER_ID
    }

    /// Creates a deterministic reading ID for testing
    pub fn reading_id() -> ReadingId {
        *FIXED_READING_ID
    }

    /// Creates a deterministic expense ID for testing
    pub fn expense_id() -> ExpenseId {
        *FIXED_EXPENSE_ID
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Standard customer name
    pub fn full_name() -> &'static str {
        "Amina Okello"
    }

    /// Standard phone number
    pub fn phone() -> &'static str {
        "0712000001"
    }

    /// Standard meter serial number
    pub fn serial_number() -> &'static str {
        "WM-2025-0001"
    }

    /// Standard expense title
    pub fn expense_title() -> &'static str {
        "Pump fuel"
    }

    /// A realistic random full name
    pub fn random_full_name() -> String {
        Name().fake()
    }

    /// A phone number that will not collide across tests sharing a database
    pub fn random_phone() -> String {
        let digits = Uuid::new_v4().as_u128() % 100_000_000;
        format!("07{digits:08}")
    }

    /// A meter serial unlikely to repeat within a test run
    pub fn random_serial_number() -> String {
        let suffix = Uuid::new_v4().as_u128() % 100_000;
        format!("WM-{suffix:05}")
    }
}
