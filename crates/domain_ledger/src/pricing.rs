//! Unit price resolution
//!
//! The price per consumed unit is operator-configurable through the settings
//! store under [`UNIT_PRICE_KEY`]. Resolution never fails: an absent or
//! unparseable setting degrades to the fixed default rather than erroring,
//! because a missing configuration row must not stop billing.
//!
//! The resolved price is always passed *into* a billing protocol as an
//! explicit parameter. Protocols never read the setting mid-transaction, so
//! every invoice is costed at one consistent snapshot and later changes to
//! the setting never retroactively alter past invoices.

use core_kernel::Money;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings-store key holding the configured unit price
pub const UNIT_PRICE_KEY: &str = "unit_price";

/// Fallback applied when the setting is absent or malformed
pub fn default_unit_price() -> Money {
    Money::new(dec!(100))
}

/// A per-unit price snapshot, locked in for the duration of one protocol run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice(Money);

impl UnitPrice {
    pub fn new(per_unit: Money) -> Self {
        Self(per_unit)
    }

    pub fn per_unit(&self) -> Money {
        self.0
    }

    /// Resolves a raw setting value, falling back to the default.
    ///
    /// `None` (no row), empty strings, and non-numeric garbage all resolve
    /// to the default; this is a degraded default, not an error.
    pub fn from_setting(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<Money>().ok())
            .map(Self)
            .unwrap_or_default()
    }

    /// Cost of a whole number of consumed units at this price
    pub fn cost_of(&self, units: i64) -> Money {
        self.0.times(units)
    }
}

impl Default for UnitPrice {
    fn default() -> Self {
        Self(default_unit_price())
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_setting_resolves_to_default() {
        assert_eq!(UnitPrice::from_setting(None).per_unit(), Money::new(dec!(100)));
    }

    #[test]
    fn test_garbage_setting_resolves_to_default() {
        assert_eq!(
            UnitPrice::from_setting(Some("not a price")).per_unit(),
            Money::new(dec!(100))
        );
        assert_eq!(UnitPrice::from_setting(Some("")).per_unit(), Money::new(dec!(100)));
    }

    #[test]
    fn test_valid_setting_is_used() {
        let price = UnitPrice::from_setting(Some("250.50"));
        assert_eq!(price.per_unit(), Money::new(dec!(250.50)));

        // surrounding whitespace is tolerated
        let price = UnitPrice::from_setting(Some("  75 "));
        assert_eq!(price.per_unit(), Money::new(dec!(75)));
    }

    #[test]
    fn test_cost_of_units() {
        let price = UnitPrice::new(Money::new(dec!(100)));
        assert_eq!(price.cost_of(50), Money::new(dec!(5000)));
        assert_eq!(price.cost_of(0), Money::zero());
    }
}
