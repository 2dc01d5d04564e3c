//! Money type with precise decimal arithmetic
//!
//! All monetary values in the system (invoice amounts, payments, wallet
//! balances, expenses) are represented as [`Money`], a thin wrapper around
//! [`rust_decimal::Decimal`]. Floating point never appears in financial
//! calculations.
//!
//! The operator runs in a single currency, so `Money` carries no currency
//! dimension; it is a signed amount where negative values represent debt.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount with exact decimal precision.
///
/// # Examples
///
/// ```
/// use core_kernel::Money;
/// use rust_decimal_macros::dec;
///
/// let invoice = Money::new(dec!(5000));
/// let payment = Money::new(dec!(3000));
/// let balance = payment - invoice;
///
/// assert!(balance.is_negative());
/// assert_eq!(balance.abs(), Money::new(dec!(2000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a monetary amount from a decimal value
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the underlying decimal value
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// True if the amount is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True if the amount is strictly negative (a debt when used as a balance)
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// True if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiplies the amount by a whole number of units.
    ///
    /// Used for consumption costing: `unit_price.times(consumed_units)`.
    pub fn times(&self, units: i64) -> Self {
        Self(self.0 * Decimal::from(units))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s)?))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_addition_and_subtraction() {
        let a = Money::new(dec!(100.50));
        let b = Money::new(dec!(50.25));

        assert_eq!(a + b, Money::new(dec!(150.75)));
        assert_eq!(a - b, Money::new(dec!(50.25)));
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(Money::new(dec!(0.01)).is_positive());
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_times_whole_units() {
        let unit_price = Money::new(dec!(100));
        assert_eq!(unit_price.times(50), Money::new(dec!(5000)));
        assert_eq!(unit_price.times(0), Money::zero());
        assert_eq!(unit_price.times(-3), Money::new(dec!(-300)));
    }

    #[test]
    fn test_sum_iterator() {
        let amounts = vec![
            Money::new(dec!(10)),
            Money::new(dec!(20.5)),
            Money::new(dec!(-5)),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::new(dec!(25.5)));
    }

    #[test]
    fn test_serde_transparent() {
        let m = Money::new(dec!(1234.56));
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn test_parse_from_string() {
        let m: Money = "250.75".parse().unwrap();
        assert_eq!(m, Money::new(dec!(250.75)));
        assert!("not a number".parse::<Money>().is_err());
    }
}
