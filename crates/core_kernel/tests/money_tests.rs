//! Unit tests for the Money type
//!
//! Covers construction, conversion, arithmetic, ordering, formatting, and
//! the serde representation used on the wire.

use core_kernel::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

mod construction {
    use super::*;

    #[test]
    fn test_new_wraps_the_decimal_exactly() {
        let m = Money::new(dec!(100.50));
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_zero_and_default_agree() {
        assert_eq!(Money::zero(), Money::default());
        assert!(Money::default().is_zero());
    }

    #[test]
    fn test_decimal_conversions_roundtrip() {
        let amount = dec!(450.50);
        let money = Money::from(amount);
        assert_eq!(Decimal::from(money), amount);
    }

    #[test]
    fn test_from_str_parses_decimal_strings() {
        assert_eq!(Money::from_str("250.75").unwrap(), Money::new(dec!(250.75)));
        assert_eq!(Money::from_str("-500").unwrap(), Money::new(dec!(-500)));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(Money::from_str("a lot").is_err());
        assert!(Money::from_str("").is_err());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_neg_flips_the_sign() {
        let debt = -Money::new(dec!(5000));
        assert!(debt.is_negative());
        assert_eq!(-debt, Money::new(dec!(5000)));
    }

    #[test]
    fn test_assign_operators_accumulate() {
        let mut balance = Money::zero();
        balance += Money::new(dec!(5000));
        balance -= Money::new(dec!(1250.75));
        assert_eq!(balance, Money::new(dec!(3749.25)));
    }

    #[test]
    fn test_abs_turns_debt_into_owed_amount() {
        let balance = Money::new(dec!(-2500));
        assert_eq!(balance.abs(), Money::new(dec!(2500)));
        assert_eq!(Money::zero().abs(), Money::zero());
    }

    #[test]
    fn test_times_with_fractional_unit_price() {
        let unit_price = Money::new(dec!(12.5));
        assert_eq!(unit_price.times(4), Money::new(dec!(50)));
    }

    #[test]
    fn test_sum_over_owned_and_borrowed() {
        let amounts = [Money::new(dec!(10)), Money::new(dec!(2.5))];

        let owned: Money = amounts.into_iter().sum();
        let borrowed: Money = amounts.iter().sum();

        assert_eq!(owned, borrowed);
        assert_eq!(owned, Money::new(dec!(12.5)));
    }

    #[test]
    fn test_sum_of_empty_iterator_is_zero() {
        let total: Money = std::iter::empty::<Money>().sum();
        assert!(total.is_zero());
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_orders_by_signed_amount() {
        let mut amounts = vec![Money::new(dec!(5)), Money::new(dec!(-3)), Money::zero()];
        amounts.sort();
        assert_eq!(
            amounts,
            vec![Money::new(dec!(-3)), Money::zero(), Money::new(dec!(5))]
        );
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_display_is_the_plain_decimal() {
        assert_eq!(Money::new(dec!(1234.56)).to_string(), "1234.56");
        assert_eq!(Money::new(dec!(-500)).to_string(), "-500");
        assert_eq!(Money::zero().to_string(), "0");
    }
}

mod serde_representation {
    use super::*;

    #[test]
    fn test_serializes_as_bare_decimal_string() {
        let json = serde_json::to_string(&Money::new(dec!(5000))).unwrap();
        assert_eq!(json, "\"5000\"");
    }

    #[test]
    fn test_deserializes_from_string_and_number() {
        let from_string: Money = serde_json::from_str("\"450.50\"").unwrap();
        assert_eq!(from_string, Money::new(dec!(450.50)));

        let from_number: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(from_number, Money::new(dec!(2500)));
    }
}
