//! Fixed-point currency amount
//!
//! [`Amount`] stores whole currency units and hundredths (sub-units) as
//! integers so that sums of fines never drift the way binary floating point
//! does. There is no negative amount: subtraction saturates at zero and
//! multiplication ignores the sign of its multiplier.
//!
//! | Operation        | Result   | Notes                                        |
//! |------------------|----------|----------------------------------------------|
//! | `Amount + Amount`| `Amount` | Sub-units carry into units.                  |
//! | `Amount - Amount`| `Amount` | Borrows one unit; saturates at zero.         |
//! | `Amount * i64`   | `Amount` | Absolute value of the multiplier.            |
//! | `Amount * f64`   | `Amount` | Truncates to hundredths; only lossy entry.   |
//!
//! Overflowing the unit range saturates at [`Amount::MAX`].
//!
//! On the wire an amount is a single non-negative number (see
//! [`Amount::encode`] and [`Amount::decode`]).

use crate::format::NumericFormat;
use crate::types::error::FineError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;

/// Number of sub-units in one whole unit
pub const SUB_UNITS_PER_UNIT: u64 = 100;

/// Largest valid sub-unit value
const MAX_SUB_UNITS: u8 = 99;

/// Fixed-point currency value made of whole units and hundredths
///
/// Ordering is lexicographic on `(units, sub_units)`, which the derived
/// implementations provide through field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    units: u64,
    sub_units: u8,
}

impl Amount {
    /// The zero amount
    pub const ZERO: Amount = Amount {
        units: 0,
        sub_units: 0,
    };

    /// Largest representable amount, used when arithmetic saturates
    pub const MAX: Amount = Amount {
        units: u64::MAX,
        sub_units: MAX_SUB_UNITS,
    };

    /// Create an amount from whole units and sub-units
    ///
    /// Sub-units above 99 are clamped to 99, they do not carry.
    pub fn new(units: u64, sub_units: u8) -> Self {
        Amount {
            units,
            sub_units: sub_units.min(MAX_SUB_UNITS),
        }
    }

    /// Whole currency units
    pub fn units(&self) -> u64 {
        self.units
    }

    /// Hundredths, always within `0..=99`
    pub fn sub_units(&self) -> u8 {
        self.sub_units
    }

    /// Whether both components are zero
    pub fn is_zero(&self) -> bool {
        self.units == 0 && self.sub_units == 0
    }

    /// The amount expressed in sub-units only
    pub fn total_sub_units(&self) -> u128 {
        u128::from(self.units) * u128::from(SUB_UNITS_PER_UNIT) + u128::from(self.sub_units)
    }

    /// Build an amount from a count of sub-units, saturating at [`Amount::MAX`]
    pub fn from_total_sub_units(total: u128) -> Self {
        let per_unit = u128::from(SUB_UNITS_PER_UNIT);
        match u64::try_from(total / per_unit) {
            Ok(units) => Amount {
                units,
                sub_units: (total % per_unit) as u8,
            },
            Err(_) => Amount::MAX,
        }
    }

    /// Floating view of the amount, `units + sub_units / 100`
    ///
    /// The division is correctly rounded, so the result is the double closest
    /// to the decimal value. Only amounts below 10^15 sub-units survive the
    /// trip back through [`Amount::decode`].
    pub fn as_f64(&self) -> f64 {
        self.total_sub_units() as f64 / SUB_UNITS_PER_UNIT as f64
    }

    /// Decompose a floating value into an amount
    ///
    /// Takes the absolute value and truncates below hundredths, so
    /// `12.345` becomes `12.34`. NaN maps to zero and values beyond the unit
    /// range saturate.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Amount::ZERO;
        }
        match decimal_from_f64(value.abs()) {
            Some(decimal) => Amount::from_decimal_truncated(decimal),
            None => Amount::MAX,
        }
    }

    /// Decode the single-scalar wire representation
    ///
    /// # Errors
    ///
    /// Returns [`FineError::NegativeAmount`] if `scalar` is below zero.
    pub fn decode(scalar: f64) -> Result<Self, FineError> {
        if scalar < 0.0 {
            return Err(FineError::negative_amount(scalar));
        }
        Ok(Amount::from_f64(scalar))
    }

    /// Encode to the single-scalar wire representation
    ///
    /// The round trip through a floating scalar is the storage format of the
    /// backend. [`Amount::decode`] reads back the same amount for every value
    /// below 10^15 sub-units (15 significant digits). Above that the double
    /// no longer tells neighbouring hundredths apart.
    pub fn encode(&self) -> f64 {
        self.as_f64()
    }

    /// Convert an exact decimal, truncating below hundredths
    ///
    /// # Errors
    ///
    /// Returns [`FineError::NegativeAmount`] for values below zero.
    pub fn from_decimal(value: Decimal) -> Result<Self, FineError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(FineError::negative_amount(value));
        }
        Ok(Amount::from_decimal_truncated(value))
    }

    /// Numeric text with a two-digit sub-unit part
    ///
    /// `Decimal` gives `"12,05"`, `Payment` gives `"12.05"` as expected by the
    /// payment gateway. Grouping and currency symbols are the business of an
    /// [`AmountFormatter`](crate::core::AmountFormatter).
    pub fn to_numeric_string(&self, format: NumericFormat) -> String {
        format!(
            "{}{}{:02}",
            self.units,
            format.separator(),
            self.sub_units
        )
    }

    fn from_decimal_truncated(value: Decimal) -> Self {
        value
            .abs()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|sub_units| sub_units.trunc().to_u128())
            .map(Amount::from_total_sub_units)
            .unwrap_or(Amount::MAX)
    }
}

/// Shortest decimal that reads back as `value`
///
/// Going through the shortest round-trip text keeps `0.29` at `0.29` instead
/// of the `0.28999...` stored in the double.
fn decimal_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        Decimal::from_i128_with_scale(amount.total_sub_units() as i128, 2)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_numeric_string(NumericFormat::Payment))
    }
}

impl FromStr for Amount {
    type Err = FineError;

    /// Parse amount text such as `"12"`, `"12.5"` or `"12,50"`
    ///
    /// Either `.` or `,` is accepted as the decimal mark. Digits beyond the
    /// hundredths are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.replace(',', ".");
        let value = Decimal::from_str(&normalized).map_err(|_| FineError::invalid_amount(s))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(FineError::negative_amount(trimmed));
        }
        Ok(Amount::from_decimal_truncated(value))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        let sub_units = u64::from(self.sub_units) + u64::from(rhs.sub_units);
        let units = self
            .units
            .saturating_add(rhs.units)
            .saturating_add(sub_units / SUB_UNITS_PER_UNIT);
        Amount::new(units, (sub_units % SUB_UNITS_PER_UNIT) as u8)
    }
}

impl Sub for Amount {
    type Output = Amount;

    /// Subtract with borrow; a result below zero saturates to zero
    fn sub(self, rhs: Amount) -> Amount {
        let sub_units = i16::from(self.sub_units) - i16::from(rhs.sub_units);
        let borrow = u64::from(sub_units < 0);
        match self
            .units
            .checked_sub(rhs.units)
            .and_then(|units| units.checked_sub(borrow))
        {
            Some(units) => Amount::new(units, sub_units.rem_euclid(100) as u8),
            None => Amount::ZERO,
        }
    }
}

impl Mul<u64> for Amount {
    type Output = Amount;

    fn mul(self, multiplier: u64) -> Amount {
        self.total_sub_units()
            .checked_mul(u128::from(multiplier))
            .map(Amount::from_total_sub_units)
            .unwrap_or(Amount::MAX)
    }
}

impl Mul<u32> for Amount {
    type Output = Amount;

    fn mul(self, multiplier: u32) -> Amount {
        self * u64::from(multiplier)
    }
}

impl Mul<i64> for Amount {
    type Output = Amount;

    /// Multiply by the absolute value of `multiplier`
    fn mul(self, multiplier: i64) -> Amount {
        self * multiplier.unsigned_abs()
    }
}

impl Mul<f64> for Amount {
    type Output = Amount;

    /// Multiply by the absolute value of a floating multiplier
    ///
    /// The product is computed in decimal and truncated to hundredths. The
    /// conversion of `multiplier` from binary floating point is the only
    /// rounding this type ever performs. NaN yields zero.
    fn mul(self, multiplier: f64) -> Amount {
        if multiplier.is_nan() || self.is_zero() {
            return Amount::ZERO;
        }
        decimal_from_f64(multiplier.abs())
            .and_then(|multiplier| Decimal::from(self).checked_mul(multiplier))
            .map(Amount::from_decimal_truncated)
            .unwrap_or(Amount::MAX)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        *self = *self - rhs;
    }
}

impl MulAssign<u64> for Amount {
    fn mul_assign(&mut self, multiplier: u64) {
        *self = *self * multiplier;
    }
}

impl MulAssign<i64> for Amount {
    fn mul_assign(&mut self, multiplier: i64) {
        *self = *self * multiplier;
    }
}

impl MulAssign<f64> for Amount {
    fn mul_assign(&mut self, multiplier: f64) {
        *self = *self * multiplier;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.encode())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let scalar = f64::deserialize(deserializer)?;
        Amount::decode(scalar).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_carry(Amount::new(1, 20), Amount::new(2, 30), Amount::new(3, 50))]
    #[case::carry(Amount::new(1, 60), Amount::new(2, 50), Amount::new(4, 10))]
    #[case::exact_carry(Amount::new(0, 50), Amount::new(0, 50), Amount::new(1, 0))]
    #[case::zero(Amount::ZERO, Amount::new(7, 7), Amount::new(7, 7))]
    fn test_add(#[case] a: Amount, #[case] b: Amount, #[case] expected: Amount) {
        assert_eq!(a + b, expected);
        assert_eq!(b + a, expected);
    }

    #[rstest]
    #[case::no_borrow(Amount::new(5, 75), Amount::new(2, 25), Amount::new(3, 50))]
    #[case::borrow(Amount::new(5, 10), Amount::new(2, 25), Amount::new(2, 85))]
    #[case::to_zero(Amount::new(2, 25), Amount::new(2, 25), Amount::ZERO)]
    #[case::saturate_units(Amount::new(1, 0), Amount::new(3, 0), Amount::ZERO)]
    #[case::saturate_by_borrow(Amount::new(2, 10), Amount::new(2, 20), Amount::ZERO)]
    fn test_subtract(#[case] a: Amount, #[case] b: Amount, #[case] expected: Amount) {
        assert_eq!(a - b, expected);
    }

    #[rstest]
    #[case(Amount::new(12, 34), Amount::new(0, 99))]
    #[case(Amount::new(0, 1), Amount::new(0, 99))]
    #[case(Amount::new(100, 0), Amount::new(57, 50))]
    fn test_add_then_subtract_restores(#[case] a: Amount, #[case] b: Amount) {
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn test_subtract_self_is_zero() {
        let amount = Amount::new(42, 17);
        assert_eq!(amount - amount, Amount::ZERO);
    }

    #[rstest]
    #[case::two_fifty_times_three(Amount::new(2, 50), 3, Amount::new(7, 50))]
    #[case::carry_many(Amount::new(0, 99), 7, Amount::new(6, 93))]
    #[case::by_zero(Amount::new(3, 10), 0, Amount::ZERO)]
    #[case::by_one(Amount::new(3, 10), 1, Amount::new(3, 10))]
    fn test_multiply_integer(#[case] a: Amount, #[case] m: u64, #[case] expected: Amount) {
        assert_eq!(a * m, expected);
    }

    #[rstest]
    #[case(Amount::new(2, 50), 3)]
    #[case(Amount::new(0, 37), 11)]
    #[case(Amount::new(9, 99), 25)]
    fn test_multiply_matches_repeated_addition(#[case] a: Amount, #[case] m: u64) {
        let repeated: Amount = std::iter::repeat(a).take(m as usize).sum();
        assert_eq!(a * m, repeated);
    }

    #[test]
    fn test_multiply_ignores_sign() {
        assert_eq!(Amount::new(1, 0) * -4i64, Amount::new(1, 0) * 4i64);
        assert_eq!(Amount::new(1, 0) * -4i64, Amount::new(4, 0));
    }

    #[rstest]
    #[case::half(Amount::new(10, 0), 0.5, Amount::new(5, 0))]
    #[case::one_and_half(Amount::new(2, 50), 1.5, Amount::new(3, 75))]
    #[case::negative(Amount::new(10, 0), -0.5, Amount::new(5, 0))]
    #[case::no_binary_drift(Amount::new(1, 0), 0.29, Amount::new(0, 29))]
    #[case::truncates(Amount::new(1, 0), 0.125, Amount::new(0, 12))]
    #[case::nan(Amount::new(1, 0), f64::NAN, Amount::ZERO)]
    fn test_multiply_float(#[case] a: Amount, #[case] m: f64, #[case] expected: Amount) {
        assert_eq!(a * m, expected);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(Amount::MAX * 2u64, Amount::MAX);
        assert_eq!((Amount::MAX + Amount::new(1, 0)).units(), u64::MAX);
    }

    #[rstest]
    #[case::units_first(Amount::new(1, 99), Amount::new(2, 0))]
    #[case::sub_units(Amount::new(2, 5), Amount::new(2, 50))]
    #[case::zero(Amount::ZERO, Amount::new(0, 1))]
    fn test_ordering(#[case] smaller: Amount, #[case] larger: Amount) {
        assert!(smaller < larger);
        assert!(larger > smaller);
        assert_ne!(smaller, larger);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Amount::new(2, 0), Amount::new(2, 0));
    }

    #[test]
    fn test_new_clamps_sub_units() {
        assert_eq!(Amount::new(3, 250), Amount::new(3, 99));
    }

    #[rstest]
    #[case::truncation(12.345, Amount::new(12, 34))]
    #[case::whole(7.0, Amount::new(7, 0))]
    #[case::small(0.29, Amount::new(0, 29))]
    #[case::zero(0.0, Amount::ZERO)]
    fn test_decode(#[case] scalar: f64, #[case] expected: Amount) {
        assert_eq!(Amount::decode(scalar), Ok(expected));
    }

    #[test]
    fn test_decode_negative_fails() {
        let result = Amount::decode(-0.01);
        assert!(matches!(result, Err(FineError::NegativeAmount { .. })));
    }

    #[test]
    fn test_from_f64_takes_absolute_value() {
        assert_eq!(Amount::from_f64(-3.5), Amount::new(3, 50));
        assert_eq!(Amount::from_f64(f64::INFINITY), Amount::MAX);
    }

    #[rstest]
    #[case(Amount::new(12, 34))]
    #[case(Amount::new(0, 1))]
    #[case(Amount::new(1_000_000, 99))]
    #[case::largest_exact(Amount::new(9_999_999_999_999, 99))]
    fn test_encode_decode(#[case] amount: Amount) {
        assert_eq!(Amount::decode(amount.encode()), Ok(amount));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Amount::new(2, 50).as_f64(), 2.5);
    }

    #[rstest]
    #[case::comma("12,50", Amount::new(12, 50))]
    #[case::dot("12.5", Amount::new(12, 50))]
    #[case::whole(" 3 ", Amount::new(3, 0))]
    #[case::truncates("0.999", Amount::new(0, 99))]
    fn test_parse(#[case] input: &str, #[case] expected: Amount) {
        assert_eq!(input.parse::<Amount>(), Ok(expected));
    }

    #[rstest]
    #[case::negative("-1,00")]
    #[case::garbage("ten")]
    #[case::empty("")]
    fn test_parse_errors(#[case] input: &str) {
        assert!(input.parse::<Amount>().is_err());
    }

    #[test]
    fn test_parse_negative_reports_negative_amount() {
        assert_eq!(
            "-1,00".parse::<Amount>(),
            Err(FineError::NegativeAmount {
                amount: "-1,00".to_string()
            })
        );
    }

    #[rstest]
    #[case(Amount::new(12, 5), NumericFormat::Decimal, "12,05")]
    #[case(Amount::new(12, 5), NumericFormat::Payment, "12.05")]
    #[case(Amount::new(3, 0), NumericFormat::Payment, "3.00")]
    #[case(Amount::new(0, 40), NumericFormat::Decimal, "0,40")]
    fn test_numeric_string(
        #[case] amount: Amount,
        #[case] format: NumericFormat,
        #[case] expected: &str,
    ) {
        assert_eq!(amount.to_numeric_string(format), expected);
    }

    #[test]
    fn test_decimal_conversion() {
        let decimal: Decimal = Amount::new(12, 34).into();
        assert_eq!(decimal, Decimal::new(1234, 2));
        assert_eq!(Amount::from_decimal(decimal), Ok(Amount::new(12, 34)));
        assert!(Amount::from_decimal(Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&Amount::new(12, 34)).unwrap();
        assert_eq!(json, "12.34");
        let amount: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, Amount::new(12, 34));
        let amount: Amount = serde_json::from_str("5").unwrap();
        assert_eq!(amount, Amount::new(5, 0));
    }

    #[test]
    fn test_json_negative_is_rejected() {
        let result = serde_json::from_str::<Amount>("-2.5");
        assert!(result.is_err());
    }
}
