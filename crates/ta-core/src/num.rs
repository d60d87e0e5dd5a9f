//! Exact decimal number used for every price, ratio and indicator value.
//!
//! `Num` wraps [`rust_decimal::Decimal`] and adds a single `NaN` sentinel so
//! that degenerate arithmetic (division by zero, overflow, square root of a
//! negative value) yields a defined value instead of panicking.
//!
//! Rounding: addition and subtraction are exact. Multiplication, division and
//! square root round half-to-even to [`Num::SCALE`] fractional digits.
//!
//! Comparisons: the `is_*` predicates return `false` whenever either operand
//! is NaN. The [`Ord`] implementation is total: NaN equals itself and sorts
//! above every value.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Exact decimal value or the `NaN` sentinel.
#[derive(Clone, Copy)]
pub struct Num(Option<Decimal>);

impl Num {
    /// Fractional digits kept after multiplication, division and square root.
    pub const SCALE: u32 = 20;

    pub const ZERO: Num = Num(Some(Decimal::ZERO));
    pub const ONE: Num = Num(Some(Decimal::ONE));
    pub const TWO: Num = Num(Some(Decimal::TWO));
    pub const HUNDRED: Num = Num(Some(Decimal::ONE_HUNDRED));
    #[allow(non_upper_case_globals)]
    pub const NaN: Num = Num(None);

    /// Wrap a decimal value.
    pub const fn new(value: Decimal) -> Self {
        Num(Some(value))
    }

    /// Convert a float through its shortest decimal representation, so
    /// `0.1` becomes exactly `0.1`. Non-finite or unrepresentable inputs
    /// become NaN.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Num::NaN;
        }
        Num(Decimal::from_str(&value.to_string()).ok())
    }

    fn rounded(value: Option<Decimal>) -> Self {
        Num(value.map(|d| {
            d.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven)
        }))
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.0, Some(d) if d.is_zero())
    }

    pub fn is_positive(&self) -> bool {
        matches!(self.0, Some(d) if d > Decimal::ZERO)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self.0, Some(d) if d < Decimal::ZERO)
    }

    /// The underlying decimal, `None` for NaN.
    pub fn to_decimal(&self) -> Option<Decimal> {
        self.0
    }

    /// Lossy conversion for charting and reporting collaborators.
    pub fn to_f64(&self) -> f64 {
        self.0.and_then(|d| d.to_f64()).unwrap_or(f64::NAN)
    }

    pub fn plus(self, other: Num) -> Num {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Num(a.checked_add(b)),
            _ => Num::NaN,
        }
    }

    pub fn minus(self, other: Num) -> Num {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Num(a.checked_sub(b)),
            _ => Num::NaN,
        }
    }

    pub fn multiplied_by(self, other: Num) -> Num {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Num::rounded(a.checked_mul(b)),
            _ => Num::NaN,
        }
    }

    /// Division. A zero divisor yields [`Num::NaN`].
    pub fn divided_by(self, other: Num) -> Num {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Num::rounded(a.checked_div(b)),
            _ => Num::NaN,
        }
    }

    pub fn abs(self) -> Num {
        Num(self.0.map(|d| d.abs()))
    }

    /// Square root. Negative inputs yield [`Num::NaN`].
    pub fn sqrt(self) -> Num {
        Num::rounded(self.0.and_then(|d| d.sqrt()))
    }

    /// Integer power by repeated multiplication.
    pub fn pow(self, exponent: u32) -> Num {
        (0..exponent).fold(Num::ONE, |acc, _| acc.multiplied_by(self))
    }

    /// Smaller of the two values; NaN if either is NaN.
    pub fn min(self, other: Num) -> Num {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Num(Some(a.min(b))),
            _ => Num::NaN,
        }
    }

    /// Larger of the two values; NaN if either is NaN.
    pub fn max(self, other: Num) -> Num {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Num(Some(a.max(b))),
            _ => Num::NaN,
        }
    }

    fn compare(&self, other: &Num) -> Option<Ordering> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }

    pub fn is_equal(&self, other: Num) -> bool {
        self.compare(&other) == Some(Ordering::Equal)
    }

    pub fn is_greater_than(&self, other: Num) -> bool {
        self.compare(&other) == Some(Ordering::Greater)
    }

    pub fn is_greater_than_or_equal(&self, other: Num) -> bool {
        matches!(self.compare(&other), Some(Ordering::Greater | Ordering::Equal))
    }

    pub fn is_less_than(&self, other: Num) -> bool {
        self.compare(&other) == Some(Ordering::Less)
    }

    pub fn is_less_than_or_equal(&self, other: Num) -> bool {
        matches!(self.compare(&other), Some(Ordering::Less | Ordering::Equal))
    }
}

impl Default for Num {
    fn default() -> Self {
        Num::ZERO
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Num {}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Num {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        }
    }
}

impl From<Decimal> for Num {
    fn from(value: Decimal) -> Self {
        Num::new(value)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Num {
            fn from(value: $t) -> Self {
                Num::new(Decimal::from(value))
            }
        })*
    };
}

from_integer!(i32, i64, u32, u64, usize);

impl FromStr for Num {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("nan") {
            return Ok(Num::NaN);
        }
        Decimal::from_str(s.trim()).map(Num::new)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => fmt::Display::fmt(&d.normalize(), f),
            None => f.write_str("NaN"),
        }
    }
}

impl fmt::Debug for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Add for Num {
    type Output = Num;
    fn add(self, rhs: Num) -> Num {
        self.plus(rhs)
    }
}

impl Sub for Num {
    type Output = Num;
    fn sub(self, rhs: Num) -> Num {
        self.minus(rhs)
    }
}

impl Mul for Num {
    type Output = Num;
    fn mul(self, rhs: Num) -> Num {
        self.multiplied_by(rhs)
    }
}

impl Div for Num {
    type Output = Num;
    fn div(self, rhs: Num) -> Num {
        self.divided_by(rhs)
    }
}

impl Neg for Num {
    type Output = Num;
    fn neg(self) -> Num {
        Num(self.0.map(|d| -d))
    }
}

impl std::iter::Sum for Num {
    fn sum<I: Iterator<Item = Num>>(iter: I) -> Num {
        iter.fold(Num::ZERO, Num::plus)
    }
}

impl Serialize for Num {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct NumVisitor;

impl<'de> Visitor<'de> for NumVisitor {
    type Value = Num;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Num, E> {
        Num::from_str(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Num, E> {
        Ok(Num::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Num, E> {
        Ok(Num::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Num, E> {
        Ok(Num::from_f64(v))
    }
}

/// Accepts `"1.25"`, `"NaN"`, `3` and `1.25`, so configuration files can
/// write plain numbers.
impl<'de> Deserialize<'de> for Num {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn n(s: &str) -> Num {
        s.parse().unwrap()
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(n("1.0"), n("1.00"));
        assert!(n("1.0").is_equal(Num::ONE));
        assert_eq!(Num::from(10), Num::from(dec!(10.000)));
    }

    #[test]
    fn test_exact_arithmetic() {
        assert_eq!(n("0.1") + n("0.2"), n("0.3"));
        assert_eq!(n("10.5") - n("0.5"), Num::from(10));
        assert_eq!(n("1.5") * n("4"), Num::from(6));
        assert_eq!(Num::from(21) / Num::from(2), n("10.5"));
    }

    #[test]
    fn test_division_rounds_half_even() {
        let third = Num::ONE / Num::from(3);
        assert_eq!(third, n("0.33333333333333333333"));
        let two_thirds = Num::TWO / Num::from(3);
        assert_eq!(two_thirds, n("0.66666666666666666667"));
    }

    #[test]
    fn test_division_by_zero_is_nan() {
        let result = Num::ONE / Num::ZERO;
        assert!(result.is_nan());
        assert!((result + Num::ONE).is_nan());
        assert_eq!(result.to_string(), "NaN");
        assert!(result.to_f64().is_nan());
    }

    #[test]
    fn test_nan_comparisons_are_false() {
        let nan = Num::NaN;
        assert!(!nan.is_equal(nan));
        assert!(!nan.is_greater_than(Num::ZERO));
        assert!(!nan.is_less_than_or_equal(Num::ZERO));
        assert!(!Num::ZERO.is_greater_than_or_equal(nan));
    }

    #[test]
    fn test_total_ordering() {
        let mut values = vec![Num::NaN, n("2"), n("-1"), n("0.5")];
        values.sort();
        assert_eq!(values, vec![n("-1"), n("0.5"), n("2"), Num::NaN]);
        assert_eq!(Num::NaN, Num::NaN);
    }

    #[test]
    fn test_min_max_and_abs() {
        assert_eq!(n("3").min(n("2")), n("2"));
        assert_eq!(n("3").max(n("2")), n("3"));
        assert!(n("3").max(Num::NaN).is_nan());
        assert_eq!(n("-4.25").abs(), n("4.25"));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(Num::from(16).sqrt(), Num::from(4));
        assert_eq!(Num::ZERO.sqrt(), Num::ZERO);
        assert!(Num::from(-1).sqrt().is_nan());
    }

    #[test]
    fn test_pow() {
        assert_eq!(n("1.1").pow(2), n("1.21"));
        assert_eq!(n("7").pow(0), Num::ONE);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Num::from_f64(2.5), n("2.5"));
        assert!(Num::from_f64(f64::NAN).is_nan());
        assert!(Num::from_f64(f64::INFINITY).is_nan());
        assert_eq!(Num::from_f64(0.1), n("0.1"));
    }

    #[test]
    fn test_deserialize_accepts_numbers() {
        let values: Vec<Num> = serde_json::from_str(r#"["1.50", 3, 0.25, "NaN"]"#).unwrap();
        assert_eq!(values[0], n("1.5"));
        assert_eq!(values[1], Num::from(3));
        assert_eq!(values[2], n("0.25"));
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(n("10.500").to_string(), "10.5");
        assert_eq!(Num::from(3).to_string(), "3");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&n("1.25")).unwrap();
        assert_eq!(json, "\"1.25\"");
        let back: Num = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n("1.25"));
        let nan: Num = serde_json::from_str("\"NaN\"").unwrap();
        assert!(nan.is_nan());
    }
}
