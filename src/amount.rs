use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::AmountParseError;
use crate::ntypes::Zero;

/// A monetary amount.
///
/// Wraps an arbitrary precision `Decimal`; sums and comparisons never
/// go through floating point. Equality is by value, so `1.0 == 1.00`.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(d: Decimal) -> Amount {
        Amount(d)
    }

    /// Returns the underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Amount {
        Amount(self.0.abs())
    }

    /// Ratio `self / max` as a float, for proportional rendering only.
    /// Returns `0.0` when `max` is zero.
    pub fn ratio_of(&self, max: Amount) -> f64 {
        if max.is_zero() {
            return 0.0;
        }

        (self.0 / max.0).to_f64().unwrap_or(0.0)
    }
}

impl Zero for Amount {
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Amount(d)
    }
}

impl From<i64> for Amount {
    fn from(n: i64) -> Self {
        Amount(Decimal::from(n))
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parses a plain decimal literal such as `"1234.56"` or `"-12"`.
    /// Surrounding whitespace is ignored; anything else that is not a
    /// decimal number is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str_exact(trimmed)
            .map(Amount)
            .map_err(|_| AmountParseError {
                literal: s.to_string(),
            })
    }
}

impl Add<Amount> for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Add<&Amount> for Amount {
    type Output = Amount;
    fn add(self, rhs: &Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign<Amount> for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += rhs.0;
    }
}

impl Sum<Amount> for Amount {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Amount>,
    {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Amount>,
    {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
