//! Money value type
//!
//! All fee computations go through [`Money`], a thin wrapper over an exact
//! `Decimal`. Repeated `plus`/`minus` round trips never drift.
//!
//! Rounding rule: arithmetic is exact within the 28 significant digits a
//! `Decimal` carries. A product that would need more digits (only reachable
//! through [`Money::times`] with a non-terminating factor such as a 1/3
//! duration ratio) is rounded to 28 significant digits. Nothing else rounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

/// Exact monetary amount
///
/// Equality, ordering and hashing are by decimal value, so `1.0` and `1.00`
/// are the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create an amount from a whole number of won
    pub fn wons(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Create an amount from an exact decimal
    pub fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal magnitude
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn plus(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }

    #[inline]
    pub fn minus(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }

    /// Scale by a factor (percentages, per-unit multipliers, quantities)
    #[inline]
    pub fn times(self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }

    pub fn is_less_than(&self, other: &Money) -> bool {
        self.0 < other.0
    }

    pub fn is_at_least(&self, other: &Money) -> bool {
        self.0 >= other.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.plus(rhs)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        self.minus(rhs)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, rhs: Decimal) -> Money {
        self.times(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::plus)
    }
}
