use bigdecimal::{BigDecimal, RoundingMode, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use crate::errors::{PlacementError, Result};

/// significant digits kept by divisions (decimal128 context)
pub const WORKING_PRECISION: NonZeroU64 = match NonZeroU64::new(34) {
    Some(precision) => precision,
    None => unreachable!(),
};

/// round to `WORKING_PRECISION` significant digits, half-even
pub(crate) fn round_to_working_precision(value: BigDecimal) -> BigDecimal {
    if value.digits() <= WORKING_PRECISION.get() {
        return value;
    }
    value.with_precision_round(WORKING_PRECISION, RoundingMode::HalfEven)
}

/// exact conversion from a rust_decimal value
fn from_rust_decimal(d: Decimal) -> BigDecimal {
    BigDecimal::new(d.mantissa().into(), i64::from(d.scale()))
}

/// monetary amount with unbounded precision
///
/// Sums and products are exact. Only divisions go through
/// [`round_to_working_precision`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(BigDecimal);

impl Money {
    /// create from an exact big decimal
    pub fn new(value: BigDecimal) -> Self {
        Money(value)
    }

    pub fn zero() -> Self {
        Money(BigDecimal::zero())
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self> {
        BigDecimal::from_str(s)
            .map(Money)
            .map_err(|_| PlacementError::InvalidConfiguration {
                message: format!("not a decimal amount: {s}"),
            })
    }

    /// create from integer amount (euros, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(BigDecimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(BigDecimal::new(amount.into(), i64::from(scale)))
    }

    /// get underlying big decimal
    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > BigDecimal::zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::zero()
    }

    /// round half-up to `dp` decimal places for display
    pub fn round_dp(&self, dp: i64) -> Self {
        Money(self.0.with_scale_round(dp, RoundingMode::HalfUp))
    }

    /// presentation value as a rust_decimal, rounded to `dp` places
    pub fn to_decimal(&self, dp: u32) -> Result<Decimal> {
        let rounded = self.round_dp(i64::from(dp));
        Decimal::from_str(&rounded.to_string()).map_err(|_| PlacementError::PresentationOverflow {
            value: rounded.to_string(),
        })
    }

    /// round to the engine's working precision
    pub fn to_working_precision(&self) -> Money {
        Money(round_to_working_precision(self.0.clone()))
    }

    /// interest earned over `days` at a precomputed daily factor
    pub fn accrue(&self, daily_rate: &Rate, days: i64) -> Money {
        let daily = round_to_working_precision(&self.0 * daily_rate.as_big_decimal());
        Money(&daily * &BigDecimal::from(days))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl FromStr for Money {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money(from_rust_decimal(d))
    }
}

impl From<i64> for Money {
    fn from(i: i64) -> Self {
        Money::from_major(i)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i64::from(i))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(&self.0 + &other.0)
    }
}

impl<'a> Add<&'a Money> for &'a Money {
    type Output = Money;

    fn add(self, other: &Money) -> Money {
        Money(&self.0 + &other.0)
    }
}

impl AddAssign<&Money> for Money {
    fn add_assign(&mut self, other: &Money) {
        self.0 = &self.0 + &other.0;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = &self.0 + &other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(&self.0 - &other.0)
    }
}

impl<'a> Sub<&'a Money> for &'a Money {
    type Output = Money;

    fn sub(self, other: &Money) -> Money {
        Money(&self.0 - &other.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<i64> for &Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money(&self.0 * &BigDecimal::from(factor))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, x| acc + x)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

/// rate type for annual rates, stored as a fraction
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(BigDecimal);

impl Rate {
    pub fn zero() -> Self {
        Rate(BigDecimal::zero())
    }

    /// create from fraction (e.g., 0.05 for 5%)
    pub fn from_fraction(value: BigDecimal) -> Self {
        Rate(value)
    }

    /// create from string fraction with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self> {
        BigDecimal::from_str(s)
            .map(Rate)
            .map_err(|_| PlacementError::InvalidConfiguration {
                message: format!("not a decimal rate: {s}"),
            })
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(BigDecimal::new(p.into(), 2))
    }

    /// create from basis points (e.g., 300 for 3%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(BigDecimal::new(bps.into(), 4))
    }

    pub fn as_big_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> BigDecimal {
        &self.0 * &BigDecimal::from(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::zero()
    }

    /// daily rate from annual rate over a `year_basis`-day year
    pub fn daily_rate(&self, year_basis: u32) -> Rate {
        Rate(round_to_working_precision(&self.0 / &BigDecimal::from(year_basis)))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl FromStr for Rate {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self> {
        Rate::from_str_exact(s)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate(from_rust_decimal(d))
    }
}
