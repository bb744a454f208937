//! Money type for representing currency amounts
//!
//! Wraps an arbitrary-precision `Decimal` that is always held at exactly two
//! fractional digits. Every constructor and every arithmetic result is
//! rescaled with round-half-up, so aggregates never drift and `Display`
//! always prints two decimals.
//!
//! Amounts entered by users or read from disk are bounded by
//! [`MAX_AMOUNT`]. With that bound a sum would need tens of quadrillions of
//! entries to leave the `Decimal` range, and arithmetic saturates rather
//! than panicking if it ever did.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Number of fractional digits carried by every `Money` value
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude accepted for a single amount, in whole currency units
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// A monetary amount with fixed two-digit fractional precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

/// Round half-up (away from zero on ties) and pad to two decimals
fn normalize(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Plain or scientific decimal text: optional sign, digits with at most one
/// `.`, then an optional exponent. Digit group separators are not accepted.
fn is_decimal_token(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };

    let mut digits = 0;
    let mut points = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    if digits == 0 || points > 1 {
        return false;
    }

    match exponent {
        None => true,
        Some(e) => {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && e.chars().all(|c| c.is_ascii_digit())
        }
    }
}

impl Money {
    /// Create a Money amount from any decimal, rounding half-up to cents
    pub fn new(value: Decimal) -> Self {
        Self(normalize(value))
    }

    /// Create a Money amount, rejecting values outside [`MAX_AMOUNT`]
    pub fn try_new(value: Decimal) -> Result<Self, MoneyParseError> {
        let rounded = normalize(value);
        if rounded.scale() != MONEY_SCALE || rounded.abs() > Decimal::from(MAX_AMOUNT) {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        Ok(Self(rounded))
    }

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use wallet_ledger::models::Money;
    /// let amount = Money::from_cents(1050);
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Create a Money amount from a whole number of currency units
    pub fn from_major(units: i64) -> Self {
        Self::new(Decimal::from(units))
    }

    /// Create a zero Money amount
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Check that the magnitude does not exceed [`MAX_AMOUNT`]
    pub fn is_within_limit(&self) -> bool {
        self.0.abs() <= Decimal::from(MAX_AMOUNT)
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from user text
    ///
    /// Accepts either `.` or `,` as the decimal separator and plain or
    /// scientific notation ("12,5", "12.50", "1e3"). The result is rounded
    /// half-up to two decimals. Sign is preserved; callers that need a
    /// strictly positive amount check it themselves. Magnitudes above
    /// [`MAX_AMOUNT`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let cleaned = s.trim().replace(',', ".");
        if cleaned.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if !is_decimal_token(&cleaned) {
            return Err(MoneyParseError::InvalidFormat(s.trim().to_string()));
        }

        let value = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|_| MoneyParseError::InvalidFormat(s.trim().to_string()))?;
        Self::try_new(value).map_err(|_| MoneyParseError::OutOfRange(s.trim().to_string()))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            return self.to_string();
        }
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs())
        } else {
            format!("{}{}", symbol, self)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyParseError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let total = iter.fold(Decimal::ZERO, |acc, m| acc.saturating_add(m.0));
        Self::new(total)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount {} exceeds the maximum of {}", s, MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
