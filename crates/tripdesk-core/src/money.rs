//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! lenient parser that turns operator keystrokes into amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    "0.10" → 10, "0.20" → 20, 10 + 20 = 30  ✅                           │
//! │                                                                         │
//! │  Operator text is parsed as an exact decimal (rust_decimal), rounded   │
//! │  to two places, then stored as an i64 count of minor units.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Parsing
//! Every amount on the drafting form is free text. The form must always be
//! computable, so parsing never fails:
//! ```text
//! ""          → 0.00
//! "abc"       → 0.00
//! "12abc"     → 0.00
//! "1,250.50"  → 1250.50
//! "-100"      → -100.00   (negative stays negative; totals clamp later)
//! "10.005"    → 10.01     (half away from zero)
//! ```
//!
//! ## Usage
//! ```rust
//! use tripdesk_core::money::Money;
//!
//! let fare = Money::parse_lenient("1,000.50");
//! assert_eq!(fare.minor_units(), 100050);
//!
//! let junk = Money::parse_lenient("n/a");
//! assert!(junk.is_zero());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paisa, cents, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: raw operator input may be negative; only the derived
///   totals are clamped
/// - **Saturating arithmetic**: absurdly large inputs saturate instead of
///   overflowing, so recomputation can never panic
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  form text ──► parse_lenient ──► compute_totals ──► DerivedTotals      │
/// │                                                    │                    │
/// │                                                    └──► InvoiceSnapshot │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use tripdesk_core::money::Money;
    ///
    /// let fare = Money::from_minor(110000); // 1100.00
    /// assert_eq!(fare.major(), 1100);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `max(0, self)`.
    ///
    /// Every derived total goes through this before it is displayed or
    /// handed to submission.
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Parses operator text into Money, or `None` when it is not a number.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - `,` thousands separators are stripped
    /// - More than two fraction digits round half away from zero
    /// - Values outside the i64 minor-unit range are rejected
    ///
    /// ## Example
    /// ```rust
    /// use tripdesk_core::money::Money;
    ///
    /// assert_eq!(Money::parse("  20.5 "), Some(Money::from_minor(2050)));
    /// assert_eq!(Money::parse("twenty"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return None;
        }

        let value = Decimal::from_str(&cleaned).ok()?;
        let minor = value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?;

        minor.to_i64().map(Money)
    }

    /// Parses operator text into Money, degrading anything unparseable to zero.
    ///
    /// This is the only parser the fare computation uses: a half-typed or
    /// garbage field must never block the form.
    #[inline]
    pub fn parse_lenient(input: &str) -> Money {
        Self::parse(input).unwrap_or_default()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as `major.minor` without a currency symbol.
///
/// ## Note
/// The currency symbol comes from the app configuration, not from here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor_units(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(110000).to_string(), "1100.00");
        assert_eq!(Money::from_minor(505).to_string(), "5.05");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_plain_and_decimal() {
        assert_eq!(Money::parse("1000"), Some(Money::from_major(1000)));
        assert_eq!(Money::parse("20.5"), Some(Money::from_minor(2050)));
        assert_eq!(Money::parse(" 7.25 "), Some(Money::from_minor(725)));
    }

    #[test]
    fn test_parse_thousands_separator() {
        assert_eq!(Money::parse("1,250.50"), Some(Money::from_minor(125050)));
    }

    #[test]
    fn test_parse_rounds_half_away_from_zero() {
        assert_eq!(Money::parse("10.005"), Some(Money::from_minor(1001)));
        assert_eq!(Money::parse("-10.005"), Some(Money::from_minor(-1001)));
        assert_eq!(Money::parse("10.004"), Some(Money::from_minor(1000)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("   "), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("12abc"), None);
        assert_eq!(Money::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_parse_lenient_degrades_to_zero() {
        assert!(Money::parse_lenient("").is_zero());
        assert!(Money::parse_lenient("n/a").is_zero());
        assert_eq!(Money::parse_lenient("-100"), Money::from_major(-100));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_minor(-1).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_minor(42).clamp_non_negative(), Money::from_minor(42));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);
        assert_eq!((a + b).minor_units(), 1500);
        assert_eq!((a - b).minor_units(), 500);

        let huge = Money::from_minor(i64::MAX);
        assert_eq!((huge + a).minor_units(), i64::MAX);
        assert_eq!((Money::from_minor(i64::MIN) - a).minor_units(), i64::MIN);
    }
}
