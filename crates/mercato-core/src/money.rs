//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! The storefront currency has no minor unit, so `Money` counts whole
//! currency units in an `i64`. All arithmetic is integer arithmetic;
//! floating point never enters a monetary calculation.
//!
//! ## Usage
//! ```rust
//! use mercato_core::money::Money;
//!
//! let price = Money::from_units(250_000);
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_units(30_000);
//!
//! // Percentage (voucher) math uses integer rounding
//! let ten_percent = price.percentage_of(10);
//! assert_eq!(ten_percent.units(), 25_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// Signed so that discount math can go through intermediate negative values
/// without surprises; persisted amounts are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use mercato_core::money::Money;
    ///
    /// let unit_price = Money::from_units(120_000);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.units(), 360_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Computes a percentage of this amount with integer rounding.
    ///
    /// `pct` is in whole percent (10 = 10%). Rounding is half-up via the
    /// `+50 / 100` integer form; i128 intermediates prevent overflow.
    ///
    /// ## Example
    /// ```rust
    /// use mercato_core::money::Money;
    ///
    /// let subtotal = Money::from_units(199_999);
    /// assert_eq!(subtotal.percentage_of(10).units(), 20_000);
    /// ```
    pub fn percentage_of(&self, pct: i64) -> Money {
        let amount = (self.0 as i128 * pct as i128 + 50) / 100;
        Money(amount as i64)
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Clamps a computed amount at zero. Totals never go negative even when
    /// discounts exceed the charged amounts.
    #[inline]
    pub const fn clamp_at_zero(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups thousands with `.` and appends the currency sign,
/// matching how the storefront renders prices ("250.000₫").
///
/// For debugging and logs; the frontend formats for locale itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{}{}₫", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
