//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Invoice figures must keep full precision until presentation:          │
//! │    netAmount × 18 / 100 is carried exactly, then split in half         │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal                                          │
//! │    2000 × 18 / 100 = 360, 360 / 2 = 180 (exactly, always)              │
//! │    Rounding happens only for words and for display                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gst_core::money::Money;
//! use gst_core::types::TaxRate;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(100050, 2)); // ₹1000.50
//! let net = price.checked_mul_quantity(2).unwrap();
//! let tax = net.checked_tax(TaxRate::GST_18).unwrap();
//! assert_eq!(tax.amount(), Decimal::new(36018, 2));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in rupees, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal**: no binary float drift while figures are combined
/// - **Single field tuple struct**: zero-cost wrapper
/// - **Serde as number**: the render model carries plain JSON numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts `other`, `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use gst_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Money::new(Decimal::from(1000));
    /// assert_eq!(
    ///     unit_price.checked_mul_quantity(2).map(|m| m.amount()),
    ///     Some(Decimal::from(2000))
    /// );
    /// assert_eq!(Money::new(Decimal::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: u64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Tax on this amount at the given percentage rate, unrounded.
    ///
    /// `amount × rate / 100`, `None` when the product overflows.
    pub fn checked_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0
            .checked_mul(rate.percent())?
            .checked_div(Decimal::ONE_HUNDRED)
            .map(Money)
    }

    /// Exactly half of this amount (CGST/SGST share).
    #[inline]
    pub fn half(&self) -> Money {
        Money(self.0 / Decimal::TWO)
    }

    /// Rounds to the nearest whole rupee, halves away from zero.
    ///
    /// Returns `None` when the rounded value is negative or too large for
    /// `u64`. Fractional paise are dropped here, never spelled out.
    ///
    /// ## Example
    /// ```rust
    /// use gst_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::new(Decimal::new(23605, 1)).whole_units(), Some(2361));
    /// assert_eq!(Money::new(Decimal::new(23604, 1)).whole_units(), Some(2360));
    /// ```
    pub fn whole_units(&self) -> Option<u64> {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            return Some(0);
        }
        rounded.to_u64()
    }

    /// Rounds to paise (2 dp) for presentation only.
    pub fn round_for_display(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to paise, e.g. `₹2360.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.round_for_display())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
