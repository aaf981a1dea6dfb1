//! # Money Module
//!
//! Provides the `Money` type for tariffs, quotes and payment amounts.
//!
//! ## Integer Poisha
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ALL AMOUNTS ARE INTEGER POISHA (1 taka = 100 poisha)                   │
//! │                                                                         │
//! │  Tariff table          Weight (grams)         Quote                     │
//! │  ────────────          ──────────────         ─────                     │
//! │  ৳20 / kg       ×      1500 g          =      3000 poisha (৳30.00)      │
//! │                                                                         │
//! │  The per-kg rate is applied to grams with integer math, so a quote      │
//! │  shown in the live preview is bit-for-bit the quote submitted.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use courier_core::money::Money;
//!
//! let base = Money::from_taka(50);
//! let delivery = Money::from_taka(60);
//! assert_eq!((base + delivery).poisha(), 11_000);
//! assert_eq!((base + delivery).to_string(), "৳110.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::weight::Weight;

/// Number of poisha in one taka.
pub const POISHA_PER_TAKA: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in poisha (the smallest BDT unit).
///
/// ## Where Money is Used
/// ```text
/// Tariff constants ──► PriceBreakdown ──► ParcelRequest.cost_poisha
///                                               │
///                                               ▼
///                                   PaymentHandoff.amount ──► checkout
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from poisha.
    #[inline]
    pub const fn from_poisha(poisha: i64) -> Self {
        Money(poisha)
    }

    /// Creates a Money value from whole taka.
    ///
    /// ```rust
    /// use courier_core::money::Money;
    ///
    /// assert_eq!(Money::from_taka(120).poisha(), 12_000);
    /// ```
    #[inline]
    pub const fn from_taka(taka: i64) -> Self {
        Money(taka * POISHA_PER_TAKA)
    }

    /// Returns the value in poisha.
    #[inline]
    pub const fn poisha(&self) -> i64 {
        self.0
    }

    /// Returns the whole-taka portion.
    #[inline]
    pub const fn taka(&self) -> i64 {
        self.0 / POISHA_PER_TAKA
    }

    /// Returns the poisha portion (always 0-99).
    #[inline]
    pub const fn poisha_part(&self) -> i64 {
        (self.0 % POISHA_PER_TAKA).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Applies a per-kilogram rate to a weight.
    ///
    /// Weight is held in grams, so the product is divided by 1000. For the
    /// current tariffs (whole taka per kg) the division is exact down to a
    /// single gram; any sub-poisha remainder is truncated.
    ///
    /// ## Example
    /// ```rust
    /// use courier_core::money::Money;
    /// use courier_core::weight::Weight;
    ///
    /// let per_kg = Money::from_taka(20);
    /// let weight = Weight::from_grams(1_500);
    /// assert_eq!(per_kg.per_kg_for(weight), Money::from_taka(30));
    /// ```
    pub fn per_kg_for(&self, weight: Weight) -> Money {
        // rate × grams can exceed i64 for large rates
        let poisha = (self.0 as i128 * weight.grams() as i128) / 1000;
        Money(poisha as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `৳130.00`. Localised formatting belongs to the front end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}৳{}.{:02}", sign, self.taka().abs(), self.poisha_part())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_taka() {
        let money = Money::from_taka(130);
        assert_eq!(money.poisha(), 13_000);
        assert_eq!(money.taka(), 130);
        assert_eq!(money.poisha_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_poisha(13_050).to_string(), "৳130.50");
        assert_eq!(Money::from_taka(0).to_string(), "৳0.00");
        assert_eq!(Money::from_poisha(-550).to_string(), "-৳5.50");
    }

    #[test]
    fn test_per_kg_for_is_exact_on_grams() {
        let document_rate = Money::from_taka(10);
        assert_eq!(document_rate.per_kg_for(Weight::from_grams(2_000)), Money::from_taka(20));
        assert_eq!(document_rate.per_kg_for(Weight::from_grams(1)).poisha(), 1);

        let parcel_rate = Money::from_taka(20);
        assert_eq!(parcel_rate.per_kg_for(Weight::from_grams(50_000)), Money::from_taka(1_000));
        assert_eq!(parcel_rate.per_kg_for(Weight::zero()), Money::zero());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_taka(50), Money::from_taka(20), Money::from_taka(60)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_taka(130));
    }
}
