//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Half-price offers produce sub-cent values:                             │
//! │    $32.95 × 50% = $16.475                                               │
//! │    Integer cents would force an early rounding decision here.          │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 Decimal                                    │
//! │    Intermediate amounts keep every digit; the basket total is          │
//! │    rounded to cents exactly once, at the very end.                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use acme_core::money::Money;
//!
//! // Create from cents (preferred for literals)
//! let price = Money::from_cents(3295); // $32.95
//!
//! // Arithmetic operations
//! let doubled = price * 2usize;                  // $65.90
//! let total = price + Money::from_cents(495);   // $37.90
//! assert_eq!(total, Money::from_cents(3790));
//! assert_eq!(doubled, Money::from_cents(6590));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Number of decimal places money is rounded to for totals and display.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in major currency units (dollars).
///
/// ## Design Decisions
/// - **Decimal (signed)**: Exact arithmetic, allows sub-cent intermediates
/// - **Single field tuple struct**: Zero-cost abstraction over Decimal
/// - **Transparent serde**: Config files carry plain amounts (`"32.95"`)
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► Basket subtotal ──► − offer discounts               │
/// │                                         │                               │
/// │                                         ▼                               │
/// │                          delivery lookup(subtotal − discount)           │
/// │                                         │                               │
/// │                                         ▼                               │
/// │                         total = round(subtotal − discount + delivery)   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount in major units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use acme_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_cents(795); // Represents $7.95
    /// assert_eq!(price.amount(), Decimal::new(795, 2));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CURRENCY_DECIMAL_PLACES))
    }

    /// Returns the exact decimal amount in major units.
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `pct` percent of this amount, without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use acme_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let half = Money::from_cents(3295).percent(Decimal::from(50));
    /// assert_eq!(half.amount(), Decimal::new(16475, 3)); // $16.475
    /// ```
    pub fn percent(&self, pct: Decimal) -> Money {
        Money(self.0 * pct / Decimal::ONE_HUNDRED)
    }

    /// Rounds to whole cents, midpoints away from zero.
    ///
    /// ```text
    /// 16.475 → 16.48      2.345 → 2.35      -1.005 → -1.01
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Returns the larger of two amounts.
    #[inline]
    pub fn max(self, other: Money) -> Money {
        if other > self {
            other
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money rounded to cents, e.g. `$16.48` or `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        write!(f, "{}${:.2}", sign, rounded.abs())
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

/// Multiplication by a count (groups, bundles, free items).
impl Mul<usize> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: usize) -> Self {
        Money(self.0 * Decimal::from(count))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
