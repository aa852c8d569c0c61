//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    Rs 10.00 / 3 = Rs 3.33 (×3 = Rs 9.99)  → Lost Rs 0.01!              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paisa                                            │
//! │    1000 paisa / 3 = 333 paisa (×3 = 999 paisa)                         │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use drplanet_core::money::Money;
//!
//! // Create from paisa (preferred)
//! let price = Money::from_paisa(149_900); // Rs 1,499.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // Rs 2,998.00
//! let total = price + Money::from_paisa(5000);   // Rs 1,549.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(1499.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paisa for PKR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and over-discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_paisa ──┬──► SaleItem.unit_price ──► SaleItem.line_total │
/// │                        │                                                │
/// │                        └──► Displayed as "Rs 1499.00" in UI             │
/// │                                                                         │
/// │  Sale.subtotal ──► Discount ──► Sale.total ──► Revenue aggregation     │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use drplanet_core::money::Money;
    ///
    /// let price = Money::from_paisa(1099); // Represents Rs 10.99
    /// assert_eq!(price.paisa(), 1099);
    /// ```
    ///
    /// ## Why Paisa?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use paisa.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from whole rupees and paisa.
    ///
    /// ## Example
    /// ```rust
    /// use drplanet_core::money::Money;
    ///
    /// let price = Money::from_rupees(10, 99); // Rs 10.99
    /// assert_eq!(price.paisa(), 1099);
    ///
    /// let refund = Money::from_rupees(-5, 50); // -Rs 5.50
    /// assert_eq!(refund.paisa(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the rupee part should be negative.
    /// `from_rupees(-5, 50)` = -Rs 5.50, not -Rs 4.50
    #[inline]
    pub const fn from_rupees(rupees: i64, paisa: i64) -> Self {
        // Handle sign: if rupees is negative, paisa should subtract
        if rupees < 0 {
            Money(rupees * 100 - paisa)
        } else {
            Money(rupees * 100 + paisa)
        }
    }

    /// Returns the value in paisa (smallest currency unit).
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use drplanet_core::money::Money;
    ///
    /// assert_eq!(Money::from_paisa(1099).rupees(), 10);
    /// assert_eq!(Money::from_paisa(-550).rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paisa portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the given basis-point share of this amount, rounded.
    ///
    /// ## Basis Points
    /// 1 basis point = 0.01% = 1/10000. A 15% storewide discount is 1500 bps;
    /// a 10% sale discount is 1000 bps.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use drplanet_core::money::Money;
    ///
    /// let subtotal = Money::from_paisa(100_000); // Rs 1,000.00
    /// let discount = subtotal.percentage_of(1000); // 10%
    /// assert_eq!(discount.paisa(), 10_000); // Rs 100.00
    /// ```
    ///
    /// ## Where This Runs
    /// ```text
    /// Sale subtotal: Rs 1,000.00
    ///      │
    ///      ▼
    /// percentage_of(1000 bps) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Discount: Rs 100.00 → Total: Rs 900.00
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        // Use i128 to prevent overflow on large amounts
        let share = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paisa(share as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use drplanet_core::money::Money;
    ///
    /// let unit_price = Money::from_paisa(89_900); // Rs 899.00
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.paisa(), 269_700); // Rs 2,697.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and receipts. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}Rs {}.{:02}",
            sign,
            self.rupees().abs(),
            self.paisa_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
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
