//! # Price Module
//!
//! Provides the `Price` type for monetary amounts on order lines.
//!
//! ## Why a Validated Value Type?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE RAW FLOAT PROBLEM                                                  │
//! │                                                                         │
//! │  Platform exports hand us prices as JSON numbers:                       │
//! │    120.0 / 3 = 40.0           fine                                      │
//! │    100.0 / 3 = 33.333...      ×3 = 99.99999999999999                    │
//! │    -5.0, NaN, Infinity        must never reach an order line            │
//! │                                                                         │
//! │  OUR SOLUTION: Price                                                    │
//! │    • constructed only through Price::new (rejects negative / NaN / inf) │
//! │    • every arithmetic op re-validates and returns CoreResult<Price>     │
//! │    • equality tolerates 1e-9 of round-trip noise                        │
//! │    • a negative result is an error, never clamped to zero               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use placement_core::price::Price;
//!
//! let total = Price::new(120.0).unwrap();
//! let unit = total.checked_div_quantity(3).unwrap();
//! assert_eq!(unit, Price::new(40.0).unwrap());
//!
//! // Going below zero is an error, not zero.
//! assert!(unit.checked_sub(total).is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};

/// Tolerance used by [`Price`] equality.
pub const PRICE_EPSILON: f64 = 1e-9;

/// Currency shown by [`Price::to_display_string`] when none is given.
pub const DEFAULT_CURRENCY: &str = "THB";

// =============================================================================
// Price Type
// =============================================================================

/// A finite, non-negative monetary amount.
///
/// ## Design Decisions
/// - **f64 inside**: the platform sends decimal amounts and the allocation
///   rule divides them; drift is bounded and tested (< 0.01 per line)
/// - **No public field**: the only ways in are [`Price::new`] and
///   [`Price::zero`], so an invalid amount cannot exist
/// - **Copy**: a Price is never mutated, operations return a new one
///
/// ## Where Price is Used
/// ```text
/// InputOrder.total_price ──► PriceAllocator ──► Product.unit_price
///                                          └──► Product.total_price
///
/// Complementary lines ──► Price::zero()
/// ```
#[derive(Debug, Clone, Copy, TS)]
#[ts(export)]
pub struct Price(f64);

impl Price {
    /// Creates a price, rejecting negative and non-finite amounts.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::price::Price;
    ///
    /// assert!(Price::new(10.5).is_ok());
    /// assert!(Price::new(0.0).is_ok());
    /// assert!(Price::new(-0.01).is_err());
    /// assert!(Price::new(f64::NAN).is_err());
    /// ```
    pub fn new(amount: f64) -> CoreResult<Self> {
        if amount < 0.0 {
            tracing::error!(amount, "price cannot be negative");
            return Err(ValidationError::negative("price").into());
        }

        if !amount.is_finite() {
            tracing::error!(amount, "price must be a valid number");
            return Err(ValidationError::NotFinite {
                field: "price".to_string(),
            }
            .into());
        }

        Ok(Price(amount))
    }

    /// Returns a zero price (complementary items are free).
    #[inline]
    pub const fn zero() -> Self {
        Price(0.0)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Adds two prices.
    pub fn checked_add(&self, other: Price) -> CoreResult<Price> {
        Price::new(self.0 + other.0)
    }

    /// Subtracts `other`, failing if the result would be negative.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::price::Price;
    ///
    /// let a = Price::new(10.0).unwrap();
    /// let b = Price::new(4.0).unwrap();
    /// assert_eq!(a.checked_sub(b).unwrap(), Price::new(6.0).unwrap());
    /// assert!(b.checked_sub(a).is_err());
    /// ```
    pub fn checked_sub(&self, other: Price) -> CoreResult<Price> {
        Price::new(self.0 - other.0)
    }

    /// Multiplies by an arbitrary factor.
    pub fn checked_mul(&self, multiplier: f64) -> CoreResult<Price> {
        Price::new(self.0 * multiplier)
    }

    /// Multiplies by a unit count.
    ///
    /// ## User Workflow
    /// ```text
    /// unit price 40.00, member quantity 2
    ///      │
    ///      ▼
    /// checked_mul_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// item total 80.00
    /// ```
    pub fn checked_mul_quantity(&self, quantity: i64) -> CoreResult<Price> {
        if quantity < 0 {
            tracing::error!(quantity, "quantity cannot be negative");
            return Err(ValidationError::negative("quantity").into());
        }

        self.checked_mul(quantity as f64)
    }

    /// Divides by an arbitrary divisor.
    pub fn checked_div(&self, divisor: f64) -> CoreResult<Price> {
        if divisor == 0.0 {
            tracing::error!("cannot divide by zero");
            return Err(ValidationError::DivisionByZero {
                field: "price".to_string(),
            }
            .into());
        }

        Price::new(self.0 / divisor)
    }

    /// Divides by a unit count.
    pub fn checked_div_quantity(&self, divisor: i64) -> CoreResult<Price> {
        if divisor == 0 {
            tracing::error!("cannot divide by zero");
            return Err(ValidationError::DivisionByZero {
                field: "price".to_string(),
            }
            .into());
        }

        self.checked_div(divisor as f64)
    }

    /// Splits a total into `parts` equal shares and returns one share.
    pub fn divide_equally(&self, parts: i64) -> CoreResult<Price> {
        if parts <= 0 {
            return Err(ValidationError::must_be_positive("parts").into());
        }

        self.checked_div_quantity(parts)
    }

    /// Sums a sequence of prices. An empty sequence sums to zero.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::price::Price;
    ///
    /// let prices = [Price::new(80.0).unwrap(), Price::new(40.0).unwrap()];
    /// assert_eq!(Price::sum(prices).unwrap(), Price::new(120.0).unwrap());
    /// ```
    pub fn sum<I>(prices: I) -> CoreResult<Price>
    where
        I: IntoIterator<Item = Price>,
    {
        prices
            .into_iter()
            .try_fold(Price::zero(), |acc, price| acc.checked_add(price))
    }

    // =========================================================================
    // Comparison & Formatting
    // =========================================================================

    /// Strictly greater, ignoring epsilon-level noise.
    pub fn greater_than(&self, other: Price) -> bool {
        self.0 > other.0 && *self != other
    }

    /// Strictly less, ignoring epsilon-level noise.
    pub fn less_than(&self, other: Price) -> bool {
        other.greater_than(*self)
    }

    /// Rounds half away from zero to `precision` decimal places.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::price::Price;
    ///
    /// let p = Price::new(33.335).unwrap();
    /// assert_eq!(p.round(0).amount(), 33.0);
    /// assert_eq!(Price::new(2.5).unwrap().round(0).amount(), 3.0);
    /// ```
    pub fn round(&self, precision: u32) -> Price {
        let multiplier = 10f64.powi(precision as i32);
        let rounded = (self.0 * multiplier).round() / multiplier;

        if rounded.is_finite() {
            Price(rounded)
        } else {
            *self
        }
    }

    /// Formats with a currency code, e.g. `"THB 40.00"`.
    ///
    /// An empty currency falls back to [`DEFAULT_CURRENCY`].
    pub fn to_display_string(&self, currency: &str) -> String {
        let currency = if currency.is_empty() {
            DEFAULT_CURRENCY
        } else {
            currency
        };
        format!("{} {:.2}", currency, self.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimals, no currency (`"40.00"`).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::zero()
    }
}

/// Equality within [`PRICE_EPSILON`].
impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < PRICE_EPSILON
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else {
            self.0.partial_cmp(&other.0)
        }
    }
}

impl TryFrom<f64> for Price {
    type Error = crate::error::CoreError;

    fn try_from(amount: f64) -> CoreResult<Self> {
        Price::new(amount)
    }
}

/// Serialized as a JSON number rounded to two decimals.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.round(2).0)
    }
}

/// Deserialized through [`Price::new`], so invalid amounts never get in.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::new(amount).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_amounts() {
        assert!(Price::new(0.0).is_ok());
        assert!(Price::new(99.99).is_ok());
        assert!(Price::new(-1.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert!(Price::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", price(40.0)), "40.00");
        assert_eq!(format!("{}", price(33.333)), "33.33");
        assert_eq!(format!("{}", Price::zero()), "0.00");
        assert_eq!(price(40.0).to_display_string(""), "THB 40.00");
        assert_eq!(price(40.0).to_display_string("USD"), "USD 40.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = price(100.0);
        let b = price(25.0);

        assert_eq!(a.checked_add(b).unwrap(), price(125.0));
        assert_eq!(a.checked_sub(b).unwrap(), price(75.0));
        assert_eq!(b.checked_mul_quantity(3).unwrap(), price(75.0));
        assert_eq!(a.checked_div_quantity(4).unwrap(), price(25.0));
        assert_eq!(a.checked_mul(0.5).unwrap(), price(50.0));
    }

    #[test]
    fn test_negative_results_are_errors() {
        let small = price(1.0);
        let large = price(2.0);

        assert!(small.checked_sub(large).is_err());
        assert!(small.checked_mul(-1.0).is_err());
        assert!(small.checked_mul_quantity(-2).is_err());
        assert!(small.checked_div(-1.0).is_err());
    }

    #[test]
    fn test_division_by_zero() {
        let total = price(120.0);
        assert!(total.checked_div(0.0).is_err());
        assert!(total.checked_div_quantity(0).is_err());
        assert!(total.divide_equally(0).is_err());
        assert_eq!(total.divide_equally(3).unwrap(), price(40.0));
    }

    #[test]
    fn test_epsilon_equality() {
        let reconstructed = price(100.0)
            .checked_div_quantity(3)
            .unwrap()
            .checked_mul_quantity(3)
            .unwrap();
        assert_eq!(reconstructed, price(100.0));
        assert_ne!(price(100.0), price(100.01));
    }

    #[test]
    fn test_comparisons() {
        assert!(price(2.0).greater_than(price(1.0)));
        assert!(!price(1.0).greater_than(price(1.0)));
        assert!(price(1.0).less_than(price(2.0)));
        assert!(Price::zero().is_zero());
        assert!(!Price::zero().is_positive());
    }

    #[test]
    fn test_sum() {
        assert_eq!(Price::sum(Vec::new()).unwrap(), Price::zero());
        let total = Price::sum([price(1.5), price(2.5), price(6.0)]).unwrap();
        assert_eq!(total, price(10.0));
    }

    #[test]
    fn test_round() {
        assert_eq!(price(1.005).round(1).amount(), 1.0);
        assert_eq!(price(33.3333).round(2).amount(), 33.33);
        assert_eq!(price(0.5).round(0).amount(), 1.0);
    }

    #[test]
    fn test_json_round_trip_rules() {
        assert_eq!(serde_json::to_string(&price(33.333333)).unwrap(), "33.33");
        assert_eq!(serde_json::to_string(&price(40.0)).unwrap(), "40.0");

        let parsed: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed, price(12.5));
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
