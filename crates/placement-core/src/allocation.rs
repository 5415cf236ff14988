//! # Price Allocation
//!
//! Splits the aggregate price of one order line across its bundle members.
//!
//! ## Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total 120.00, member quantities [2, 1]                                 │
//! │                                                                         │
//! │  unit  = 120.00 / (2 + 1) = 40.00     one unit price for ALL members    │
//! │  item₁ = 40.00 × 2        = 80.00                                       │
//! │  item₂ = 40.00 × 1        = 40.00                                       │
//! │                                                                         │
//! │  Σ items may differ from the total by float noise only (< 0.01).        │
//! │  No member is nudged to force an exact match.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreResult, ValidationError};
use crate::price::Price;

/// Price share of one bundle member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub unit_price: Price,
    pub total_price: Price,
}

/// Proportional allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceAllocator;

impl PriceAllocator {
    /// Allocates `total_price` over `quantities`, in order.
    ///
    /// ## Errors
    /// `InvalidInput` if the quantities sum to zero or less, the sum
    /// overflows, or a member quantity is negative.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::allocation::PriceAllocator;
    /// use placement_core::price::Price;
    ///
    /// let shares = PriceAllocator
    ///     .allocate(Price::new(120.0).unwrap(), &[2, 1])
    ///     .unwrap();
    /// assert_eq!(shares[0].total_price, Price::new(80.0).unwrap());
    /// assert_eq!(shares[1].unit_price, Price::new(40.0).unwrap());
    /// ```
    pub fn allocate(&self, total_price: Price, quantities: &[i64]) -> CoreResult<Vec<Allocation>> {
        let total_units = quantities
            .iter()
            .try_fold(0i64, |sum, &quantity| sum.checked_add(quantity))
            .ok_or_else(|| {
                tracing::error!(?quantities, "bundle quantities overflow");
                ValidationError::invalid_format("quantity", "total quantity is too large")
            })?;

        if total_units <= 0 {
            tracing::error!(total_units, "bundle quantities must sum to a positive number");
            return Err(ValidationError::must_be_positive("total quantity").into());
        }

        let unit_price = total_price.checked_div_quantity(total_units)?;

        quantities
            .iter()
            .map(|&quantity| {
                Ok(Allocation {
                    unit_price,
                    total_price: unit_price.checked_mul_quantity(quantity)?,
                })
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    #[test]
    fn test_single_member_keeps_total() {
        let shares = PriceAllocator.allocate(price(100.0), &[2]).unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].unit_price, price(50.0));
        assert_eq!(shares[0].total_price, price(100.0));
    }

    #[test]
    fn test_members_share_one_unit_price() {
        let shares = PriceAllocator.allocate(price(120.0), &[2, 1]).unwrap();
        assert_eq!(shares[0].unit_price, shares[1].unit_price);
        assert_eq!(shares[0].total_price, price(80.0));
        assert_eq!(shares[1].total_price, price(40.0));
    }

    #[test]
    fn test_zero_total_price() {
        let shares = PriceAllocator.allocate(Price::zero(), &[1, 3]).unwrap();
        assert!(shares.iter().all(|s| s.total_price.is_zero()));
    }

    #[test]
    fn test_rejects_non_positive_unit_counts() {
        assert!(PriceAllocator.allocate(price(10.0), &[]).is_err());
        assert!(PriceAllocator.allocate(price(10.0), &[0, 0]).is_err());
        assert!(PriceAllocator.allocate(price(10.0), &[-2, 1]).is_err());
        assert!(PriceAllocator.allocate(price(10.0), &[3, -1]).is_err());
    }

    #[test]
    fn test_rejects_overflowing_unit_count() {
        let err = PriceAllocator.allocate(price(10.0), &[i64::MAX, 1]).unwrap_err();
        assert!(matches!(
            err.detail(),
            ValidationError::InvalidFormat { field, .. } if field == "quantity"
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn test_item_totals_sum_back_to_total(
            total in 0.0f64..100_000.0,
            quantities in prop::collection::vec(1i64..50, 1..6),
        ) {
            let shares = PriceAllocator.allocate(price(total), &quantities).unwrap();
            let sum: f64 = shares.iter().map(|s| s.total_price.amount()).sum();
            prop_assert!((sum - total).abs() < 0.01);
        }
    }
}
