//! # Complementary Items
//!
//! Every sold film unit ships with one wiping cloth and one cleaner matching
//! its texture. The aggregator folds all main products of a batch and renders
//! the extra lines.
//!
//! ## Emission Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main products (any scan order)                                        │
//! │    FG0A-PRIVACY-X ×1, FG0A-CLEAR-Y ×2, FG05-PRIVACY-Z ×3                │
//! │                                                                         │
//! │  rendered (fixed order, zero price, starting_no = 4)                   │
//! │    4  WIPING-CLOTH      ×6                                             │
//! │    5  CLEAR-CLEANNER    ×2                                             │
//! │    6  PRIVACY-CLEANNER  ×4      (no MATTE line, nothing sold)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fulfillment prints picking lists straight from this order, so it never
//! depends on the order products were scanned in.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CoreResult, ValidationError};
use crate::price::Price;
use crate::texture::Texture;
use crate::types::{CleanedOrder, Product};

/// Product id of the wiping cloth.
pub const WIPING_CLOTH_PRODUCT_ID: &str = "WIPING-CLOTH";

/// Per-batch accumulator. Build one per batch, never share it.
#[derive(Debug, Clone, Default)]
pub struct ComplementaryAggregator {
    wiping_cloth_quantity: i64,
    cleaner_quantities: BTreeMap<Texture, i64>,
}

impl ComplementaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one main product's demand.
    ///
    /// ## Errors
    /// `InvalidInput` if the texture cannot be read from the material id, the
    /// quantity is negative, or a running count would overflow. A zero
    /// quantity is accepted and adds nothing.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        let texture = product.texture().inspect_err(|_| {
            tracing::error!(
                product_id = %product.product_id,
                material_id = %product.material_id,
                "product does not have a valid texture"
            );
        })?;

        if product.quantity < 0 {
            tracing::error!(product_id = %product.product_id, "quantity cannot be negative");
            return Err(ValidationError::negative("quantity").into());
        }

        let wiping_cloth_quantity = self.wiping_cloth_quantity.checked_add(product.quantity);
        let cleaner_quantity = self.cleaner_quantity(texture).checked_add(product.quantity);

        // Commit both counts or neither.
        match (wiping_cloth_quantity, cleaner_quantity) {
            (Some(wiping_cloth_quantity), Some(cleaner_quantity)) => {
                self.wiping_cloth_quantity = wiping_cloth_quantity;
                self.cleaner_quantities.insert(texture, cleaner_quantity);
                Ok(())
            }
            _ => {
                tracing::error!(product_id = %product.product_id, "complementary quantity overflow");
                Err(ValidationError::invalid_format("quantity", "total quantity is too large").into())
            }
        }
    }

    pub fn wiping_cloth_quantity(&self) -> i64 {
        self.wiping_cloth_quantity
    }

    pub fn cleaner_quantity(&self, texture: Texture) -> i64 {
        self.cleaner_quantities.get(&texture).copied().unwrap_or(0)
    }

    /// Renders the complementary lines, numbered from `starting_no`.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::complementary::ComplementaryAggregator;
    /// use placement_core::price::Price;
    /// use placement_core::types::Product;
    ///
    /// let mut aggregator = ComplementaryAggregator::new();
    /// aggregator
    ///     .add_product(&Product {
    ///         product_id: "FG0A-MATTE-OPPOA3".into(),
    ///         material_id: "FG0A-MATTE".into(),
    ///         model_id: "OPPOA3".into(),
    ///         quantity: 2,
    ///         unit_price: Price::new(40.0).unwrap(),
    ///         total_price: Price::new(80.0).unwrap(),
    ///     })
    ///     .unwrap();
    ///
    /// let lines = aggregator.render(2);
    /// assert_eq!(lines[0].product_id, "WIPING-CLOTH");
    /// assert_eq!(lines[1].product_id, "MATTE-CLEANNER");
    /// assert_eq!(lines[1].no, 3);
    /// ```
    pub fn render(&self, starting_no: i64) -> Vec<CleanedOrder> {
        let mut lines = Vec::with_capacity(1 + Texture::ALL.len());
        let mut no = starting_no;

        if self.wiping_cloth_quantity > 0 {
            lines.push(CleanedOrder::complementary(
                no,
                WIPING_CLOTH_PRODUCT_ID,
                self.wiping_cloth_quantity,
            ));
            no += 1;
        }

        for texture in Texture::ALL {
            let quantity = self.cleaner_quantity(texture);
            if quantity > 0 {
                lines.push(CleanedOrder::complementary(
                    no,
                    texture.cleaner_product_id(),
                    quantity,
                ));
                no += 1;
            }
        }

        lines
    }

    /// Value of the accumulated items at the given unit prices.
    ///
    /// A missing price counts as zero.
    pub fn total_value(
        &self,
        wiping_cloth_price: Option<Price>,
        cleaner_prices: &HashMap<Texture, Price>,
    ) -> CoreResult<Price> {
        let mut total = Price::zero();

        if let Some(price) = wiping_cloth_price {
            total = total.checked_add(price.checked_mul_quantity(self.wiping_cloth_quantity)?)?;
        }

        for (texture, quantity) in &self.cleaner_quantities {
            if let Some(price) = cleaner_prices.get(texture) {
                total = total.checked_add(price.checked_mul_quantity(*quantity)?)?;
            }
        }

        Ok(total)
    }
}

/// Folds `products` into a fresh aggregator and renders it.
pub fn complementary_lines(products: &[Product], starting_no: i64) -> CoreResult<Vec<CleanedOrder>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let mut aggregator = ComplementaryAggregator::new();
    for product in products {
        aggregator.add_product(product).inspect_err(|err| {
            tracing::error!(
                product_id = %product.product_id,
                %err,
                "failed to add product to complementary calculation"
            );
        })?;
    }

    Ok(aggregator.render(starting_no))
}

// =============================================================================
// Unit Tests
// =============================================================================
