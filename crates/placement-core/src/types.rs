//! # Domain Types
//!
//! The records that flow through the order pipeline.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   InputOrder    │   │  ParsedSkuItem  │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  no             │──►│  clean id       │──►│  product_id     │       │
//! │  │  platform id    │   │  quantity       │   │  material_id    │       │
//! │  │  qty            │   └─────────────────┘   │  model_id       │       │
//! │  │  unit/total     │                         │  quantity       │       │
//! │  └─────────────────┘                         │  unit/total     │       │
//! │                                              └────────┬────────┘       │
//! │                                                       ▼                │
//! │                                              ┌─────────────────┐       │
//! │                                              │  CleanedOrder   │       │
//! │                                              │  (main or       │       │
//! │                                              │  complementary) │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::price::Price;
use crate::texture::Texture;
use crate::validation::{validate_line_no, validate_quantity, validate_required, ValidationResult};

// =============================================================================
// Input Order
// =============================================================================

/// One raw line as reported by the e-commerce platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InputOrder {
    /// Line number on the platform export (1-based).
    pub no: i64,

    /// Raw identifier, possibly a bundle with export junk.
    pub platform_product_id: String,

    /// Quantity the platform reports for the whole line.
    pub qty: i64,

    pub unit_price: Price,

    /// Aggregate price shared by every bundle member of the line.
    pub total_price: Price,
}

impl InputOrder {
    /// Checks the line on its own. Prices are valid by construction.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_line_no(self.no).inspect_err(|_| {
            tracing::error!(no = self.no, "order number must be positive");
        })?;

        validate_required("platform product id", &self.platform_product_id).inspect_err(|_| {
            tracing::error!(no = self.no, "platform product id cannot be empty");
        })?;

        validate_quantity(self.qty).inspect_err(|_| {
            tracing::error!(no = self.no, qty = self.qty, "quantity must be positive");
        })?;

        Ok(())
    }
}

// =============================================================================
// Parsed SKU Item
// =============================================================================

/// One bundle member after SKU parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedSkuItem {
    pub clean_product_id: String,
    pub quantity: i64,
}

impl ParsedSkuItem {
    pub fn new(clean_product_id: impl Into<String>, quantity: i64) -> Self {
        ParsedSkuItem {
            clean_product_id: clean_product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A resolved main product, one per bundle member.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    /// `FILM-TEXTURE`
    pub material_id: String,
    pub model_id: String,
    pub quantity: i64,
    pub unit_price: Price,
    pub total_price: Price,
}

impl Product {
    /// Texture encoded in the material id.
    pub fn texture(&self) -> CoreResult<Texture> {
        Texture::from_material_id(&self.material_id)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("product id", &self.product_id)?;
        validate_required("material id", &self.material_id)?;
        validate_required("model id", &self.model_id)?;
        validate_quantity(self.quantity)?;
        Ok(())
    }

    /// Output line for this product under order number `no`.
    pub fn to_cleaned_order(&self, no: i64) -> CleanedOrder {
        CleanedOrder {
            no,
            product_id: self.product_id.clone(),
            material_id: Some(self.material_id.clone()),
            model_id: Some(self.model_id.clone()),
            qty: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
        }
    }
}

// =============================================================================
// Cleaned Order
// =============================================================================

/// A final output line, main product or complementary item.
///
/// ## JSON shape
/// ```json
/// { "no": 1, "productId": "FG0A-CLEAR-IPHONE16PROMAX", "materialId": "FG0A-CLEAR",
///   "modelId": "IPHONE16PROMAX", "qty": 2, "unitPrice": 50.0, "totalPrice": 100.0 }
/// { "no": 2, "productId": "WIPING-CLOTH", "qty": 2, "unitPrice": 0.0, "totalPrice": 0.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CleanedOrder {
    pub no: i64,

    pub product_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub material_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub model_id: Option<String>,

    pub qty: i64,

    pub unit_price: Price,

    pub total_price: Price,
}

impl CleanedOrder {
    /// A zero-priced complementary line.
    pub fn complementary(no: i64, product_id: impl Into<String>, qty: i64) -> Self {
        CleanedOrder {
            no,
            product_id: product_id.into(),
            material_id: None,
            model_id: None,
            qty,
            unit_price: Price::zero(),
            total_price: Price::zero(),
        }
    }

    /// Main product iff both material and model ids are present and non-empty.
    pub fn is_main_product(&self) -> bool {
        let present = |id: &Option<String>| id.as_deref().is_some_and(|id| !id.is_empty());
        present(&self.material_id) && present(&self.model_id)
    }

    pub fn is_complementary(&self) -> bool {
        !self.is_main_product()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_line_no(self.no)?;
        validate_required("product id", &self.product_id)?;
        validate_quantity(self.qty).map_err(|_| ValidationError::must_be_positive("qty"))?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(no: i64, id: &str, qty: i64) -> InputOrder {
        InputOrder {
            no,
            platform_product_id: id.to_string(),
            qty,
            unit_price: Price::new(50.0).unwrap(),
            total_price: Price::new(100.0).unwrap(),
        }
    }

    fn product() -> Product {
        Product {
            product_id: "FG0A-CLEAR-IPHONE16PROMAX".to_string(),
            material_id: "FG0A-CLEAR".to_string(),
            model_id: "IPHONE16PROMAX".to_string(),
            quantity: 2,
            unit_price: Price::new(50.0).unwrap(),
            total_price: Price::new(100.0).unwrap(),
        }
    }

    #[test]
    fn test_input_order_validation() {
        assert!(input(1, "FG0A-CLEAR-IPHONE16PROMAX", 2).validate().is_ok());
        assert!(input(0, "FG0A-CLEAR-IPHONE16PROMAX", 2).validate().is_err());
        assert!(input(1, "", 2).validate().is_err());
        assert!(input(1, "FG0A-CLEAR-IPHONE16PROMAX", 0).validate().is_err());
        assert!(input(1, "FG0A-CLEAR-IPHONE16PROMAX", -3).validate().is_err());
    }

    #[test]
    fn test_input_order_deserializes_camel_case() {
        let json = r#"{"no":1,"platformProductId":"FG0A-CLEAR-X","qty":2,"unitPrice":50,"totalPrice":100}"#;
        let order: InputOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order, input(1, "FG0A-CLEAR-X", 2));

        let negative = r#"{"no":1,"platformProductId":"X","qty":1,"unitPrice":-1,"totalPrice":0}"#;
        assert!(serde_json::from_str::<InputOrder>(negative).is_err());
    }

    #[test]
    fn test_product_texture_and_validation() {
        let p = product();
        assert_eq!(p.texture().unwrap(), Texture::Clear);
        assert!(p.validate().is_ok());

        let mut no_model = product();
        no_model.model_id.clear();
        assert!(no_model.validate().is_err());

        let mut zero = product();
        zero.quantity = 0;
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_product_to_cleaned_order() {
        let line = product().to_cleaned_order(7);
        assert_eq!(line.no, 7);
        assert_eq!(line.material_id.as_deref(), Some("FG0A-CLEAR"));
        assert!(line.is_main_product());
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_complementary_line() {
        let line = CleanedOrder::complementary(3, "WIPING-CLOTH", 2);
        assert!(line.is_complementary());
        assert!(line.unit_price.is_zero());
        assert!(line.validate().is_ok());

        let empty_ids = CleanedOrder {
            material_id: Some(String::new()),
            model_id: Some("X".to_string()),
            ..CleanedOrder::complementary(1, "FG0A-CLEAR-X", 1)
        };
        assert!(empty_ids.is_complementary());
    }

    #[test]
    fn test_cleaned_order_validation() {
        assert!(CleanedOrder::complementary(0, "WIPING-CLOTH", 1).validate().is_err());
        assert!(CleanedOrder::complementary(1, "", 1).validate().is_err());
        assert!(CleanedOrder::complementary(1, "WIPING-CLOTH", 0).validate().is_err());
    }

    #[test]
    fn test_cleaned_order_json_omits_missing_ids() {
        let json = serde_json::to_value(CleanedOrder::complementary(2, "WIPING-CLOTH", 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "no": 2,
                "productId": "WIPING-CLOTH",
                "qty": 2,
                "unitPrice": 0.0,
                "totalPrice": 0.0
            })
        );
    }
}
