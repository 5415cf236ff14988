//! # Order Processor
//!
//! Orchestrates one batch: raw platform lines in, numbered output lines out.
//!
//! ## Batch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderProcessor::process                          │
//! │                                                                         │
//! │  1. Validate    every line present and valid (first failure aborts)    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. Expand      per line: parse ──► allocate ──► decode ──► Product    │
//! │        │        numbers 1, 2, 3 … in input order                       │
//! │        ▼                                                                │
//! │  3. Complement  fresh aggregator, rendered at the next free number     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  4. Validate    every output line                                      │
//! │                                                                         │
//! │  Outcome: Ok(all lines) or Err(InvalidInput). Never partial output.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The parsing strategy sits behind [`ProductParser`]; the default
//! [`CatalogParser`] wires the SKU parser, decoder and allocator together.

use crate::allocation::{Allocation, PriceAllocator};
use crate::complementary::complementary_lines;
use crate::error::{CoreResult, ValidationError};
use crate::price::Price;
use crate::product_code::{ProductCode, ProductCodeDecoder};
use crate::sku::SkuParser;
use crate::types::{CleanedOrder, InputOrder, ParsedSkuItem, Product};

// =============================================================================
// Parsing Capability
// =============================================================================

/// The capabilities the processor needs to expand one line.
pub trait ProductParser: Send + Sync {
    /// Raw platform id → bundle members.
    fn parse(&self, platform_product_id: &str, line_quantity: i64) -> CoreResult<Vec<ParsedSkuItem>>;

    /// Clean id → material and model.
    fn decode(&self, clean_product_id: &str) -> CoreResult<ProductCode>;

    /// Line total → one share per member quantity.
    fn allocate(&self, total_price: Price, quantities: &[i64]) -> CoreResult<Vec<Allocation>>;
}

/// Production parser backed by the catalog rules.
#[derive(Debug, Clone, Default)]
pub struct CatalogParser {
    sku: SkuParser,
    decoder: ProductCodeDecoder,
    allocator: PriceAllocator,
}

impl CatalogParser {
    pub fn new(sku: SkuParser, decoder: ProductCodeDecoder) -> Self {
        CatalogParser {
            sku,
            decoder,
            allocator: PriceAllocator,
        }
    }

    pub fn sku_parser(&self) -> &SkuParser {
        &self.sku
    }

    pub fn decoder(&self) -> &ProductCodeDecoder {
        &self.decoder
    }
}

impl ProductParser for CatalogParser {
    fn parse(&self, platform_product_id: &str, line_quantity: i64) -> CoreResult<Vec<ParsedSkuItem>> {
        self.sku.parse(platform_product_id, line_quantity)
    }

    fn decode(&self, clean_product_id: &str) -> CoreResult<ProductCode> {
        self.decoder.decode(clean_product_id)
    }

    fn allocate(&self, total_price: Price, quantities: &[i64]) -> CoreResult<Vec<Allocation>> {
        self.allocator.allocate(total_price, quantities)
    }
}

// =============================================================================
// Processor
// =============================================================================

/// Stateless batch orchestrator.
///
/// Holds no per-batch state, so one instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct OrderProcessor<P: ProductParser = CatalogParser> {
    parser: P,
}

impl<P: ProductParser> OrderProcessor<P> {
    pub fn new(parser: P) -> Self {
        OrderProcessor { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Processes a batch of present lines.
    ///
    /// An empty batch succeeds with no output.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::price::Price;
    /// use placement_core::processor::OrderProcessor;
    /// use placement_core::types::InputOrder;
    ///
    /// let processor: OrderProcessor = OrderProcessor::default();
    /// let lines = processor
    ///     .process(&[InputOrder {
    ///         no: 1,
    ///         platform_product_id: "FG0A-CLEAR-IPHONE16PROMAX".into(),
    ///         qty: 2,
    ///         unit_price: Price::new(50.0).unwrap(),
    ///         total_price: Price::new(100.0).unwrap(),
    ///     }])
    ///     .unwrap();
    ///
    /// let ids: Vec<_> = lines.iter().map(|l| l.product_id.as_str()).collect();
    /// assert_eq!(ids, ["FG0A-CLEAR-IPHONE16PROMAX", "WIPING-CLOTH", "CLEAR-CLEANNER"]);
    /// ```
    pub fn process(&self, orders: &[InputOrder]) -> CoreResult<Vec<CleanedOrder>> {
        let lines: Vec<&InputOrder> = orders.iter().collect();
        self.process_lines(&lines)
    }

    /// Processes a batch that may contain absent lines.
    ///
    /// ## Errors
    /// `InvalidInput` (`MissingLine`) for the first `None`, in addition to
    /// everything [`OrderProcessor::process`] rejects.
    pub fn process_optional(&self, orders: &[Option<InputOrder>]) -> CoreResult<Vec<CleanedOrder>> {
        let mut lines = Vec::with_capacity(orders.len());
        for (index, order) in orders.iter().enumerate() {
            match order {
                Some(order) => lines.push(order),
                None => {
                    tracing::error!(index, "order line is missing");
                    return Err(ValidationError::MissingLine { index }.into());
                }
            }
        }

        self.process_lines(&lines)
    }

    fn process_lines(&self, orders: &[&InputOrder]) -> CoreResult<Vec<CleanedOrder>> {
        if orders.is_empty() {
            tracing::info!("no orders to process");
            return Ok(Vec::new());
        }

        for order in orders {
            order.validate()?;
        }

        let mut output = Vec::new();
        let mut products = Vec::new();
        let mut next_no: i64 = 1;

        for order in orders {
            for product in self.expand_line(order)? {
                output.push(product.to_cleaned_order(next_no));
                products.push(product);
                next_no += 1;
            }
        }

        output.extend(complementary_lines(&products, next_no)?);

        for line in &output {
            line.validate().inspect_err(|err| {
                tracing::error!(no = line.no, product_id = %line.product_id, %err, "invalid output line");
            })?;
        }

        tracing::info!(
            input_lines = orders.len(),
            main_products = products.len(),
            output_lines = output.len(),
            "processed order batch"
        );

        Ok(output)
    }

    /// One input line → its main products, in bundle order.
    fn expand_line(&self, order: &InputOrder) -> CoreResult<Vec<Product>> {
        let items = self
            .parser
            .parse(&order.platform_product_id, order.qty)
            .inspect_err(|err| {
                tracing::error!(no = order.no, platform_product_id = %order.platform_product_id, %err, "failed to parse product id");
            })?;

        let quantities: Vec<i64> = items.iter().map(|item| item.quantity).collect();
        let allocations = self
            .parser
            .allocate(order.total_price, &quantities)
            .inspect_err(|err| {
                tracing::error!(no = order.no, %err, "failed to allocate line price");
            })?;

        items
            .into_iter()
            .zip(allocations)
            .map(|(item, allocation)| {
                let code = self.parser.decode(&item.clean_product_id).inspect_err(|err| {
                    tracing::error!(no = order.no, product_id = %item.clean_product_id, %err, "failed to decode product code");
                })?;

                let product = Product {
                    material_id: code.material_id(),
                    model_id: code.model_id,
                    product_id: item.clean_product_id,
                    quantity: item.quantity,
                    unit_price: allocation.unit_price,
                    total_price: allocation.total_price,
                };

                product.validate().inspect_err(|err| {
                    tracing::error!(no = order.no, product_id = %product.product_id, %err, "invalid product");
                })?;

                Ok(product)
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
    use crate::error::CoreError;
    use crate::material::Material;
    use crate::texture::Texture;
    use proptest::prelude::*;

    fn catalog_processor() -> OrderProcessor {
        OrderProcessor::default()
    }

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    fn line(no: i64, id: &str, qty: i64, unit: f64, total: f64) -> InputOrder {
        InputOrder {
            no,
            platform_product_id: id.to_string(),
            qty,
            unit_price: price(unit),
            total_price: price(total),
        }
    }

    fn summary(lines: &[CleanedOrder]) -> Vec<(i64, &str, i64)> {
        lines
            .iter()
            .map(|l| (l.no, l.product_id.as_str(), l.qty))
            .collect()
    }

    #[test]
    fn test_single_product() {
        let output = catalog_processor()
            .process(&[line(1, "FG0A-CLEAR-IPHONE16PROMAX", 2, 50.0, 100.0)])
            .unwrap();

        assert_eq!(
            summary(&output),
            vec![
                (1, "FG0A-CLEAR-IPHONE16PROMAX", 2),
                (2, "WIPING-CLOTH", 2),
                (3, "CLEAR-CLEANNER", 2),
            ]
        );

        let main = &output[0];
        assert_eq!(main.material_id.as_deref(), Some("FG0A-CLEAR"));
        assert_eq!(main.model_id.as_deref(), Some("IPHONE16PROMAX"));
        assert_eq!(main.unit_price, price(50.0));
        assert_eq!(main.total_price, price(100.0));
        assert!(output[1..].iter().all(CleanedOrder::is_complementary));
    }

    #[test]
    fn test_bundle_with_prefix_and_multiplier() {
        let output = catalog_processor()
            .process(&[line(1, "--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3", 1, 160.0, 120.0)])
            .unwrap();

        assert_eq!(
            summary(&output),
            vec![
                (1, "FG0A-CLEAR-OPPOA3", 2),
                (2, "FG0A-MATTE-OPPOA3", 1),
                (3, "WIPING-CLOTH", 3),
                (4, "CLEAR-CLEANNER", 2),
                (5, "MATTE-CLEANNER", 1),
            ]
        );
        assert_eq!(output[0].unit_price, price(40.0));
        assert_eq!(output[1].unit_price, price(40.0));
        assert_eq!(output[0].total_price, price(80.0));
        assert_eq!(output[1].total_price, price(40.0));
    }

    #[test]
    fn test_multiple_lines_share_one_complementary_pass() {
        let output = catalog_processor()
            .process(&[
                line(1, "FG0A-PRIVACY-IPHONE16PROMAX", 1, 50.0, 50.0),
                line(2, "x2-3&FG05-MATTE-OPPOA3-B", 2, 40.0, 80.0),
                line(3, "FG0A-CLEAR-GALAXYS24*3", 1, 30.0, 90.0),
            ])
            .unwrap();

        assert_eq!(
            summary(&output),
            vec![
                (1, "FG0A-PRIVACY-IPHONE16PROMAX", 1),
                (2, "FG05-MATTE-OPPOA3-B", 2),
                (3, "FG0A-CLEAR-GALAXYS24", 3),
                (4, "WIPING-CLOTH", 6),
                (5, "CLEAR-CLEANNER", 3),
                (6, "MATTE-CLEANNER", 2),
                (7, "PRIVACY-CLEANNER", 1),
            ]
        );
        assert_eq!(output[1].model_id.as_deref(), Some("OPPOA3-B"));
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let processor = catalog_processor();
        assert!(processor.process(&[]).unwrap().is_empty());
        assert!(processor.process_optional(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_product_id_fails() {
        let result = catalog_processor().process(&[line(1, "", 1, 10.0, 10.0)]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidInput(ValidationError::Required { .. }))
        ));
    }

    #[test]
    fn test_non_positive_quantity_fails_whole_batch() {
        let processor = catalog_processor();
        for qty in [0, -1] {
            let result = processor.process(&[
                line(1, "FG0A-CLEAR-IPHONE16PROMAX", 1, 10.0, 10.0),
                line(2, "FG0A-CLEAR-IPHONE16PROMAX", qty, 10.0, 10.0),
            ]);
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_missing_line_fails_whole_batch() {
        let result = catalog_processor().process_optional(&[
            Some(line(1, "FG0A-CLEAR-IPHONE16PROMAX", 1, 10.0, 10.0)),
            None,
        ]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidInput(ValidationError::MissingLine { index: 1 }))
        ));
    }

    #[test]
    fn test_undecodable_member_fails_whole_batch() {
        let processor = catalog_processor();
        assert!(processor
            .process(&[
                line(1, "FG0A-CLEAR-IPHONE16PROMAX", 1, 10.0, 10.0),
                line(2, "FG0A-GLOSSY-IPHONE16PROMAX", 1, 10.0, 10.0),
            ])
            .is_err());
        assert!(processor.process(&[line(1, "ABC", 1, 10.0, 10.0)]).is_err());
    }

    #[test]
    fn test_zero_multiplier_member_fails() {
        let result = catalog_processor().process(&[line(1, "FG0A-CLEAR-X*0", 1, 10.0, 10.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overflowing_bundle_quantity_fails() {
        let result = catalog_processor().process(&[line(
            1,
            "FG0A-CLEAR-X*9223372036854775807/FG0A-CLEAR-Y*1",
            1,
            1.0,
            1.0,
        )]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidInput(ValidationError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn test_overflowing_complementary_quantity_fails() {
        let result = catalog_processor().process(&[
            line(1, "FG0A-CLEAR-X*9223372036854775807", 1, 1.0, 1.0),
            line(2, "FG0A-CLEAR-Y", 1, 1.0, 1.0),
        ]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidInput(ValidationError::InvalidFormat { .. }))
        ));
    }

    #[test]
    fn test_repaired_member_flows_through() {
        let output = catalog_processor()
            .process(&[line(1, "FG0A-CLEAR-IPHONE16PROMAX/FG0A-PRIV", 1, 100.0, 100.0)])
            .unwrap();
        assert_eq!(output[1].product_id, "FG0A-PRIVACY-IPHONE16PROMAX");
        assert_eq!(output[1].material_id.as_deref(), Some("FG0A-PRIVACY"));
    }

    /// Treats every id as a single privacy film for a fixed model.
    struct FixedParser;

    impl ProductParser for FixedParser {
        fn parse(&self, platform_product_id: &str, line_quantity: i64) -> CoreResult<Vec<ParsedSkuItem>> {
            Ok(vec![ParsedSkuItem::new(
                format!("{}-PRIVACY-FIXED", platform_product_id),
                line_quantity,
            )])
        }

        fn decode(&self, clean_product_id: &str) -> CoreResult<ProductCode> {
            let film = clean_product_id.split('-').next().unwrap_or_default();
            Ok(ProductCode {
                material: Material::new(film, Texture::Privacy)?,
                model_id: "FIXED".to_string(),
            })
        }

        fn allocate(&self, total_price: Price, quantities: &[i64]) -> CoreResult<Vec<Allocation>> {
            Ok(quantities
                .iter()
                .map(|_| Allocation {
                    unit_price: total_price,
                    total_price,
                })
                .collect())
        }
    }

    #[test]
    fn test_substitute_parser() {
        let processor = OrderProcessor::new(FixedParser);
        let output = processor.process(&[line(1, "ANY", 4, 1.0, 9.0)]).unwrap();

        assert_eq!(
            summary(&output),
            vec![
                (1, "ANY-PRIVACY-FIXED", 4),
                (2, "WIPING-CLOTH", 4),
                (3, "PRIVACY-CLEANNER", 4),
            ]
        );
        assert_eq!(output[0].total_price, price(9.0));
    }

    fn member_strategy() -> impl Strategy<Value = (Texture, i64)> {
        (
            prop_oneof![Just(Texture::Clear), Just(Texture::Matte), Just(Texture::Privacy)],
            1i64..5,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn test_output_numbers_are_sequential(
            batch in prop::collection::vec(
                (prop::collection::vec(member_strategy(), 1..4), 1i64..4, 0.0f64..1_000.0),
                1..6,
            ),
        ) {
            let orders: Vec<InputOrder> = batch
                .iter()
                .enumerate()
                .map(|(i, (members, qty, total))| {
                    let id = members
                        .iter()
                        .enumerate()
                        .map(|(j, (texture, n))| format!("FG0A-{}-MODEL{}*{}", texture, j, n))
                        .collect::<Vec<_>>()
                        .join("/");
                    line(i as i64 + 1, &id, *qty, 0.0, *total)
                })
                .collect();

            let output = catalog_processor().process(&orders).unwrap();

            prop_assert!(output.iter().enumerate().all(|(i, l)| l.no == i as i64 + 1));

            let mains: Vec<&CleanedOrder> = output.iter().filter(|l| l.is_main_product()).collect();
            let member_count: usize = batch.iter().map(|(members, _, _)| members.len()).sum();
            prop_assert_eq!(mains.len(), member_count);

            let sold: i64 = mains.iter().map(|l| l.qty).sum();
            let cloth = output.iter().find(|l| l.product_id == "WIPING-CLOTH").map(|l| l.qty);
            prop_assert_eq!(cloth, Some(sold));
        }
    }
}
