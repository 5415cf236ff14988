//! # placement-core: Pure Order Normalization Logic
//!
//! Turns raw e-commerce order lines (messy, bundled platform product ids)
//! into clean, numbered fulfillment lines with complementary items appended.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Order Placement Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                placement-api (axum HTTP service)                │   │
//! │  │      JSON binding ──► OrderProcessor ──► response envelope      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process call                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ placement-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    sku    │  │  product  │  │allocation │  │complement-│  │   │
//! │  │   │  parser   │─►│   code    │─►│  prices   │─►│   ary     │  │   │
//! │  │   │  repair   │  │  decoder  │  │           │  │ aggregator│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                         processor (orchestrator)                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO ENV • NO GLOBAL STATE • LOGGING VIA tracing       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`processor`] - Batch orchestration and the [`ProductParser`] seam
//! - [`sku`] - Platform id cleanup, bundle split, `*N` multipliers
//! - [`repair`] - Versioned table completing `FILM-TEXTURE` ids
//! - [`product_code`] - `FILM-TEXTURE-MODEL` decoding
//! - [`allocation`] - Line price split across bundle members
//! - [`complementary`] - Wiping cloths and cleaners
//! - [`price`], [`texture`], [`material`] - Value types
//! - [`types`] - Input/output records
//! - [`error`], [`validation`] - Error types and field checks
//!
//! ## Example Usage
//!
//! ```rust
//! use placement_core::{InputOrder, OrderProcessor, Price};
//!
//! let processor: OrderProcessor = OrderProcessor::default();
//! let output = processor
//!     .process(&[InputOrder {
//!         no: 1,
//!         platform_product_id: "--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3".into(),
//!         qty: 1,
//!         unit_price: Price::new(160.0).unwrap(),
//!         total_price: Price::new(120.0).unwrap(),
//!     }])
//!     .unwrap();
//!
//! // two mains, one wiping cloth line, two cleaner lines
//! assert_eq!(output.len(), 5);
//! assert_eq!(output[0].unit_price, Price::new(40.0).unwrap());
//! assert_eq!(output[2].product_id, "WIPING-CLOTH");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod complementary;
pub mod error;
pub mod material;
pub mod price;
pub mod processor;
pub mod product_code;
pub mod repair;
pub mod sku;
pub mod texture;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use complementary::{ComplementaryAggregator, WIPING_CLOTH_PRODUCT_ID};
pub use error::{CoreError, CoreResult, ValidationError};
pub use price::Price;
pub use processor::{CatalogParser, OrderProcessor, ProductParser};
pub use product_code::ProductCodeDecoder;
pub use repair::RepairTable;
pub use sku::SkuParser;
pub use texture::Texture;
pub use types::*;
