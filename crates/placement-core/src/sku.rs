//! # SKU Parser
//!
//! Turns one raw platform product id into normalized bundle members.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw: "%20x--FG0A-CLEAR-OPPOA3*2/ FG0A-MAT"          line qty: 3       │
//! │                                                                         │
//! │  1. clean_prefix    strip export junk until nothing matches            │
//! │     → "FG0A-CLEAR-OPPOA3*2/ FG0A-MAT"                                  │
//! │                                                                         │
//! │  2. split_bundle    split on '/', trim, drop "%20x", drop empties      │
//! │     → ["FG0A-CLEAR-OPPOA3*2", "FG0A-MAT"]                              │
//! │                                                                         │
//! │  3. extract_quantity  trailing "*N" or inherit the line quantity       │
//! │     → [("FG0A-CLEAR-OPPOA3", 2), ("FG0A-MAT", 3)]                      │
//! │                                                                         │
//! │  4. repair          two-segment ids get a model from the RepairTable   │
//! │     → [("FG0A-CLEAR-OPPOA3", 2), ("FG0A-MATTE-OPPOA3", 3)]             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CoreResult, ValidationError};
use crate::repair::RepairTable;
use crate::types::ParsedSkuItem;

/// Junk tokens produced by the platform export, tried in this order.
pub const JUNK_PREFIXES: [&str; 7] = [
    "%20--%20x",
    "%20--",
    "--%20x",
    "x2-3&",
    "%20x",
    "%20-",
    "--",
];

/// Every product code starts with this token.
pub const PRODUCT_START: &str = "FG";

/// Artifact left in front of bundle members after splitting.
const MEMBER_ARTIFACT: &str = "%20x";

static QUANTITY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(\d+)$").expect("Invalid quantity suffix regex pattern"));

// =============================================================================
// Free Functions
// =============================================================================

/// Strips junk prefixes until a fixed point is reached.
///
/// A single leading `-` is also dropped unless it is directly followed by
/// [`PRODUCT_START`].
///
/// ## Example
/// ```rust
/// use placement_core::sku::clean_prefix;
///
/// assert_eq!(clean_prefix("%20--%20x--FG0A-CLEAR-X"), "FG0A-CLEAR-X");
/// assert_eq!(clean_prefix("---FG0A-CLEAR-X"), "-FG0A-CLEAR-X");
/// ```
pub fn clean_prefix(product_id: &str) -> &str {
    let mut cleaned = product_id;

    'strip: loop {
        for prefix in JUNK_PREFIXES {
            if let Some(rest) = cleaned.strip_prefix(prefix) {
                cleaned = rest;
                continue 'strip;
            }
        }

        if let Some(rest) = cleaned.strip_prefix('-') {
            if !rest.starts_with(PRODUCT_START) {
                cleaned = rest;
                continue 'strip;
            }
        }

        return cleaned;
    }
}

/// Splits a cleaned id into bundle members, dropping empty parts.
pub fn split_bundle(product_id: &str) -> Vec<&str> {
    product_id
        .split('/')
        .map(str::trim)
        .map(|part| part.strip_prefix(MEMBER_ARTIFACT).unwrap_or(part))
        .filter(|part| !part.is_empty())
        .collect()
}

/// Splits a trailing `*N` multiplier off a member.
///
/// Returns the id without the suffix and the multiplier, or the untouched id
/// and `None` when there is no (parseable) suffix.
///
/// ## Example
/// ```rust
/// use placement_core::sku::extract_quantity;
///
/// assert_eq!(extract_quantity("FG0A-CLEAR-OPPOA3*2"), ("FG0A-CLEAR-OPPOA3", Some(2)));
/// assert_eq!(extract_quantity("FG0A-CLEAR-OPPOA3"), ("FG0A-CLEAR-OPPOA3", None));
/// ```
pub fn extract_quantity(member: &str) -> (&str, Option<i64>) {
    let Some(captures) = QUANTITY_SUFFIX.captures(member) else {
        return (member, None);
    };

    let (Some(whole), Some(digits)) = (captures.get(0), captures.get(1)) else {
        return (member, None);
    };

    match digits.as_str().parse::<i64>() {
        Ok(quantity) => (&member[..whole.start()], Some(quantity)),
        Err(_) => {
            tracing::warn!(member, "quantity suffix out of range, ignoring it");
            (member, None)
        }
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Raw platform id → ordered `(clean id, quantity)` pairs.
#[derive(Debug, Clone, Default)]
pub struct SkuParser {
    repair: RepairTable,
}

impl SkuParser {
    pub fn new(repair: RepairTable) -> Self {
        SkuParser { repair }
    }

    pub fn repair_table(&self) -> &RepairTable {
        &self.repair
    }

    /// Parses one platform product id.
    ///
    /// Members without a `*N` suffix inherit `line_quantity`.
    ///
    /// ## Errors
    /// `InvalidInput` if the id is empty or nothing is left after cleanup.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::sku::SkuParser;
    ///
    /// let parser = SkuParser::default();
    /// let items = parser.parse("--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3", 1).unwrap();
    ///
    /// assert_eq!(items.len(), 2);
    /// assert_eq!(items[0].clean_product_id, "FG0A-CLEAR-OPPOA3");
    /// assert_eq!(items[0].quantity, 2);
    /// assert_eq!(items[1].quantity, 1);
    /// ```
    pub fn parse(&self, platform_product_id: &str, line_quantity: i64) -> CoreResult<Vec<ParsedSkuItem>> {
        if platform_product_id.is_empty() {
            tracing::error!("platform product id cannot be empty");
            return Err(ValidationError::required("platform product id").into());
        }

        let cleaned = clean_prefix(platform_product_id);
        let members = split_bundle(cleaned);

        if members.is_empty() {
            tracing::error!(platform_product_id, "no product left after cleanup");
            return Err(ValidationError::invalid_format(
                "platform product id",
                "contains no product code",
            )
            .into());
        }

        let items: Vec<ParsedSkuItem> = members
            .into_iter()
            .map(|member| {
                let (id, quantity) = extract_quantity(member);
                let clean_id = self.repair.repair(id).unwrap_or_else(|| id.to_string());
                ParsedSkuItem::new(clean_id, quantity.unwrap_or(line_quantity))
            })
            .collect();

        tracing::debug!(
            platform_product_id,
            members = items.len(),
            "parsed platform product id"
        );

        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
