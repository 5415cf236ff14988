//! # Texture
//!
//! The finish of a film product. Texture decides which cleaner ships with
//! each unit and fixes the order complementary lines are emitted in.
//!
//! ```text
//! ┌──────────┬──────────┬──────────────────┐
//! │ Texture  │ Priority │ Cleaner id       │
//! ├──────────┼──────────┼──────────────────┤
//! │ CLEAR    │ 1        │ CLEAR-CLEANNER   │
//! │ MATTE    │ 2        │ MATTE-CLEANNER   │
//! │ PRIVACY  │ 3        │ PRIVACY-CLEANNER │
//! └──────────┴──────────┴──────────────────┘
//! ```
//!
//! `CLEANNER` is misspelled on purpose: fulfillment matches on that exact id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Suffix appended to a texture to form its cleaner product id.
pub const CLEANER_SUFFIX: &str = "-CLEANNER";

/// Film finish. Variant order is the priority order (`CLEAR < MATTE < PRIVACY`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Texture {
    Clear,
    Matte,
    Privacy,
}

impl Texture {
    /// All textures in priority order.
    pub const ALL: [Texture; 3] = [Texture::Clear, Texture::Matte, Texture::Privacy];

    /// Canonical upper-case code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Texture::Clear => "CLEAR",
            Texture::Matte => "MATTE",
            Texture::Privacy => "PRIVACY",
        }
    }

    /// Product id of the cleaner matching this texture.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::texture::Texture;
    ///
    /// assert_eq!(Texture::Matte.cleaner_product_id(), "MATTE-CLEANNER");
    /// ```
    pub fn cleaner_product_id(&self) -> String {
        format!("{}{}", self.as_str(), CLEANER_SUFFIX)
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Texture::Clear => "Clear",
            Texture::Matte => "Matte",
            Texture::Privacy => "Privacy",
        }
    }

    /// Emission priority, 1 is emitted first.
    pub const fn priority(&self) -> u8 {
        match self {
            Texture::Clear => 1,
            Texture::Matte => 2,
            Texture::Privacy => 3,
        }
    }

    /// Reads the texture out of a material id such as `FG0A-CLEAR`.
    pub fn from_material_id(material_id: &str) -> CoreResult<Texture> {
        if material_id.is_empty() {
            tracing::error!("material id cannot be empty");
            return Err(ValidationError::required("material id").into());
        }

        match material_id.split('-').nth(1) {
            Some(texture) => texture.parse(),
            None => {
                tracing::error!(material_id, "invalid material id format");
                Err(ValidationError::invalid_format(
                    "material id",
                    "expected <film type>-<texture>",
                )
                .into())
            }
        }
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for Texture {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CLEAR" => Ok(Texture::Clear),
            "MATTE" => Ok(Texture::Matte),
            "PRIVACY" => Ok(Texture::Privacy),
            _ => {
                tracing::error!(texture = s, "invalid texture");
                Err(ValidationError::NotAllowed {
                    field: "texture".to_string(),
                    allowed: Texture::ALL.iter().map(|t| t.as_str().to_string()).collect(),
                }
                .into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
