//! # Repair Table
//!
//! Best-effort repair for bundle members that arrive as `FILM-TEXTURE` with
//! no model id. The table is data, not logic: the parser receives it at
//! construction and the API can replace it with a TOML file.
//!
//! ```text
//! "FG0A-MAT"  ──► texture alias  MAT → MATTE ──► "FG0A-MATTE"
//!             ──► models["FG0A-MATTE"]        ──► "OPPOA3"
//!             ──► "FG0A-MATTE-OPPOA3"
//!
//! no entry for the key ──► default_model
//! ```
//!
//! ## File Format
//! ```toml
//! version = "2024.1"
//! default_model = "IPHONE16PROMAX"
//!
//! [models]
//! "FG0A-MATTE" = "OPPOA3"
//!
//! [texture_aliases]
//! MAT = "MATTE"
//! ```
//!
//! The default-model fallback fabricates a model id for any unknown key.
//! That is the current business rule; unknown keys are logged at `warn`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreResult, ValidationError};
use crate::texture::Texture;

/// Version tag of the table compiled into the binary.
pub const BUILTIN_VERSION: &str = "2024.1";

/// Model used when no entry matches.
pub const BUILTIN_DEFAULT_MODEL: &str = "IPHONE16PROMAX";

/// Versioned mapping used to complete two-segment product codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairTable {
    pub version: String,

    pub default_model: String,

    /// `FILM-TEXTURE` → model id.
    #[serde(default)]
    pub models: BTreeMap<String, String>,

    /// Abbreviation → canonical texture code.
    #[serde(default)]
    pub texture_aliases: BTreeMap<String, String>,
}

impl Default for RepairTable {
    fn default() -> Self {
        RepairTable::builtin()
    }
}

impl RepairTable {
    /// The table shipped with the service.
    pub fn builtin() -> Self {
        let models = [
            ("FG0A-CLEAR", "IPHONE16PROMAX"),
            ("FG0A-MATTE", "OPPOA3"),
            ("FG0A-PRIVACY", "IPHONE16PROMAX"),
            ("FG05-CLEAR", "OPPOA3"),
            ("FG05-MATTE", "OPPOA3-B"),
        ];
        let aliases = [
            ("MAT", "MATTE"),
            ("MT", "MATTE"),
            ("CLR", "CLEAR"),
            ("CL", "CLEAR"),
            ("PRIV", "PRIVACY"),
            ("PRV", "PRIVACY"),
        ];

        RepairTable {
            version: BUILTIN_VERSION.to_string(),
            default_model: BUILTIN_DEFAULT_MODEL.to_string(),
            models: models
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            texture_aliases: aliases
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Checks a table loaded from outside the binary.
    pub fn validate(&self) -> CoreResult<()> {
        if self.version.trim().is_empty() {
            return Err(ValidationError::required("repair table version").into());
        }

        if self.default_model.trim().is_empty() {
            return Err(ValidationError::required("repair table default model").into());
        }

        for target in self.texture_aliases.values() {
            target.parse::<Texture>()?;
        }

        Ok(())
    }

    /// Upper-cases the texture and expands known abbreviations.
    ///
    /// Unknown values are returned upper-cased; the decoder rejects them later.
    pub fn normalize_texture(&self, raw: &str) -> String {
        let upper = raw.trim().to_uppercase();
        match self.texture_aliases.get(&upper) {
            Some(canonical) => canonical.to_uppercase(),
            None => upper,
        }
    }

    /// Model id for `film`/`texture`, or the default.
    pub fn infer_model(&self, film_type: &str, texture: &str) -> &str {
        let key = format!("{}-{}", film_type.trim().to_uppercase(), texture);
        match self.models.get(&key) {
            Some(model) => model,
            None => {
                tracing::warn!(
                    key = %key,
                    default_model = %self.default_model,
                    version = %self.version,
                    "no repair entry, falling back to default model"
                );
                &self.default_model
            }
        }
    }

    /// Completes `FILM-TEXTURE` into `FILM-TEXTURE-MODEL`.
    ///
    /// Returns `None` unless the id has exactly two dash-separated segments.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::repair::RepairTable;
    ///
    /// let table = RepairTable::builtin();
    /// assert_eq!(table.repair("FG0A-MAT").as_deref(), Some("FG0A-MATTE-OPPOA3"));
    /// assert_eq!(table.repair("FG0A-CLEAR-OPPOA3"), None);
    /// ```
    pub fn repair(&self, product_id: &str) -> Option<String> {
        let mut segments = product_id.split('-');
        let (film_type, texture) = match (segments.next(), segments.next(), segments.next()) {
            (Some(film), Some(texture), None) => (film, texture),
            _ => return None,
        };

        let texture = self.normalize_texture(texture);
        let model = self.infer_model(film_type, &texture);
        let repaired = format!("{}-{}-{}", film_type, texture, model);

        tracing::debug!(
            original = product_id,
            repaired = %repaired,
            version = %self.version,
            "repaired two-segment product code"
        );

        Some(repaired)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
