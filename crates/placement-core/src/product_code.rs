//! # Product Code Decoder
//!
//! Splits a clean SKU into its material and model parts.
//!
//! ```text
//!   FG0A  -  CLEAR  -  OPPOA3-B-SPECIAL-EDITION
//!   ────     ─────     ─────────────────────────
//!   film     texture   model (may contain dashes)
//!   └────┬────────┘
//!   material id "FG0A-CLEAR"
//! ```

use crate::error::{CoreResult, ValidationError};
use crate::material::Material;
use crate::texture::Texture;
use crate::validation::validate_film_type_format;

/// A decoded product code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCode {
    pub material: Material,
    pub model_id: String,
}

impl ProductCode {
    /// Canonical `FILM-TEXTURE`.
    pub fn material_id(&self) -> String {
        self.material.to_string()
    }
}

/// Validating `FILM-TEXTURE-MODEL` decoder.
///
/// Film types must look like `FG…` (see [`validate_film_type_format`]) unless
/// they are listed in the whitelist.
#[derive(Debug, Clone, Default)]
pub struct ProductCodeDecoder {
    film_type_whitelist: Vec<String>,
}

impl ProductCodeDecoder {
    /// Decoder that also accepts the given film types verbatim
    /// (compared upper-cased).
    pub fn with_whitelist<I, S>(film_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ProductCodeDecoder {
            film_type_whitelist: film_types
                .into_iter()
                .map(|film| film.as_ref().trim().to_uppercase())
                .filter(|film| !film.is_empty())
                .collect(),
        }
    }

    pub fn film_type_whitelist(&self) -> &[String] {
        &self.film_type_whitelist
    }

    /// Decodes `clean_id`.
    ///
    /// ## Errors
    /// `InvalidInput` when the id is empty, has fewer than three segments,
    /// the film type is malformed, the texture is unknown, or the model is
    /// empty.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::product_code::ProductCodeDecoder;
    ///
    /// let code = ProductCodeDecoder::default()
    ///     .decode("FG0A-CLEAR-OPPOA3-B-SPECIAL-EDITION")
    ///     .unwrap();
    /// assert_eq!(code.material_id(), "FG0A-CLEAR");
    /// assert_eq!(code.model_id, "OPPOA3-B-SPECIAL-EDITION");
    /// ```
    pub fn decode(&self, clean_id: &str) -> CoreResult<ProductCode> {
        if clean_id.is_empty() {
            tracing::error!("product id cannot be empty");
            return Err(ValidationError::required("product id").into());
        }

        let segments: Vec<&str> = clean_id.split('-').collect();
        if segments.len() < 3 {
            tracing::error!(product_id = clean_id, "invalid product format");
            return Err(ValidationError::invalid_format(
                "product id",
                "expected <film type>-<texture>-<model>",
            )
            .into());
        }

        let film_type = segments[0].trim().to_uppercase();
        if !self.film_type_whitelist.contains(&film_type) {
            validate_film_type_format(&film_type).inspect_err(|err| {
                tracing::error!(product_id = clean_id, %err, "invalid film type");
            })?;
        }

        let texture: Texture = segments[1].parse()?;

        let model_id = segments[2..].join("-");
        if model_id.is_empty() {
            tracing::error!(product_id = clean_id, "model id cannot be empty");
            return Err(ValidationError::required("model id").into());
        }

        Ok(ProductCode {
            material: Material::new(&film_type, texture)?,
            model_id,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_code() {
        let code = ProductCodeDecoder::default()
            .decode("FG0A-CLEAR-IPHONE16PROMAX")
            .unwrap();
        assert_eq!(code.material_id(), "FG0A-CLEAR");
        assert_eq!(code.material.texture(), Texture::Clear);
        assert_eq!(code.model_id, "IPHONE16PROMAX");
    }

    #[test]
    fn test_decode_normalizes_texture_case() {
        let code = ProductCodeDecoder::default().decode("FG0A-matte-OPPOA3").unwrap();
        assert_eq!(code.material_id(), "FG0A-MATTE");
    }

    #[test]
    fn test_decode_rejects_malformed_codes() {
        let decoder = ProductCodeDecoder::default();
        assert!(decoder.decode("").is_err());
        assert!(decoder.decode("FG0A-CLEAR").is_err());
        assert!(decoder.decode("XX0A-CLEAR-OPPOA3").is_err());
        assert!(decoder.decode("FG-CLEAR-OPPOA3").is_err());
        assert!(decoder.decode("FG0A-GLOSSY-OPPOA3").is_err());
        assert!(decoder.decode("FG0A-CLEAR-").is_err());
        assert!(decoder.decode("WIPING-CLOTH-X").is_err());
    }

    #[test]
    fn test_whitelisted_film_types() {
        let decoder = ProductCodeDecoder::with_whitelist(["hg1", " "]);
        assert_eq!(decoder.film_type_whitelist(), ["HG1".to_string()]);

        let code = decoder.decode("HG1-PRIVACY-PIXEL9").unwrap();
        assert_eq!(code.material_id(), "HG1-PRIVACY");
        assert!(decoder.decode("HG2-PRIVACY-PIXEL9").is_err());
    }
}
