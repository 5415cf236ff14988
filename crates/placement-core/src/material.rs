//! # Material
//!
//! A film type paired with a texture, written `FG0A-CLEAR` on the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::texture::Texture;

/// `{film_type_id, texture}`, canonical form `"<FILM>-<TEXTURE>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Material {
    film_type_id: String,
    texture: Texture,
}

impl Material {
    /// Builds a material from explicit fields. The film type is trimmed and
    /// upper-cased and must not end up empty.
    ///
    /// ## Example
    /// ```rust
    /// use placement_core::material::Material;
    /// use placement_core::texture::Texture;
    ///
    /// let material = Material::new(" fg0a ", Texture::Clear).unwrap();
    /// assert_eq!(material.to_string(), "FG0A-CLEAR");
    /// ```
    pub fn new(film_type_id: &str, texture: Texture) -> CoreResult<Self> {
        let film_type_id = film_type_id.trim().to_uppercase();

        if film_type_id.is_empty() {
            tracing::error!("film type id cannot be empty");
            return Err(ValidationError::required("film type id").into());
        }

        Ok(Material {
            film_type_id,
            texture,
        })
    }

    pub fn film_type_id(&self) -> &str {
        &self.film_type_id
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    pub fn has_texture(&self, texture: Texture) -> bool {
        self.texture == texture
    }

    /// Cleaner that ships with this material.
    pub fn cleaner_product_id(&self) -> String {
        self.texture.cleaner_product_id()
    }

    /// Human label, e.g. `"FG0A Clear"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.film_type_id, self.texture.display_name())
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.film_type_id, self.texture)
    }
}

/// Parses `FG0A-CLEAR`. Only the first two dash segments are read.
impl FromStr for Material {
    type Err = CoreError;

    fn from_str(material_id: &str) -> Result<Self, Self::Err> {
        if material_id.is_empty() {
            tracing::error!("material id cannot be empty");
            return Err(ValidationError::required("material id").into());
        }

        let mut parts = material_id.split('-');
        let (film_type_id, texture) = match (parts.next(), parts.next()) {
            (Some(film), Some(texture)) => (film, texture),
            _ => {
                tracing::error!(material_id, "invalid material id format");
                return Err(ValidationError::invalid_format(
                    "material id",
                    "expected <film type>-<texture>",
                )
                .into());
            }
        };

        let texture = texture.parse::<Texture>()?;
        Material::new(film_type_id, texture)
    }
}

impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
