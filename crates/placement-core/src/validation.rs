//! # Validation Module
//!
//! Field-level validators shared by the order types and the decoder.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP transport (placement-api)                               │
//! │  ├── JSON shape and types (deserialization)                            │
//! │  └── Price construction (negative / NaN rejected)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Core (THIS MODULE)                                           │
//! │  ├── Re-validates every input line, never trusts the caller            │
//! │  └── Validates every output line before it leaves the core             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use placement_core::validation::{validate_film_type_format, validate_quantity};
//!
//! validate_quantity(2).unwrap();
//! validate_film_type_format("FG0A").unwrap();
//! assert!(validate_film_type_format("XX0A").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Prefix every film type code starts with.
pub const FILM_TYPE_PREFIX: &str = "FG";

// =============================================================================
// String Validators
// =============================================================================

/// Validates that an identifier is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

/// Validates a film type code.
///
/// ## Rules
/// - Must not be empty
/// - Must start with `FG`
/// - Must be at least 3 characters (`FG` alone names no film)
pub fn validate_film_type_format(film_type_id: &str) -> ValidationResult<()> {
    if film_type_id.is_empty() {
        return Err(ValidationError::required("film type id"));
    }

    if !film_type_id.starts_with(FILM_TYPE_PREFIX) {
        return Err(ValidationError::invalid_format(
            "film type id",
            format!("must start with '{}'", FILM_TYPE_PREFIX),
        ));
    }

    if film_type_id.len() < 3 {
        return Err(ValidationError::invalid_format(
            "film type id",
            "must be at least 3 characters",
        ));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line / order number.
pub fn validate_line_no(no: i64) -> ValidationResult<()> {
    if no <= 0 {
        return Err(ValidationError::must_be_positive("order number"));
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
