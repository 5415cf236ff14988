//! # Error Types
//!
//! Domain-specific error types for placement-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  placement-core errors (this file)                                     │
//! │  ├── CoreError        - The single failure kind: InvalidInput          │
//! │  └── ValidationError  - What exactly was wrong with the input          │
//! │                                                                         │
//! │  placement-api errors (app)                                            │
//! │  └── ApiError         - What the HTTP client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidInput → ApiError → 400      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core performs no I/O, so every failure is a caller-input problem.
//! There is no "not found" or "internal" category in here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every failure in parsing, decoding, allocation, aggregation or final
/// validation surfaces as [`CoreError::InvalidInput`]. The wrapped
/// [`ValidationError`] carries the detail for logs and messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input violated a contract of the core.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl CoreError {
    /// Returns the validation detail behind this error.
    pub fn detail(&self) -> &ValidationError {
        match self {
            CoreError::InvalidInput(detail) => detail,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A batch entry is absent (e.g. `null` in the request array).
    #[error("order line at index {index} is missing")]
    MissingLine { index: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value must be a finite number.
    #[error("{field} must be a valid number")]
    NotFinite { field: String },

    /// Division by zero (e.g. a bundle whose quantities sum to zero).
    #[error("cannot divide {field} by zero")]
    DivisionByZero { field: String },

    /// Invalid format (e.g. a product code with too few segments).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn negative(field: &str) -> Self {
        ValidationError::Negative {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
