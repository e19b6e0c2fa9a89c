//! # Error Types
//!
//! Domain-specific error types for tipo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tipo-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog and configuration errors               │
//! │  └── ValidationError  - Caller-level order checks                      │
//! │                                                                         │
//! │  tipo-store errors (separate crate)                                    │
//! │  └── StoreError       - Config files, catalog files, cart operations   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! A configuration with missing dimensions or an unknown material/size
//! combination is priced, not rejected: the engine returns the zero-price
//! sentinel. Errors are reserved for malformed input (unknown enum literal in
//! JSON), broken reference data, and the caller-level checks run before an
//! item may enter the cart.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A configuration could not be parsed.
    ///
    /// ## When This Occurs
    /// - The `product` tag is missing or unknown
    /// - An option carries a literal outside its documented set
    ///   (e.g. `"material": "frontlit_999"`)
    /// - A numeric field is negative or not a number
    #[error("Invalid product configuration: {0}")]
    InvalidConfiguration(String),

    /// A price table or band list breaks its structural rules.
    #[error("Invalid price table {table}: {reason}")]
    InvalidPriceTable { table: String, reason: String },

    /// A surcharge or fee in the catalog is out of range.
    #[error("Invalid surcharge {name}: {reason}")]
    InvalidSurcharge { name: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidConfiguration(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the checks in [`crate::validation`], which the UI or cart run
/// before accepting an item. The engine itself never returns these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Dimensions exceed what the product can be produced at.
    #[error("{width_cm} x {height_cm} cm exceeds the maximum of {max_width_cm} x {max_height_cm} cm")]
    TooLarge {
        width_cm: String,
        height_cm: String,
        max_width_cm: u32,
        max_height_cm: u32,
    },

    /// The configuration cannot be produced (no price exists for it).
    #[error("{0} is not available in this combination")]
    NotOrderable(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
