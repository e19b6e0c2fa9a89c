//! # Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Catalog      │  │        Cart             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Core           │  │  NotOrderable           │ │
//! │  │  TomlDe/TomlSer │  │  Json           │  │  Validation             │ │
//! │  │  Config         │  │  UnsupportedFmt │  │  LineNotFound, CartFull │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tipo_core::{CoreError, ValidationError};

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML file could not be parsed.
    #[error("Failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// A value could not be written as TOML.
    #[error("Failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// A JSON document could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is well-formed but not usable.
    #[error("Invalid store configuration: {0}")]
    Config(String),

    /// A catalog file with an extension other than `.toml` or `.json`.
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(PathBuf),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    /// Catalog or configuration rejected by the pricing engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An order-level check failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Cart Errors
    // =========================================================================
    /// The quote carries the zero sentinel price.
    #[error("{0} cannot be added to the cart: the configuration has no price")]
    NotOrderable(String),

    /// No cart line with this id.
    #[error("Cart line {0} not found")]
    LineNotFound(String),

    /// The cart already holds the maximum number of lines.
    #[error("Cart cannot have more than {0} lines")]
    CartFull(usize),
}

impl StoreError {
    /// Errors worth showing to the customer as-is.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_)
                | StoreError::NotOrderable(_)
                | StoreError::CartFull(_)
                | StoreError::Core(CoreError::InvalidConfiguration(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = StoreError::NotOrderable("Banner".to_string());
        assert_eq!(
            err.to_string(),
            "Banner cannot be added to the cart: the configuration has no price"
        );
        assert!(err.is_user_facing());

        let err = StoreError::Config("currency symbol is empty".to_string());
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: StoreError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "quantity must be positive");
    }
}
