//! # Validation Module
//!
//! Order-level checks run before an item may enter the cart.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Configurator UI                                              │
//! │  └── Live price: invalid input shows 0, never an error                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (ProductConfig::from_json)                   │
//! │  └── Unknown materials, sizes, formats are rejected                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Add to cart                                                  │
//! │  └── THIS MODULE: quantity range, production limits                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine never calls these: an oversized banner still gets a
//! price so the customer sees what they typed.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::MAX_ORDER_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest piece a product can be produced at, in cm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductLimits {
    pub max_width_cm: u32,
    pub max_height_cm: u32,
}

impl ProductLimits {
    pub const fn new(max_width_cm: u32, max_height_cm: u32) -> Self {
        ProductLimits {
            max_width_cm,
            max_height_cm,
        }
    }

    /// True when the piece fits in either orientation.
    pub fn fits(&self, width_cm: Decimal, height_cm: Decimal) -> bool {
        let max_w = Decimal::from(self.max_width_cm);
        let max_h = Decimal::from(self.max_height_cm);
        (width_cm <= max_w && height_cm <= max_h) || (width_cm <= max_h && height_cm <= max_w)
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ORDER_QUANTITY`]
///
/// ## Example
/// ```rust
/// use tipo_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(100_001).is_err());
/// ```
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ORDER_QUANTITY),
        });
    }

    Ok(())
}

/// Validates the size of an area-priced piece.
///
/// ## Rules
/// - Width and height are present and positive
/// - The piece fits the production limits, rotated if needed
pub fn validate_dimensions(
    width_cm: Option<Decimal>,
    height_cm: Option<Decimal>,
    limits: &ProductLimits,
) -> ValidationResult<()> {
    let width = require_positive("widthCm", width_cm)?;
    let height = require_positive("heightCm", height_cm)?;

    if !limits.fits(width, height) {
        return Err(ValidationError::TooLarge {
            width_cm: width.normalize().to_string(),
            height_cm: height.normalize().to_string(),
            max_width_cm: limits.max_width_cm,
            max_height_cm: limits.max_height_cm,
        });
    }

    Ok(())
}

fn require_positive(field: &str, value: Option<Decimal>) -> ValidationResult<Decimal> {
    let value = value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Validates a surcharge rate in basis points.
///
/// ## Rules
/// - Above -100% (a discount cannot make the price zero or negative)
/// - At most +100%
pub fn validate_rate_bps(field: &str, bps: i32) -> ValidationResult<()> {
    if bps <= -10000 || bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: -9999,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BANNER: ProductLimits = ProductLimits::new(500, 5000);

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ORDER_QUANTITY).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_ORDER_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(Some(dec!(300)), Some(dec!(100)), &BANNER).is_ok());

        assert_eq!(
            validate_dimensions(None, Some(dec!(100)), &BANNER),
            Err(ValidationError::Required {
                field: "widthCm".to_string()
            })
        );
        assert!(matches!(
            validate_dimensions(Some(dec!(100)), Some(dec!(0)), &BANNER),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_dimensions_fit_either_orientation() {
        // 2000 × 300 only fits rotated
        assert!(validate_dimensions(Some(dec!(2000)), Some(dec!(300)), &BANNER).is_ok());

        let err = validate_dimensions(Some(dec!(600.0)), Some(dec!(600)), &BANNER).unwrap_err();
        assert_eq!(
            err.to_string(),
            "600 x 600 cm exceeds the maximum of 500 x 5000 cm"
        );
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("lamination", 1000).is_ok());
        assert!(validate_rate_bps("graphic_only", -2000).is_ok());
        assert!(validate_rate_bps("x", 10000).is_ok());

        assert!(validate_rate_bps("x", -10000).is_err());
        assert!(validate_rate_bps("x", 10001).is_err());
    }
}
