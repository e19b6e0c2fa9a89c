//! # tipo-core: Parametric Pricing for the Tipo Print Storefront
//!
//! This crate turns a product configuration (dimensions, quantity, material,
//! options) into a price breakdown and an upsell hint. It is pure: no I/O,
//! no global state, no logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tipo Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Configurator UI / tipo-quote CLI                   │   │
//! │  │      size inputs ──► live price ──► upsell hint ──► add to cart │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON ProductConfig                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tipo-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ products  │  │  pricing  │  │  catalog  │  │ validation│  │   │
//! │  │   │  Banner   │  │ area/tier │  │  tables   │  │  limits   │  │   │
//! │  │   │  Canvas.. │  │ surcharge │  │  rates    │  │  quantity │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STATE • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tipo-store (Collaborators)                   │   │
//! │  │          store config, catalog files, cart with line merging    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`products`] - One configurator per product, plus the tagged [`ProductConfig`]
//! - [`pricing`] - Area calculator, table lookup, tiers, surcharges, upsell, engine
//! - [`catalog`] - Built-in price lists, surcharge rates and fees
//! - [`money`] - Integer bani with half-away-from-zero rounding
//! - [`types`] - Shared option types
//! - [`validation`] - Checks run before an item enters the cart
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Fail closed**: a missing dimension or an unsold combination prices at 0
//! 2. **Tables are ground truth**: no row is derived from another by formula
//! 3. **Round once**: intermediates are exact decimals, the final price is
//!    rounded to the ban at the end
//! 4. **Never cheaper for more**: the final price does not drop when quantity
//!    or area grows
//!
//! ## Example Usage
//!
//! ```rust
//! use tipo_core::{Catalog, Money, ProductConfig};
//!
//! let catalog = Catalog::standard();
//! let config = ProductConfig::from_json(
//!     r#"{ "product": "banner", "widthCm": 300, "heightCm": 100, "quantity": 20 }"#,
//! ).unwrap();
//!
//! let quote = config.quote(&catalog);
//! // 60 m² fall in the 50-100 m² band: 30 lei/m² for every piece
//! assert_eq!(quote.breakdown.final_price, Money::from_cents(180000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod products;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{PriceBreakdown, UpsellSuggestion};
pub use products::{ProductConfig, Quote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest quantity accepted on one order line.
///
/// Also bounds the upsell search: a cheaper band that needs more pieces than
/// this is not suggested.
pub const MAX_ORDER_QUANTITY: u32 = 100_000;
