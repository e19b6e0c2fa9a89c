//! # Pricing Pipeline
//!
//! ```text
//! area ──► table ──► tier ──► surcharge ──► engine ──► upsell
//! ```
//!
//! - [`area`]: dimensions and quantity to billed m² or pieces
//! - [`table`]: exact-key price-table lookup, fails closed
//! - [`tier`]: step bands with a per-table boundary rule
//! - [`surcharge`]: ordered multiplicative modifiers and flat fees
//! - [`upsell`]: nearest cheaper band within reach
//! - [`engine`]: the orchestrator tying the steps together

pub mod area;
pub mod engine;
pub mod surcharge;
pub mod table;
pub mod tier;
pub mod upsell;

pub use engine::{price, Measurement, PriceBreakdown, PricingOutcome, PricingRequest, SurchargeLine};
pub use surcharge::{FlatFee, Stage, Surcharge};
pub use table::{PriceEntry, PriceTable};
pub use tier::{Band, BandTable, Boundary, ResolvedBand};
pub use upsell::UpsellSuggestion;
