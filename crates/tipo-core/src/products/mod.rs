//! # Product Configurators
//!
//! Each configurator is a declarative description of one storefront product:
//! which table row its options select, which surcharges they add, and how it
//! is measured. The arithmetic lives in [`crate::pricing::engine`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON { "product": "banner", "widthCm": 300, ... }                     │
//! │       │                                                                 │
//! │       ▼  ProductConfig::from_json      (unknown literals rejected)     │
//! │  ProductConfig::Banner(BannerConfig)                                   │
//! │       │                                                                 │
//! │       ▼  PricedProduct::pricing_request(&catalog)                      │
//! │  PricingRequest { measurement, bands, surcharges, fees, design }       │
//! │       │                                                                 │
//! │       ▼  engine::price                                                  │
//! │  Quote { product, breakdown, upsell, summary }                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod banner;
pub mod canvas;
pub mod flyer;
pub mod rigid;
pub mod rollup;
pub mod sticker;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::pricing::engine::{price, PriceBreakdown, PricingRequest};
use crate::pricing::upsell::UpsellSuggestion;
use crate::types::{DesignOption, ProductKind};
use crate::validation::{validate_dimensions, validate_quantity, ProductLimits, ValidationResult};

pub use banner::{calculate_banner_price, BannerConfig};
pub use canvas::{calculate_canvas_price, CanvasConfig};
pub use flyer::{calculate_flyer_price, FlyerConfig};
pub use rigid::{calculate_rigid_panel_price, RigidPanelConfig};
pub use rollup::{calculate_rollup_price, RollupConfig};
pub use sticker::{calculate_sticker_price, StickerConfig};

pub(crate) fn default_quantity() -> u32 {
    1
}

// =============================================================================
// Product Trait
// =============================================================================

/// A configurator the engine can price.
pub trait PricedProduct {
    const KIND: ProductKind;

    /// Requested piece count, before clamping.
    fn quantity(&self) -> u32;

    fn design_option(&self) -> DesignOption;

    /// `(width_cm, height_cm)` for area-priced products.
    fn dimensions(&self) -> Option<(Option<Decimal>, Option<Decimal>)> {
        None
    }

    /// Production limits checked before the item enters the cart.
    fn limits(&self) -> Option<ProductLimits> {
        None
    }

    /// Maps the configuration onto the shared pricing pipeline.
    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c>;

    /// Human-readable option labels, in display order.
    fn option_labels(&self, catalog: &Catalog) -> Vec<String>;
}

/// Prices any configurator and collects its summary labels.
pub fn quote_product<P: PricedProduct>(config: &P, catalog: &Catalog) -> Quote {
    let outcome = price(&config.pricing_request(catalog));

    let mut summary = Vec::new();
    if let Some((Some(width), Some(height))) = config.dimensions() {
        summary.push(format!("{} x {} cm", width.normalize(), height.normalize()));
    }
    summary.extend(config.option_labels(catalog));
    summary.push(config.design_option().label().to_string());

    Quote {
        product: P::KIND,
        breakdown: outcome.breakdown,
        upsell: outcome.upsell,
        summary,
    }
}

/// Shared order checks: quantity range and production limits.
fn validate_product<P: PricedProduct>(config: &P) -> ValidationResult<()> {
    validate_quantity(config.quantity())?;
    if let (Some((width, height)), Some(limits)) = (config.dimensions(), config.limits()) {
        validate_dimensions(width, height, &limits)?;
    }
    Ok(())
}

// =============================================================================
// Quote
// =============================================================================

/// A priced configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub product: ProductKind,
    pub breakdown: PriceBreakdown,
    pub upsell: Option<UpsellSuggestion>,
    /// Option labels stored as cart metadata.
    pub summary: Vec<String>,
}

impl Quote {
    #[inline]
    pub fn is_orderable(&self) -> bool {
        self.breakdown.is_orderable()
    }
}

// =============================================================================
// Tagged Configuration
// =============================================================================

/// Any product configuration, tagged by `product`.
///
/// ## Example
/// ```rust
/// use tipo_core::catalog::Catalog;
/// use tipo_core::money::Money;
/// use tipo_core::products::ProductConfig;
///
/// let config = ProductConfig::from_json(
///     r#"{ "product": "banner", "widthCm": 300, "heightCm": 100, "material": "frontlit_440" }"#,
/// ).unwrap();
/// let quote = config.quote(&Catalog::standard());
/// assert_eq!(quote.breakdown.final_price, Money::from_cents(13500));
///
/// assert!(ProductConfig::from_json(r#"{ "product": "banner", "material": "frontlit_999" }"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "product", rename_all = "snake_case")]
pub enum ProductConfig {
    Banner(BannerConfig),
    Sticker(StickerConfig),
    RigidPanel(RigidPanelConfig),
    Canvas(CanvasConfig),
    Rollup(RollupConfig),
    Flyer(FlyerConfig),
}

impl ProductConfig {
    /// Parses a configuration, rejecting unknown products and option values.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            ProductConfig::Banner(_) => BannerConfig::KIND,
            ProductConfig::Sticker(_) => StickerConfig::KIND,
            ProductConfig::RigidPanel(_) => RigidPanelConfig::KIND,
            ProductConfig::Canvas(_) => CanvasConfig::KIND,
            ProductConfig::Rollup(_) => RollupConfig::KIND,
            ProductConfig::Flyer(_) => FlyerConfig::KIND,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            ProductConfig::Banner(c) => c.quantity(),
            ProductConfig::Sticker(c) => c.quantity(),
            ProductConfig::RigidPanel(c) => c.quantity(),
            ProductConfig::Canvas(c) => c.quantity(),
            ProductConfig::Rollup(c) => c.quantity(),
            ProductConfig::Flyer(c) => c.quantity(),
        }
    }

    /// `(width_cm, height_cm)` for area-priced products.
    pub fn dimensions(&self) -> Option<(Option<Decimal>, Option<Decimal>)> {
        match self {
            ProductConfig::Banner(c) => c.dimensions(),
            ProductConfig::Sticker(c) => c.dimensions(),
            ProductConfig::RigidPanel(c) => c.dimensions(),
            ProductConfig::Canvas(c) => c.dimensions(),
            ProductConfig::Rollup(c) => c.dimensions(),
            ProductConfig::Flyer(c) => c.dimensions(),
        }
    }

    /// Prices the configuration against a catalog.
    pub fn quote(&self, catalog: &Catalog) -> Quote {
        match self {
            ProductConfig::Banner(c) => quote_product(c, catalog),
            ProductConfig::Sticker(c) => quote_product(c, catalog),
            ProductConfig::RigidPanel(c) => quote_product(c, catalog),
            ProductConfig::Canvas(c) => quote_product(c, catalog),
            ProductConfig::Rollup(c) => quote_product(c, catalog),
            ProductConfig::Flyer(c) => quote_product(c, catalog),
        }
    }

    /// Checks run before the item may enter the cart.
    ///
    /// Pricing does not depend on these: an oversized banner is still
    /// quoted.
    pub fn validate_for_order(&self) -> ValidationResult<()> {
        match self {
            ProductConfig::Banner(c) => validate_product(c),
            ProductConfig::Sticker(c) => validate_product(c),
            ProductConfig::RigidPanel(c) => validate_product(c),
            ProductConfig::Canvas(c) => validate_product(c),
            ProductConfig::Rollup(c) => validate_product(c),
            ProductConfig::Flyer(c) => validate_product(c),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
