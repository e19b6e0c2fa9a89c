//! # Banner
//!
//! PVC banners priced per m² of total area.
//!
//! - Table key: material × print sides. Double-sided print exists only for
//!   blockout; other materials fail closed when `printDouble` is set.
//! - Bands: 5 / 20 / 50 / 100 m², lower-inclusive ("from 5 m²").
//! - Pole pockets +10% and wind holes +5%, both finishing. Mesh is already
//!   perforated, so wind holes are ignored on it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{default_quantity, quote_product, PricedProduct, Quote};
use crate::catalog::Catalog;
use crate::pricing::engine::{Measurement, PricingRequest};
use crate::pricing::surcharge::{Stage, Surcharge};
use crate::types::{DesignOption, PrintSides, ProductKind};
use crate::validation::ProductLimits;

/// Largest banner produced in one piece (roll width × length).
pub const BANNER_LIMITS: ProductLimits = ProductLimits::new(500, 5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BannerMaterial {
    #[default]
    #[serde(rename = "frontlit_440")]
    Frontlit440,
    #[serde(rename = "frontlit_510")]
    Frontlit510,
    #[serde(rename = "mesh_360")]
    Mesh360,
    #[serde(rename = "blockout")]
    Blockout,
}

impl BannerMaterial {
    pub fn label(&self) -> &'static str {
        match self {
            BannerMaterial::Frontlit440 => "Frontlit 440 g",
            BannerMaterial::Frontlit510 => "Frontlit 510 g",
            BannerMaterial::Mesh360 => "Mesh 360 g",
            BannerMaterial::Blockout => "Blockout",
        }
    }

    fn takes_wind_holes(&self) -> bool {
        !matches!(self, BannerMaterial::Mesh360)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BannerFinish {
    /// Eyelets every 50 cm, included in the price.
    #[default]
    Eyelets,
    PolePockets,
}

impl BannerFinish {
    pub fn label(&self) -> &'static str {
        match self {
            BannerFinish::Eyelets => "Capse",
            BannerFinish::PolePockets => "Buzunare pentru bară",
        }
    }
}

/// Banner price-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BannerKey {
    pub material: BannerMaterial,
    pub sides: PrintSides,
}

/// Banner configuration as sent by the configurator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BannerConfig {
    #[serde(default, alias = "width_cm")]
    #[ts(as = "Option<String>")]
    pub width_cm: Option<Decimal>,
    #[serde(default, alias = "height_cm")]
    #[ts(as = "Option<String>")]
    pub height_cm: Option<Decimal>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub material: BannerMaterial,
    #[serde(default)]
    pub finish: BannerFinish,
    #[serde(default)]
    pub want_wind_holes: bool,
    #[serde(default)]
    pub print_double: bool,
    #[serde(default)]
    pub design_option: DesignOption,
}

impl Default for BannerConfig {
    fn default() -> Self {
        BannerConfig {
            width_cm: None,
            height_cm: None,
            quantity: 1,
            material: BannerMaterial::default(),
            finish: BannerFinish::default(),
            want_wind_holes: false,
            print_double: false,
            design_option: DesignOption::default(),
        }
    }
}

impl BannerConfig {
    fn key(&self) -> BannerKey {
        BannerKey {
            material: self.material,
            sides: PrintSides::from_double(self.print_double),
        }
    }

    fn wind_holes_apply(&self) -> bool {
        self.want_wind_holes && self.material.takes_wind_holes()
    }
}

const WIND_HOLES: &str = "Găuri de vânt";

impl PricedProduct for BannerConfig {
    const KIND: ProductKind = ProductKind::Banner;

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn design_option(&self) -> DesignOption {
        self.design_option
    }

    fn dimensions(&self) -> Option<(Option<Decimal>, Option<Decimal>)> {
        Some((self.width_cm, self.height_cm))
    }

    fn limits(&self) -> Option<ProductLimits> {
        Some(BANNER_LIMITS)
    }

    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c> {
        let mut surcharges = Vec::new();
        if self.finish == BannerFinish::PolePockets {
            surcharges.push(Surcharge::new(
                Stage::Finish,
                self.finish.label(),
                catalog.rates.pole_pockets,
            ));
        }
        if self.wind_holes_apply() {
            surcharges.push(Surcharge::new(
                Stage::Finish,
                WIND_HOLES,
                catalog.rates.wind_holes,
            ));
        }

        PricingRequest {
            measurement: Measurement::Area {
                width_cm: self.width_cm,
                height_cm: self.height_cm,
                min_billable_m2: catalog.banner.min_billable,
            },
            quantity: self.quantity,
            bands: catalog.banner.lookup(&self.key()),
            surcharges,
            flat_fees: Vec::new(),
            design: self.design_option,
            pro_design_fee: catalog.fees.pro_design,
        }
    }

    fn option_labels(&self, _catalog: &Catalog) -> Vec<String> {
        let mut labels = vec![
            self.material.label().to_string(),
            PrintSides::from_double(self.print_double).label().to_string(),
            self.finish.label().to_string(),
        ];
        if self.wind_holes_apply() {
            labels.push(WIND_HOLES.to_string());
        }
        labels
    }
}

/// Prices a banner.
pub fn calculate_banner_price(config: &BannerConfig, catalog: &Catalog) -> Quote {
    quote_product(config, catalog)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    fn banner(width: Decimal, height: Decimal, quantity: u32) -> BannerConfig {
        BannerConfig {
            width_cm: Some(width),
            height_cm: Some(height),
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_banner() {
        let quote = calculate_banner_price(&banner(dec!(300), dec!(100), 1), &Catalog::standard());
        let b = &quote.breakdown;

        assert_eq!(b.total_area_or_count, dec!(3));
        assert_eq!(b.price_per_unit, dec!(45));
        assert_eq!(b.final_price, Money::from_cents(13500));
        assert_eq!(b.tier_discount_percent, 0);

        let upsell = quote.upsell.unwrap();
        assert_eq!(upsell.required_quantity, 2);
        assert_eq!(upsell.new_unit_price, dec!(40));
        assert_eq!(upsell.discount_percent, 11);
    }

    #[test]
    fn test_twenty_banners_use_one_band_for_all() {
        let quote = calculate_banner_price(&banner(dec!(300), dec!(100), 20), &Catalog::standard());
        let b = &quote.breakdown;

        assert_eq!(b.total_area_or_count, dec!(60));
        assert_eq!(b.price_per_unit, dec!(30));
        assert_eq!(b.final_price, Money::from_cents(180000));
    }

    #[test]
    fn test_band_starts_at_its_bound() {
        // 500 × 100 cm = exactly 5 m²
        let quote = calculate_banner_price(&banner(dec!(500), dec!(100), 1), &Catalog::standard());
        assert_eq!(quote.breakdown.price_per_unit, dec!(40));
        assert_eq!(quote.breakdown.final_price, Money::from_cents(20000));
    }

    #[test]
    fn test_pole_pockets_and_wind_holes() {
        let config = BannerConfig {
            finish: BannerFinish::PolePockets,
            want_wind_holes: true,
            ..banner(dec!(100), dec!(100), 1)
        };
        let quote = calculate_banner_price(&config, &Catalog::standard());
        // 1 m² × 45 × 1.10 × 1.05 = 51.975 → 51.98
        assert_eq!(quote.breakdown.final_price, Money::from_cents(5198));
        assert!(quote.summary.iter().any(|l| l == WIND_HOLES));
    }

    #[test]
    fn test_wind_holes_ignored_on_mesh() {
        let config = BannerConfig {
            material: BannerMaterial::Mesh360,
            want_wind_holes: true,
            ..banner(dec!(100), dec!(100), 1)
        };
        let quote = calculate_banner_price(&config, &Catalog::standard());
        assert!(quote.breakdown.surcharges.is_empty());
        assert_eq!(quote.breakdown.final_price, Money::from_cents(6000));
    }

    #[test]
    fn test_double_print_only_on_blockout() {
        let catalog = Catalog::standard();

        let frontlit = BannerConfig {
            print_double: true,
            ..banner(dec!(100), dec!(100), 1)
        };
        assert!(calculate_banner_price(&frontlit, &catalog).breakdown.final_price.is_zero());

        let blockout = BannerConfig {
            material: BannerMaterial::Blockout,
            print_double: true,
            ..banner(dec!(100), dec!(100), 1)
        };
        let b = calculate_banner_price(&blockout, &catalog).breakdown;
        assert_eq!(b.price_per_unit, dec!(110));
        assert_eq!(b.final_price, Money::from_cents(11000));
    }

    #[test]
    fn test_small_banner_billed_at_minimum() {
        let quote = calculate_banner_price(&banner(dec!(40), dec!(40), 1), &Catalog::standard());
        assert_eq!(quote.breakdown.total_area_or_count, dec!(0.16));
        assert_eq!(quote.breakdown.billed_area_or_count, dec!(0.5));
        assert_eq!(quote.breakdown.final_price, Money::from_cents(2250));
    }

    #[test]
    fn test_missing_dimension_is_sentinel() {
        let config = BannerConfig {
            width_cm: Some(dec!(300)),
            ..Default::default()
        };
        let quote = calculate_banner_price(&config, &Catalog::standard());
        assert!(!quote.is_orderable());
        assert!(quote.upsell.is_none());
    }
}
