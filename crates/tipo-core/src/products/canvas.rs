//! # Canvas
//!
//! Stretched canvas prints in fixed sizes, priced per piece.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{default_quantity, quote_product, PricedProduct, Quote};
use crate::catalog::Catalog;
use crate::pricing::engine::{Measurement, PricingRequest};
use crate::pricing::surcharge::{Stage, Surcharge};
use crate::types::{DesignOption, ProductKind};

/// Frame size in cm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CanvasSize {
    #[serde(rename = "20x30")]
    Size20x30,
    #[default]
    #[serde(rename = "30x40")]
    Size30x40,
    #[serde(rename = "40x60")]
    Size40x60,
    #[serde(rename = "50x70")]
    Size50x70,
    #[serde(rename = "60x90")]
    Size60x90,
    #[serde(rename = "80x120")]
    Size80x120,
    #[serde(rename = "100x150")]
    Size100x150,
}

impl CanvasSize {
    pub fn label(&self) -> &'static str {
        match self {
            CanvasSize::Size20x30 => "20 x 30 cm",
            CanvasSize::Size30x40 => "30 x 40 cm",
            CanvasSize::Size40x60 => "40 x 60 cm",
            CanvasSize::Size50x70 => "50 x 70 cm",
            CanvasSize::Size60x90 => "60 x 90 cm",
            CanvasSize::Size80x120 => "80 x 120 cm",
            CanvasSize::Size100x150 => "100 x 150 cm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CanvasConfig {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub size: CanvasSize,
    /// 4 cm deep frame with the image wrapped round the edges.
    #[serde(default)]
    pub gallery_frame: bool,
    #[serde(default)]
    pub varnish: bool,
    #[serde(default)]
    pub design_option: DesignOption,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            quantity: 1,
            size: CanvasSize::default(),
            gallery_frame: false,
            varnish: false,
            design_option: DesignOption::default(),
        }
    }
}

const GALLERY_FRAME: &str = "Ramă galerie";
const VARNISH: &str = "Lăcuire";

impl PricedProduct for CanvasConfig {
    const KIND: ProductKind = ProductKind::Canvas;

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn design_option(&self) -> DesignOption {
        self.design_option
    }

    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c> {
        let mut surcharges = Vec::new();
        if self.gallery_frame {
            surcharges.push(Surcharge::new(Stage::Material, GALLERY_FRAME, catalog.rates.gallery_frame));
        }
        if self.varnish {
            surcharges.push(Surcharge::new(Stage::Lamination, VARNISH, catalog.rates.varnish));
        }

        PricingRequest {
            measurement: Measurement::Count,
            quantity: self.quantity,
            bands: catalog.canvas.lookup(&self.size),
            surcharges,
            flat_fees: Vec::new(),
            design: self.design_option,
            pro_design_fee: catalog.fees.pro_design,
        }
    }

    fn option_labels(&self, _catalog: &Catalog) -> Vec<String> {
        let mut labels = vec![self.size.label().to_string()];
        if self.gallery_frame {
            labels.push(GALLERY_FRAME.to_string());
        }
        if self.varnish {
            labels.push(VARNISH.to_string());
        }
        labels
    }
}

/// Prices a canvas order.
pub fn calculate_canvas_price(config: &CanvasConfig, catalog: &Catalog) -> Quote {
    quote_product(config, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_piece_bands() {
        let catalog = Catalog::standard();
        let config = CanvasConfig {
            size: CanvasSize::Size40x60,
            quantity: 3,
            ..Default::default()
        };
        let quote = calculate_canvas_price(&config, &catalog);
        // 2-4 pieces at 116
        assert_eq!(quote.breakdown.price_per_unit, dec!(116));
        assert_eq!(quote.breakdown.final_price, Money::from_cents(34800));

        let upsell = quote.upsell.unwrap();
        assert_eq!(upsell.required_quantity, 5);
        assert_eq!(upsell.new_unit_price, dec!(104));
    }

    #[test]
    fn test_frame_and_varnish_order() {
        let config = CanvasConfig {
            size: CanvasSize::Size30x40,
            gallery_frame: true,
            varnish: true,
            ..Default::default()
        };
        let b = calculate_canvas_price(&config, &Catalog::standard()).breakdown;
        // 89 × 1.15 × 1.10 = 112.585 → 112.59
        assert_eq!(b.final_price, Money::from_cents(11259));
        assert_eq!(b.surcharges[0].label, "Ramă galerie (+15%)");
        assert_eq!(b.surcharges[1].label, "Lăcuire (+10%)");
    }

    #[test]
    fn test_size_literals() {
        let size: CanvasSize = serde_json::from_str("\"100x150\"").unwrap();
        assert_eq!(size, CanvasSize::Size100x150);
        assert!(serde_json::from_str::<CanvasSize>("\"13x18\"").is_err());
    }
}
