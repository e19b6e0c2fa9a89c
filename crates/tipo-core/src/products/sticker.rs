//! # Sticker
//!
//! Printed vinyl priced per m² of total area.
//!
//! Print + cut and print-only are separate rows of the reference table, not
//! a discount on one another.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{default_quantity, quote_product, PricedProduct, Quote};
use crate::catalog::Catalog;
use crate::pricing::engine::{Measurement, PricingRequest};
use crate::pricing::surcharge::{Stage, Surcharge};
use crate::types::{DesignOption, ProductKind};
use crate::validation::ProductLimits;

/// Printable roll width × maximum length.
pub const STICKER_LIMITS: ProductLimits = ProductLimits::new(140, 1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StickerMaterial {
    #[default]
    WhiteVinyl,
    TransparentVinyl,
    PolymericVinyl,
}

impl StickerMaterial {
    pub fn label(&self) -> &'static str {
        match self {
            StickerMaterial::WhiteVinyl => "Vinil alb",
            StickerMaterial::TransparentVinyl => "Vinil transparent",
            StickerMaterial::PolymericVinyl => "Vinil polimeric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StickerPrintType {
    #[default]
    PrintCut,
    PrintOnly,
}

impl StickerPrintType {
    pub fn label(&self) -> &'static str {
        match self {
            StickerPrintType::PrintCut => "Print + Cut",
            StickerPrintType::PrintOnly => "Doar print",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerKey {
    pub material: StickerMaterial,
    pub print_type: StickerPrintType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StickerConfig {
    #[serde(default, alias = "width_cm")]
    #[ts(as = "Option<String>")]
    pub width_cm: Option<Decimal>,
    #[serde(default, alias = "height_cm")]
    #[ts(as = "Option<String>")]
    pub height_cm: Option<Decimal>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub material: StickerMaterial,
    #[serde(default)]
    pub print_type: StickerPrintType,
    #[serde(default)]
    pub laminated: bool,
    #[serde(default)]
    pub design_option: DesignOption,
}

impl Default for StickerConfig {
    fn default() -> Self {
        StickerConfig {
            width_cm: None,
            height_cm: None,
            quantity: 1,
            material: StickerMaterial::default(),
            print_type: StickerPrintType::default(),
            laminated: false,
            design_option: DesignOption::default(),
        }
    }
}

const LAMINATION: &str = "Laminare";

impl PricedProduct for StickerConfig {
    const KIND: ProductKind = ProductKind::Sticker;

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
        Some(STICKER_LIMITS)
    }

    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c> {
        let key = StickerKey {
            material: self.material,
            print_type: self.print_type,
        };
        let surcharges = if self.laminated {
            vec![Surcharge::new(Stage::Lamination, LAMINATION, catalog.rates.lamination)]
        } else {
            Vec::new()
        };

        PricingRequest {
            measurement: Measurement::Area {
                width_cm: self.width_cm,
                height_cm: self.height_cm,
                min_billable_m2: catalog.sticker.min_billable,
            },
            quantity: self.quantity,
            bands: catalog.sticker.lookup(&key),
            surcharges,
            flat_fees: Vec::new(),
            design: self.design_option,
            pro_design_fee: catalog.fees.pro_design,
        }
    }

    fn option_labels(&self, _catalog: &Catalog) -> Vec<String> {
        let mut labels = vec![
            self.material.label().to_string(),
            self.print_type.label().to_string(),
        ];
        if self.laminated {
            labels.push(LAMINATION.to_string());
        }
        labels
    }
}

/// Prices a sticker order.
pub fn calculate_sticker_price(config: &StickerConfig, catalog: &Catalog) -> Quote {
    quote_product(config, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    fn sticker(print_type: StickerPrintType) -> StickerConfig {
        StickerConfig {
            width_cm: Some(dec!(50)),
            height_cm: Some(dec!(100)),
            print_type,
            ..Default::default()
        }
    }

    #[test]
    fn test_print_only_reads_its_own_row() {
        let catalog = Catalog::standard();
        let cut = calculate_sticker_price(&sticker(StickerPrintType::PrintCut), &catalog);
        let only = calculate_sticker_price(&sticker(StickerPrintType::PrintOnly), &catalog);

        // 0.5 m² × 75
        assert_eq!(cut.breakdown.final_price, Money::from_cents(3750));
        // 0.5 m² × 58, not 75 × 0.8 = 60
        assert_eq!(only.breakdown.price_per_unit, dec!(58));
        assert_eq!(only.breakdown.final_price, Money::from_cents(2900));
        assert!(only.breakdown.surcharges.is_empty());
    }

    #[test]
    fn test_one_square_meter_stays_in_first_band() {
        let config = StickerConfig {
            width_cm: Some(dec!(100)),
            height_cm: Some(dec!(100)),
            ..Default::default()
        };
        let b = calculate_sticker_price(&config, &Catalog::standard()).breakdown;
        assert_eq!(b.tier, Some(0));
        assert_eq!(b.price_per_unit, dec!(75));
        // capped at 1.01 m² × 65 = 65.65
        assert_eq!(b.final_price, Money::from_cents(6565));
        assert_eq!(b.break_credit, Money::from_cents(-935));
    }

    #[test]
    fn test_lamination() {
        let config = StickerConfig {
            laminated: true,
            ..sticker(StickerPrintType::PrintCut)
        };
        let quote = calculate_sticker_price(&config, &Catalog::standard());
        // 0.5 × 75 × 1.10
        assert_eq!(quote.breakdown.final_price, Money::from_cents(4125));
        assert_eq!(quote.breakdown.surcharges[0].label, "Laminare (+10%)");
        assert!(quote.summary.contains(&"Laminare".to_string()));
    }

    #[test]
    fn test_tiny_sticker_billed_at_minimum() {
        let config = StickerConfig {
            width_cm: Some(dec!(5)),
            height_cm: Some(dec!(5)),
            ..Default::default()
        };
        let b = calculate_sticker_price(&config, &Catalog::standard()).breakdown;
        // 0.25 m² × 75
        assert_eq!(b.final_price, Money::from_cents(1875));
    }
}
