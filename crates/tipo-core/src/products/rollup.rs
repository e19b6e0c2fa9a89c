//! # Roll-up
//!
//! Roll-up banner stands priced per piece by width and model. "Graphic only"
//! is a reprint for a stand the customer already owns.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{default_quantity, quote_product, PricedProduct, Quote};
use crate::catalog::Catalog;
use crate::pricing::engine::{Measurement, PricingRequest};
use crate::pricing::surcharge::{Stage, Surcharge};
use crate::types::{DesignOption, ProductKind};

/// Stand width in cm (all stands are 200 cm tall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RollupSize {
    #[default]
    #[serde(rename = "85")]
    W85,
    #[serde(rename = "100")]
    W100,
    #[serde(rename = "120")]
    W120,
    #[serde(rename = "150")]
    W150,
}

impl RollupSize {
    pub fn width_cm(&self) -> u32 {
        match self {
            RollupSize::W85 => 85,
            RollupSize::W100 => 100,
            RollupSize::W120 => 120,
            RollupSize::W150 => 150,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RollupModel {
    #[default]
    Economy,
    Premium,
}

impl RollupModel {
    pub fn label(&self) -> &'static str {
        match self {
            RollupModel::Economy => "Economic",
            RollupModel::Premium => "Premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollupKey {
    pub size: RollupSize,
    pub model: RollupModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RollupConfig {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub size: RollupSize,
    #[serde(default)]
    pub model: RollupModel,
    #[serde(default)]
    pub graphic_only: bool,
    #[serde(default)]
    pub design_option: DesignOption,
}

impl Default for RollupConfig {
    fn default() -> Self {
        RollupConfig {
            quantity: 1,
            size: RollupSize::default(),
            model: RollupModel::default(),
            graphic_only: false,
            design_option: DesignOption::default(),
        }
    }
}

const GRAPHIC_ONLY: &str = "Doar print";

impl PricedProduct for RollupConfig {
    const KIND: ProductKind = ProductKind::Rollup;

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn design_option(&self) -> DesignOption {
        self.design_option
    }

    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c> {
        let key = RollupKey {
            size: self.size,
            model: self.model,
        };
        let surcharges = if self.graphic_only {
            vec![Surcharge::new(Stage::PrintType, GRAPHIC_ONLY, catalog.rates.graphic_only)]
        } else {
            Vec::new()
        };

        PricingRequest {
            measurement: Measurement::Count,
            quantity: self.quantity,
            bands: catalog.rollup.lookup(&key),
            surcharges,
            flat_fees: Vec::new(),
            design: self.design_option,
            pro_design_fee: catalog.fees.pro_design,
        }
    }

    fn option_labels(&self, _catalog: &Catalog) -> Vec<String> {
        let mut labels = vec![
            format!("{} x 200 cm", self.size.width_cm()),
            self.model.label().to_string(),
        ];
        if self.graphic_only {
            labels.push(GRAPHIC_ONLY.to_string());
        }
        labels
    }
}

/// Prices a roll-up order.
pub fn calculate_rollup_price(config: &RollupConfig, catalog: &Catalog) -> Quote {
    quote_product(config, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_economy_85() {
        let quote = calculate_rollup_price(&RollupConfig::default(), &Catalog::standard());
        assert_eq!(quote.breakdown.final_price, Money::from_cents(24900));
        assert_eq!(quote.summary[0], "85 x 200 cm");

        let upsell = quote.upsell.unwrap();
        assert_eq!(upsell.required_quantity, 2);
        assert_eq!(upsell.new_unit_price, dec!(229));
        assert_eq!(upsell.discount_percent, 8);
    }

    #[test]
    fn test_graphic_only_discount() {
        let config = RollupConfig {
            graphic_only: true,
            quantity: 2,
            ..Default::default()
        };
        let b = calculate_rollup_price(&config, &Catalog::standard()).breakdown;
        // 2 × 229 × 0.8
        assert_eq!(b.final_price, Money::from_cents(36640));
        assert_eq!(b.surcharges[0].amount, Money::from_cents(-9160));
    }

    #[test]
    fn test_premium_150_not_sold() {
        let config = RollupConfig {
            size: RollupSize::W150,
            model: RollupModel::Premium,
            ..Default::default()
        };
        assert!(!calculate_rollup_price(&config, &Catalog::standard()).is_orderable());
    }
}
