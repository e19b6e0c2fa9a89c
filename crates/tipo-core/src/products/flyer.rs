//! # Flyer
//!
//! Offset-style flyers priced per piece. Every combination of format,
//! paper, fold and sides is its own row; folding is only offered on A4 at
//! 170 g.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{default_quantity, quote_product, PricedProduct, Quote};
use crate::catalog::Catalog;
use crate::pricing::engine::{Measurement, PricingRequest};
use crate::types::{DesignOption, PrintSides, ProductKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FlyerFormat {
    A6,
    #[default]
    A5,
    A4,
}

impl FlyerFormat {
    pub fn label(&self) -> &'static str {
        match self {
            FlyerFormat::A6 => "A6 (105 x 148 mm)",
            FlyerFormat::A5 => "A5 (148 x 210 mm)",
            FlyerFormat::A4 => "A4 (210 x 297 mm)",
        }
    }
}

/// Coated paper weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FlyerPaper {
    #[default]
    #[serde(rename = "130g")]
    Gsm130,
    #[serde(rename = "170g")]
    Gsm170,
}

impl FlyerPaper {
    pub fn label(&self) -> &'static str {
        match self {
            FlyerPaper::Gsm130 => "Hârtie lucioasă 130 g",
            FlyerPaper::Gsm170 => "Hârtie lucioasă 170 g",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FlyerFold {
    #[default]
    None,
    Half,
    Tri,
}

impl FlyerFold {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            FlyerFold::None => None,
            FlyerFold::Half => Some("Împăturire în 2"),
            FlyerFold::Tri => Some("Împăturire în 3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlyerKey {
    pub format: FlyerFormat,
    pub paper: FlyerPaper,
    pub fold: FlyerFold,
    pub sides: PrintSides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlyerConfig {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub format: FlyerFormat,
    #[serde(default)]
    pub paper: FlyerPaper,
    #[serde(default)]
    pub fold: FlyerFold,
    #[serde(default)]
    pub print_double: bool,
    #[serde(default)]
    pub design_option: DesignOption,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        FlyerConfig {
            quantity: 1,
            format: FlyerFormat::default(),
            paper: FlyerPaper::default(),
            fold: FlyerFold::default(),
            print_double: false,
            design_option: DesignOption::default(),
        }
    }
}

impl FlyerConfig {
    fn key(&self) -> FlyerKey {
        FlyerKey {
            format: self.format,
            paper: self.paper,
            fold: self.fold,
            sides: PrintSides::from_double(self.print_double),
        }
    }
}

impl PricedProduct for FlyerConfig {
    const KIND: ProductKind = ProductKind::Flyer;

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn design_option(&self) -> DesignOption {
        self.design_option
    }

    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c> {
        PricingRequest {
            measurement: Measurement::Count,
            quantity: self.quantity,
            bands: catalog.flyer.lookup(&self.key()),
            surcharges: Vec::new(),
            flat_fees: Vec::new(),
            design: self.design_option,
            pro_design_fee: catalog.fees.pro_design,
        }
    }

    fn option_labels(&self, _catalog: &Catalog) -> Vec<String> {
        let mut labels = vec![
            self.format.label().to_string(),
            self.paper.label().to_string(),
            PrintSides::from_double(self.print_double).label().to_string(),
        ];
        labels.extend(self.fold.label().map(str::to_string));
        labels
    }
}

/// Prices a flyer run.
pub fn calculate_flyer_price(config: &FlyerConfig, catalog: &Catalog) -> Quote {
    quote_product(config, catalog)
}
