//! # Rigid Panel
//!
//! Forex, dibond, plexiglass and akylux boards priced per m² of total area.
//!
//! - Table key: material × thickness × print sides. Not every material comes
//!   in every thickness; a missing row is not orderable.
//! - A different graphic on the back is a flat fee per order and only
//!   applies to double-sided panels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{default_quantity, quote_product, PricedProduct, Quote};
use crate::catalog::Catalog;
use crate::pricing::engine::{Measurement, PricingRequest};
use crate::pricing::surcharge::{FlatFee, Stage, Surcharge};
use crate::types::{DesignOption, PrintSides, ProductKind};
use crate::validation::ProductLimits;

/// Standard board size; fits either way round.
pub const RIGID_PANEL_LIMITS: ProductLimits = ProductLimits::new(300, 200);

fn default_thickness() -> u32 {
    3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RigidMaterial {
    #[default]
    Forex,
    Dibond,
    Plexiglass,
    Akylux,
}

impl RigidMaterial {
    pub fn label(&self) -> &'static str {
        match self {
            RigidMaterial::Forex => "Forex",
            RigidMaterial::Dibond => "Dibond",
            RigidMaterial::Plexiglass => "Plexiglas",
            RigidMaterial::Akylux => "Akylux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigidKey {
    pub material: RigidMaterial,
    pub thickness_mm: u32,
    pub sides: PrintSides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RigidPanelConfig {
    #[serde(default, alias = "width_cm")]
    #[ts(as = "Option<String>")]
    pub width_cm: Option<Decimal>,
    #[serde(default, alias = "height_cm")]
    #[ts(as = "Option<String>")]
    pub height_cm: Option<Decimal>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub material: RigidMaterial,
    #[serde(default = "default_thickness", alias = "thickness")]
    pub thickness_mm: u32,
    #[serde(default)]
    pub print_double: bool,
    #[serde(default)]
    pub different_graphic: bool,
    #[serde(default)]
    pub contour_cut: bool,
    #[serde(default)]
    pub laminated: bool,
    #[serde(default)]
    pub design_option: DesignOption,
}

impl Default for RigidPanelConfig {
    fn default() -> Self {
        RigidPanelConfig {
            width_cm: None,
            height_cm: None,
            quantity: 1,
            material: RigidMaterial::default(),
            thickness_mm: default_thickness(),
            print_double: false,
            different_graphic: false,
            contour_cut: false,
            laminated: false,
            design_option: DesignOption::default(),
        }
    }
}

const CONTOUR_CUT: &str = "Tăiere pe contur";
const LAMINATION: &str = "Laminare";
const DIFFERENT_GRAPHIC: &str = "Grafică diferită față/verso";

impl RigidPanelConfig {
    fn sides(&self) -> PrintSides {
        PrintSides::from_double(self.print_double)
    }

    fn different_graphic_applies(&self) -> bool {
        self.different_graphic && self.sides() == PrintSides::Double
    }
}

impl PricedProduct for RigidPanelConfig {
    const KIND: ProductKind = ProductKind::RigidPanel;

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
        Some(RIGID_PANEL_LIMITS)
    }

    fn pricing_request<'c>(&self, catalog: &'c Catalog) -> PricingRequest<'c> {
        let key = RigidKey {
            material: self.material,
            thickness_mm: self.thickness_mm,
            sides: self.sides(),
        };

        let mut surcharges = Vec::new();
        if self.contour_cut {
            surcharges.push(Surcharge::new(Stage::Finish, CONTOUR_CUT, catalog.rates.contour_cut));
        }
        if self.laminated {
            surcharges.push(Surcharge::new(Stage::Lamination, LAMINATION, catalog.rates.lamination));
        }

        let mut flat_fees = Vec::new();
        if self.different_graphic_applies() {
            flat_fees.push(FlatFee::new(DIFFERENT_GRAPHIC, catalog.fees.different_graphic));
        }

        PricingRequest {
            measurement: Measurement::Area {
                width_cm: self.width_cm,
                height_cm: self.height_cm,
                min_billable_m2: catalog.rigid_panel.min_billable,
            },
            quantity: self.quantity,
            bands: catalog.rigid_panel.lookup(&key),
            surcharges,
            flat_fees,
            design: self.design_option,
            pro_design_fee: catalog.fees.pro_design,
        }
    }

    fn option_labels(&self, _catalog: &Catalog) -> Vec<String> {
        let mut labels = vec![
            format!("{} {} mm", self.material.label(), self.thickness_mm),
            self.sides().label().to_string(),
        ];
        if self.different_graphic_applies() {
            labels.push(DIFFERENT_GRAPHIC.to_string());
        }
        if self.contour_cut {
            labels.push(CONTOUR_CUT.to_string());
        }
        if self.laminated {
            labels.push(LAMINATION.to_string());
        }
        labels
    }
}

/// Prices a rigid panel order.
pub fn calculate_rigid_panel_price(config: &RigidPanelConfig, catalog: &Catalog) -> Quote {
    quote_product(config, catalog)
}
