//! # Catalog
//!
//! Reference price lists, surcharge rates and fees for every product.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog::standard()      built-in lists (RON, VAT included)           │
//! │       │                                                                 │
//! │       ▼  tipo-store: optional TOML/JSON override file, fee overrides   │
//! │  Catalog::validate()                                                    │
//! │       │                                                                 │
//! │       ▼  shared by reference, never mutated while pricing              │
//! │  ProductConfig::quote(&catalog)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tables are ground truth. Double-sided rows, print-only rows and
//! discount steps are copied from the price lists as published; none of
//! them is derived from another row by a formula.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::table::{PriceEntry, PriceTable};
use crate::pricing::tier::{BandTable, Boundary};
use crate::products::banner::{BannerKey, BannerMaterial};
use crate::products::canvas::CanvasSize;
use crate::products::flyer::{FlyerFold, FlyerFormat, FlyerKey, FlyerPaper};
use crate::products::rigid::{RigidKey, RigidMaterial};
use crate::products::rollup::{RollupKey, RollupModel, RollupSize};
use crate::products::sticker::{StickerKey, StickerMaterial, StickerPrintType};
use crate::types::{PrintSides, Rate};
use crate::validation::validate_rate_bps;

// =============================================================================
// Fees and Rates
// =============================================================================

/// Flat fees, charged once per order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Professional design service.
    pub pro_design: Money,
    /// Different artwork on the back of a double-sided rigid panel.
    pub different_graphic: Money,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            pro_design: Money::from_major_minor(50, 0),
            different_graphic: Money::from_major_minor(25, 0),
        }
    }
}

/// Percentage modifiers, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeRates {
    pub lamination: Rate,
    pub pole_pockets: Rate,
    pub wind_holes: Rate,
    pub contour_cut: Rate,
    pub gallery_frame: Rate,
    pub varnish: Rate,
    pub graphic_only: Rate,
}

impl Default for SurchargeRates {
    fn default() -> Self {
        SurchargeRates {
            lamination: Rate::from_percent(10),
            pole_pockets: Rate::from_percent(10),
            wind_holes: Rate::from_percent(5),
            contour_cut: Rate::from_percent(15),
            gallery_frame: Rate::from_percent(15),
            varnish: Rate::from_percent(10),
            graphic_only: Rate::from_percent(-20),
        }
    }
}

impl SurchargeRates {
    fn named(&self) -> [(&'static str, Rate); 7] {
        [
            ("lamination", self.lamination),
            ("polePockets", self.pole_pockets),
            ("windHoles", self.wind_holes),
            ("contourCut", self.contour_cut),
            ("galleryFrame", self.gallery_frame),
            ("varnish", self.varnish),
            ("graphicOnly", self.graphic_only),
        ]
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Everything the engine reads while pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub fees: FeeSchedule,
    #[serde(default)]
    pub rates: SurchargeRates,
    pub banner: PriceTable<BannerKey>,
    pub sticker: PriceTable<StickerKey>,
    pub rigid_panel: PriceTable<RigidKey>,
    pub canvas: PriceTable<CanvasSize>,
    pub rollup: PriceTable<RollupKey>,
    pub flyer: PriceTable<FlyerKey>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

impl Catalog {
    /// The built-in price lists.
    pub fn standard() -> Self {
        Catalog {
            fees: FeeSchedule::default(),
            rates: SurchargeRates::default(),
            banner: banner_table(),
            sticker: sticker_table(),
            rigid_panel: rigid_panel_table(),
            canvas: canvas_table(),
            rollup: rollup_table(),
            flyer: flyer_table(),
        }
    }

    /// Checks every table, rate and fee.
    ///
    /// ## Rules
    /// - Tables follow [`BandTable::validate`] and have no duplicate keys
    /// - Counted tables (canvas, roll-up, flyer) have no minimum billable total
    /// - Rates are above -100% and at most +100%
    /// - Fees are not negative
    pub fn validate(&self) -> CoreResult<()> {
        self.banner.validate("banner")?;
        self.sticker.validate("sticker")?;
        self.rigid_panel.validate("rigidPanel")?;
        self.canvas.validate("canvas")?;
        self.rollup.validate("rollup")?;
        self.flyer.validate("flyer")?;

        // Counted products bill every piece; a minimum would never be applied.
        for (table, min_billable) in [
            ("canvas", self.canvas.min_billable),
            ("rollup", self.rollup.min_billable),
            ("flyer", self.flyer.min_billable),
        ] {
            if !min_billable.is_zero() {
                return Err(CoreError::InvalidPriceTable {
                    table: table.to_string(),
                    reason: "counted products have no minimum billable total".into(),
                });
            }
        }

        for (name, rate) in self.rates.named() {
            validate_rate_bps(name, rate.bps()).map_err(|e| CoreError::InvalidSurcharge {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        }

        for (name, fee) in [
            ("proDesign", self.fees.pro_design),
            ("differentGraphic", self.fees.different_graphic),
        ] {
            if fee.is_negative() {
                return Err(CoreError::InvalidSurcharge {
                    name: name.to_string(),
                    reason: "fee must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Built-in Price Lists
// =============================================================================

const AREA_STEP: Decimal = dec!(0.01);
const PIECE_STEP: Decimal = Decimal::ONE;

fn row<K>(key: K, bands: BandTable) -> PriceEntry<K> {
    PriceEntry { key, bands }
}

/// Per m², lower-inclusive: "from 5 m²", "from 20 m²", ...
fn banner_table() -> PriceTable<BannerKey> {
    let bounds = [dec!(5), dec!(20), dec!(50), dec!(100)];
    let bands = |prices: &[Decimal]| {
        BandTable::stepped(Boundary::LowerInclusive, AREA_STEP, &bounds, prices)
    };
    let single = |material| BannerKey {
        material,
        sides: PrintSides::Single,
    };

    PriceTable::new(
        dec!(0.5),
        vec![
            row(
                single(BannerMaterial::Frontlit440),
                bands(&[dec!(45), dec!(40), dec!(35), dec!(30), dec!(27)]),
            ),
            row(
                single(BannerMaterial::Frontlit510),
                bands(&[dec!(55), dec!(49), dec!(43), dec!(38), dec!(34)]),
            ),
            row(
                single(BannerMaterial::Mesh360),
                bands(&[dec!(60), dec!(54), dec!(48), dec!(42), dec!(38)]),
            ),
            row(
                single(BannerMaterial::Blockout),
                bands(&[dec!(65), dec!(59), dec!(52), dec!(46), dec!(42)]),
            ),
            row(
                BannerKey {
                    material: BannerMaterial::Blockout,
                    sides: PrintSides::Double,
                },
                bands(&[dec!(110), dec!(99), dec!(88), dec!(79), dec!(72)]),
            ),
        ],
    )
}

/// Per m², upper-inclusive: "up to 1 m²", "up to 5 m²", ...
fn sticker_table() -> PriceTable<StickerKey> {
    use StickerMaterial::*;
    use StickerPrintType::*;

    let bounds = [dec!(1), dec!(5), dec!(10), dec!(25)];
    let entry = |material, print_type, prices: [Decimal; 5]| {
        row(
            StickerKey {
                material,
                print_type,
            },
            BandTable::stepped(Boundary::UpperInclusive, AREA_STEP, &bounds, &prices),
        )
    };

    PriceTable::new(
        dec!(0.25),
        vec![
            entry(WhiteVinyl, PrintCut, [dec!(75), dec!(65), dec!(58), dec!(52), dec!(47)]),
            entry(WhiteVinyl, PrintOnly, [dec!(58), dec!(51), dec!(45), dec!(41), dec!(37)]),
            entry(TransparentVinyl, PrintCut, [dec!(85), dec!(74), dec!(66), dec!(59), dec!(53)]),
            entry(TransparentVinyl, PrintOnly, [dec!(66), dec!(58), dec!(52), dec!(46), dec!(42)]),
            entry(PolymericVinyl, PrintCut, [dec!(110), dec!(96), dec!(86), dec!(77), dec!(70)]),
            entry(PolymericVinyl, PrintOnly, [dec!(89), dec!(78), dec!(70), dec!(63), dec!(57)]),
        ],
    )
}

/// Per m², upper-inclusive. Plexiglass is not printed on both sides.
fn rigid_panel_table() -> PriceTable<RigidKey> {
    use PrintSides::{Double, Single};
    use RigidMaterial::*;

    let bounds = [dec!(1), dec!(3), dec!(10)];
    let entry = |material, thickness_mm, sides, prices: [Decimal; 4]| {
        row(
            RigidKey {
                material,
                thickness_mm,
                sides,
            },
            BandTable::stepped(Boundary::UpperInclusive, AREA_STEP, &bounds, &prices),
        )
    };

    PriceTable::new(
        dec!(0.10),
        vec![
            entry(Forex, 3, Single, [dec!(95), dec!(85), dec!(76), dec!(68)]),
            entry(Forex, 5, Single, [dec!(120), dec!(108), dec!(97), dec!(88)]),
            entry(Forex, 10, Single, [dec!(175), dec!(158), dec!(142), dec!(128)]),
            entry(Dibond, 3, Single, [dec!(210), dec!(190), dec!(172), dec!(158)]),
            entry(Plexiglass, 3, Single, [dec!(260), dec!(236), dec!(214), dec!(196)]),
            entry(Plexiglass, 5, Single, [dec!(340), dec!(309), dec!(281), dec!(258)]),
            entry(Akylux, 3, Single, [dec!(80), dec!(72), dec!(65), dec!(58)]),
            entry(Forex, 3, Double, [dec!(150), dec!(134), dec!(119), dec!(106)]),
            entry(Forex, 5, Double, [dec!(178), dec!(160), dec!(143), dec!(129)]),
            entry(Forex, 10, Double, [dec!(238), dec!(214), dec!(192), dec!(173)]),
            entry(Dibond, 3, Double, [dec!(315), dec!(284), dec!(257), dec!(235)]),
            entry(Akylux, 3, Double, [dec!(128), dec!(115), dec!(103), dec!(93)]),
        ],
    )
}

/// Per piece: 1, 2-4, 5-9, 10+.
fn canvas_table() -> PriceTable<CanvasSize> {
    use CanvasSize::*;

    let bounds = [dec!(1), dec!(4), dec!(9)];
    let entry = |size, prices: [Decimal; 4]| {
        row(
            size,
            BandTable::stepped(Boundary::UpperInclusive, PIECE_STEP, &bounds, &prices),
        )
    };

    PriceTable::new(
        Decimal::ZERO,
        vec![
            entry(Size20x30, [dec!(69), dec!(62), dec!(56), dec!(50)]),
            entry(Size30x40, [dec!(89), dec!(80), dec!(72), dec!(65)]),
            entry(Size40x60, [dec!(129), dec!(116), dec!(104), dec!(94)]),
            entry(Size50x70, [dec!(159), dec!(143), dec!(129), dec!(116)]),
            entry(Size60x90, [dec!(209), dec!(188), dec!(169), dec!(152)]),
            entry(Size80x120, [dec!(329), dec!(296), dec!(266), dec!(240)]),
            entry(Size100x150, [dec!(459), dec!(413), dec!(372), dec!(335)]),
        ],
    )
}

/// Per piece: 1, 2-4, 5+. The premium cassette is not made 150 cm wide.
fn rollup_table() -> PriceTable<RollupKey> {
    use RollupModel::*;
    use RollupSize::*;

    let bounds = [dec!(1), dec!(4)];
    let entry = |size, model, prices: [Decimal; 3]| {
        row(
            RollupKey { size, model },
            BandTable::stepped(Boundary::UpperInclusive, PIECE_STEP, &bounds, &prices),
        )
    };

    PriceTable::new(
        Decimal::ZERO,
        vec![
            entry(W85, Economy, [dec!(249), dec!(229), dec!(209)]),
            entry(W100, Economy, [dec!(279), dec!(257), dec!(235)]),
            entry(W120, Economy, [dec!(339), dec!(312), dec!(285)]),
            entry(W150, Economy, [dec!(429), dec!(395), dec!(361)]),
            entry(W85, Premium, [dec!(369), dec!(340), dec!(310)]),
            entry(W100, Premium, [dec!(399), dec!(367), dec!(335)]),
            entry(W120, Premium, [dec!(469), dec!(432), dec!(394)]),
        ],
    )
}

/// Per piece, lower-inclusive runs: from 100, 250, 500, 1000, 2500.
fn flyer_table() -> PriceTable<FlyerKey> {
    use FlyerFold::{Half, None as Flat, Tri};
    use FlyerFormat::*;
    use FlyerPaper::*;
    use PrintSides::{Double, Single};

    let bounds = [dec!(100), dec!(250), dec!(500), dec!(1000), dec!(2500)];
    let entry = |format, paper, fold, sides, prices: [Decimal; 6]| {
        row(
            FlyerKey {
                format,
                paper,
                fold,
                sides,
            },
            BandTable::stepped(Boundary::LowerInclusive, PIECE_STEP, &bounds, &prices),
        )
    };

    PriceTable::new(
        Decimal::ZERO,
        vec![
            entry(A6, Gsm130, Flat, Single, [dec!(0.35), dec!(0.27), dec!(0.21), dec!(0.17), dec!(0.14), dec!(0.11)]),
            entry(A6, Gsm130, Flat, Double, [dec!(0.45), dec!(0.35), dec!(0.28), dec!(0.22), dec!(0.18), dec!(0.15)]),
            entry(A6, Gsm170, Flat, Single, [dec!(0.42), dec!(0.33), dec!(0.26), dec!(0.21), dec!(0.17), dec!(0.14)]),
            entry(A6, Gsm170, Flat, Double, [dec!(0.54), dec!(0.42), dec!(0.33), dec!(0.27), dec!(0.22), dec!(0.18)]),
            entry(A5, Gsm130, Flat, Single, [dec!(0.55), dec!(0.42), dec!(0.33), dec!(0.26), dec!(0.21), dec!(0.17)]),
            entry(A5, Gsm130, Flat, Double, [dec!(0.72), dec!(0.55), dec!(0.43), dec!(0.34), dec!(0.28), dec!(0.22)]),
            entry(A5, Gsm170, Flat, Single, [dec!(0.66), dec!(0.51), dec!(0.40), dec!(0.32), dec!(0.26), dec!(0.21)]),
            entry(A5, Gsm170, Flat, Double, [dec!(0.86), dec!(0.66), dec!(0.52), dec!(0.41), dec!(0.33), dec!(0.27)]),
            entry(A4, Gsm130, Flat, Single, [dec!(0.95), dec!(0.74), dec!(0.58), dec!(0.46), dec!(0.37), dec!(0.30)]),
            entry(A4, Gsm130, Flat, Double, [dec!(1.25), dec!(0.97), dec!(0.76), dec!(0.60), dec!(0.49), dec!(0.39)]),
            entry(A4, Gsm170, Flat, Single, [dec!(1.15), dec!(0.89), dec!(0.70), dec!(0.56), dec!(0.45), dec!(0.36)]),
            entry(A4, Gsm170, Flat, Double, [dec!(1.49), dec!(1.16), dec!(0.91), dec!(0.72), dec!(0.58), dec!(0.47)]),
            entry(A4, Gsm170, Half, Single, [dec!(1.35), dec!(1.05), dec!(0.83), dec!(0.66), dec!(0.53), dec!(0.43)]),
            entry(A4, Gsm170, Half, Double, [dec!(1.69), dec!(1.31), dec!(1.03), dec!(0.82), dec!(0.66), dec!(0.53)]),
            entry(A4, Gsm170, Tri, Single, [dec!(1.45), dec!(1.13), dec!(0.89), dec!(0.71), dec!(0.57), dec!(0.46)]),
            entry(A4, Gsm170, Tri, Double, [dec!(1.79), dec!(1.39), dec!(1.09), dec!(0.87), dec!(0.70), dec!(0.56)]),
        ],
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
