//! # Domain Types
//!
//! Small shared types used by every product configurator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │  DesignOption   │   │   PrintSides    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (i32)      │   │  Upload         │   │  Single         │       │
//! │  │  1000 = +10%    │   │  TextOnly       │   │  Double         │       │
//! │  │  -2000 = -20%   │   │  Pro (+fee)     │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ProductKind    │   │  PricingBasis   │                             │
//! │  │  banner, ...    │   │  m² or piece    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Rate
// =============================================================================

/// A signed percentage in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%. `1000` is +10%, `-2000` is -20%.
/// Integer storage keeps catalog files exact; the multiplier is derived as
/// an exact decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(i32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: i32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a whole percentage (`10` → +10%).
    #[inline]
    pub const fn from_percent(pct: i32) -> Self {
        Rate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> i32 {
        self.0
    }

    /// Returns the multiplier: `1 + bps / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tipo_core::types::Rate;
    ///
    /// assert_eq!(Rate::from_percent(10).factor(), dec!(1.10));
    /// assert_eq!(Rate::from_percent(-20).factor(), dec!(0.80));
    /// ```
    pub fn factor(&self) -> Decimal {
        Decimal::ONE + Decimal::new(self.0 as i64, 4)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

/// Signed percentage label: `+10%`, `-20%`, `+2.5%`.
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "+" };
        let pct = Decimal::new((self.0 as i64).abs(), 2).normalize();
        write!(f, "{}{}%", sign, pct)
    }
}

// =============================================================================
// Design Option
// =============================================================================

/// How the artwork is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DesignOption {
    /// Customer uploads print-ready artwork.
    #[default]
    Upload,
    /// Customer supplies text only; layout is free.
    TextOnly,
    /// Professional design service (flat fee).
    Pro,
}

impl DesignOption {
    /// Cart metadata label.
    pub fn label(&self) -> &'static str {
        match self {
            DesignOption::Upload => "Grafică proprie",
            DesignOption::TextOnly => "Doar text",
            DesignOption::Pro => "Design profesional",
        }
    }
}

// =============================================================================
// Print Sides
// =============================================================================

/// Single- or double-sided print.
///
/// Part of price-table keys: double-sided rows are their own reference
/// prices, never a multiplier of the single-sided row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrintSides {
    #[default]
    Single,
    Double,
}

impl PrintSides {
    /// Maps the UI checkbox to a side count.
    pub fn from_double(print_double: bool) -> Self {
        if print_double {
            PrintSides::Double
        } else {
            PrintSides::Single
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrintSides::Single => "Print o față",
            PrintSides::Double => "Print față-verso",
        }
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// The configurators priced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Banner,
    Sticker,
    RigidPanel,
    Canvas,
    Rollup,
    Flyer,
}

impl ProductKind {
    /// Display name used in cart titles.
    pub fn title(&self) -> &'static str {
        match self {
            ProductKind::Banner => "Banner",
            ProductKind::Sticker => "Autocolant",
            ProductKind::RigidPanel => "Panou rigid",
            ProductKind::Canvas => "Tablou canvas",
            ProductKind::Rollup => "Roll-up",
            ProductKind::Flyer => "Flyer",
        }
    }

    /// Stable identifier, identical to the JSON `product` tag.
    pub fn id(&self) -> &'static str {
        match self {
            ProductKind::Banner => "banner",
            ProductKind::Sticker => "sticker",
            ProductKind::RigidPanel => "rigid_panel",
            ProductKind::Canvas => "canvas",
            ProductKind::Rollup => "rollup",
            ProductKind::Flyer => "flyer",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// Pricing Basis
// =============================================================================

/// The unit a product's price table is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingBasis {
    /// Price per square meter of total area.
    SquareMeter,
    /// Price per piece.
    Piece,
}

// =============================================================================
// Unit Tests
// =============================================================================
