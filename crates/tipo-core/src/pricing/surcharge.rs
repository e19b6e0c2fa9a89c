//! # Surcharge Composer
//!
//! Applies optional-feature modifiers to a base unit price.
//!
//! ## Composition Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base unit price (from the band table)                                 │
//! │       │                                                                 │
//! │       ▼  × (1 + material %)        Stage::Material                      │
//! │       ▼  × (1 + print-type %)      Stage::PrintType                     │
//! │       ▼  × (1 + finish %)          Stage::Finish                        │
//! │       ▼  × (1 + lamination %)      Stage::Lamination                    │
//! │       │                                                                 │
//! │  adjusted unit price   (not rounded)                                   │
//! │       │                                                                 │
//! │       ▼  × billed total, + flat fees, round once                       │
//! │  final price                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Percentages compound; they never add up and never apply to an already
//! rounded intermediate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Rate;

/// Where a percentage sits in the composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Material,
    PrintType,
    Finish,
    Lamination,
}

/// A named percentage modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Surcharge {
    pub stage: Stage,
    pub name: String,
    pub rate: Rate,
}

impl Surcharge {
    pub fn new(stage: Stage, name: impl Into<String>, rate: Rate) -> Self {
        Surcharge {
            stage,
            name: name.into(),
            rate,
        }
    }

    /// `"Laminare (+10%)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.rate)
    }
}

/// A named flat fee added once per order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatFee {
    pub name: String,
    pub amount: Money,
}

impl FlatFee {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        FlatFee {
            name: name.into(),
            amount,
        }
    }

    /// `"Grafică diferită față/verso (+25.00 lei)"`
    pub fn label(&self) -> String {
        format!("{} (+{})", self.name, self.amount)
    }
}

/// One applied percentage step.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedSurcharge {
    pub stage: Stage,
    pub label: String,
    /// Change of the unit price caused by this step.
    pub unit_delta: Decimal,
}

/// Result of composing percentages onto a base unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub base_unit: Decimal,
    pub adjusted_unit: Decimal,
    /// Product of all factors; `adjusted_unit = base_unit × factor`.
    pub factor: Decimal,
    pub steps: Vec<AppliedSurcharge>,
}

/// Composes percentage surcharges in stage order.
///
/// Surcharges of the same stage keep their given order (stable sort).
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tipo_core::pricing::surcharge::{compose, Stage, Surcharge};
/// use tipo_core::types::Rate;
///
/// let c = compose(dec!(100), &[
///     Surcharge::new(Stage::Lamination, "Laminare", Rate::from_percent(10)),
///     Surcharge::new(Stage::PrintType, "Doar print", Rate::from_percent(-20)),
/// ]);
/// // print type first: 100 × 0.8 = 80, then lamination: 80 × 1.1 = 88
/// assert_eq!(c.adjusted_unit, dec!(88));
/// assert_eq!(c.steps[0].unit_delta, dec!(-20));
/// assert_eq!(c.steps[1].unit_delta, dec!(8));
/// ```
pub fn compose(base_unit: Decimal, surcharges: &[Surcharge]) -> Composition {
    let mut ordered: Vec<&Surcharge> = surcharges.iter().collect();
    ordered.sort_by_key(|s| s.stage);

    let mut running = base_unit;
    let mut factor = Decimal::ONE;
    let mut steps = Vec::with_capacity(ordered.len());

    for surcharge in ordered {
        let step = surcharge.rate.factor();
        let next = running * step;
        steps.push(AppliedSurcharge {
            stage: surcharge.stage,
            label: surcharge.label(),
            unit_delta: next - running,
        });
        running = next;
        factor *= step;
    }

    Composition {
        base_unit,
        adjusted_unit: running,
        factor,
        steps,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
