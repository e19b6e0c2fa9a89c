//! # Area/Unit Calculator
//!
//! Converts a configuration's physical size into the unit its price table
//! uses.
//!
//! ```text
//! width_cm, height_cm, quantity
//!      │
//!      ▼
//! unit  = (width / 100) × (height / 100)          exact m²
//! total = round(unit × quantity, 2)               tier lookup key
//! billed = max(total, product minimum)            what is charged
//! ```
//!
//! Counted products (canvas, roll-up, flyer) skip the area math: one piece is
//! one unit.

use rust_decimal::{Decimal, RoundingStrategy};

/// Centimeters per meter.
const CM_PER_M: i64 = 100;

/// Quantities below one are clamped to one.
#[inline]
pub fn effective_quantity(quantity: u32) -> u32 {
    quantity.max(1)
}

/// Rounds a total area to 0.01 m², half away from zero.
///
/// Totals are rounded before tier lookup so that floating user input such as
/// `33.33 cm` cannot make a total flicker across a band edge.
#[inline]
pub fn round_area(area: Decimal) -> Decimal {
    area.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// How a measure was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    Area,
    Count,
}

/// The quantities a price is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measure {
    pub kind: MeasureKind,
    /// Area of one piece in m², or 1 for counted products.
    pub unit: Decimal,
    /// Clamped piece count.
    pub quantity: u32,
    /// `unit × quantity`, rounded to 0.01 m² for areas.
    pub total: Decimal,
    /// `total` raised to the product minimum.
    pub billed: Decimal,
    /// Minimum billable total for the product.
    pub min_billable: Decimal,
}

impl Measure {
    /// Recomputes the measure for another quantity of the same piece.
    ///
    /// `None` when the total does not fit a `Decimal`.
    pub fn rescale(&self, quantity: u32) -> Option<Measure> {
        let quantity = effective_quantity(quantity);
        let raw = self.unit.checked_mul(Decimal::from(quantity))?;
        let total = match self.kind {
            MeasureKind::Area => round_area(raw),
            MeasureKind::Count => raw,
        };
        Some(Measure {
            quantity,
            total,
            billed: total.max(self.min_billable),
            ..*self
        })
    }
}

/// Measures an area-priced configuration.
///
/// Returns `None` when either dimension is missing, zero or negative, or when
/// the area overflows; the caller turns that into the sentinel price.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tipo_core::pricing::area::measure_area;
///
/// let m = measure_area(Some(dec!(300)), Some(dec!(100)), 1, dec!(0.5)).unwrap();
/// assert_eq!(m.unit, dec!(3));
/// assert_eq!(m.total, dec!(3.00));
///
/// assert!(measure_area(Some(dec!(300)), None, 1, dec!(0.5)).is_none());
/// ```
pub fn measure_area(
    width_cm: Option<Decimal>,
    height_cm: Option<Decimal>,
    quantity: u32,
    min_billable: Decimal,
) -> Option<Measure> {
    let width = width_cm.filter(|w| *w > Decimal::ZERO)?;
    let height = height_cm.filter(|h| *h > Decimal::ZERO)?;

    let per_m = Decimal::from(CM_PER_M);
    let unit = (width / per_m).checked_mul(height / per_m)?;

    let seed = Measure {
        kind: MeasureKind::Area,
        unit,
        quantity: 1,
        total: Decimal::ZERO,
        billed: Decimal::ZERO,
        min_billable: min_billable.max(Decimal::ZERO),
    };
    seed.rescale(quantity)
}

/// Measures a counted product: one unit per piece.
pub fn measure_count(quantity: u32) -> Measure {
    let quantity = effective_quantity(quantity);
    let total = Decimal::from(quantity);
    Measure {
        kind: MeasureKind::Count,
        unit: Decimal::ONE,
        quantity,
        total,
        billed: total,
        min_billable: Decimal::ZERO,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_and_total_area() {
        let m = measure_area(Some(dec!(300)), Some(dec!(100)), 20, Decimal::ZERO).unwrap();
        assert_eq!(m.unit, dec!(3));
        assert_eq!(m.quantity, 20);
        assert_eq!(m.total, dec!(60));
        assert_eq!(m.billed, dec!(60));
    }

    #[test]
    fn test_total_is_rounded_to_hundredths() {
        // 33.33 × 33.33 cm = 0.11108889 m² per piece
        let m = measure_area(Some(dec!(33.33)), Some(dec!(33.33)), 3, Decimal::ZERO).unwrap();
        assert_eq!(m.unit, dec!(0.11108889));
        assert_eq!(m.total, dec!(0.33));

        // 0.125 → 0.13 (half away from zero)
        let m = measure_area(Some(dec!(50)), Some(dec!(25)), 1, Decimal::ZERO).unwrap();
        assert_eq!(m.total, dec!(0.13));
    }

    #[test]
    fn test_missing_or_zero_dimensions() {
        assert!(measure_area(None, Some(dec!(100)), 1, Decimal::ZERO).is_none());
        assert!(measure_area(Some(dec!(100)), None, 1, Decimal::ZERO).is_none());
        assert!(measure_area(Some(dec!(0)), Some(dec!(100)), 1, Decimal::ZERO).is_none());
        assert!(measure_area(Some(dec!(100)), Some(dec!(-5)), 1, Decimal::ZERO).is_none());
    }

    #[test]
    fn test_quantity_clamped_to_one() {
        let m = measure_area(Some(dec!(100)), Some(dec!(100)), 0, Decimal::ZERO).unwrap();
        assert_eq!(m.quantity, 1);
        assert_eq!(m.total, dec!(1));

        assert_eq!(measure_count(0).quantity, 1);
    }

    #[test]
    fn test_minimum_billable_area() {
        // 5 × 5 cm sticker: 0.0025 m² rounds to 0.00, billed at the minimum
        let m = measure_area(Some(dec!(5)), Some(dec!(5)), 1, dec!(0.25)).unwrap();
        assert_eq!(m.total, dec!(0.00));
        assert_eq!(m.billed, dec!(0.25));
    }

    #[test]
    fn test_rescale_keeps_unit() {
        let m = measure_area(Some(dec!(300)), Some(dec!(100)), 1, dec!(0.5)).unwrap();
        let bigger = m.rescale(2).unwrap();
        assert_eq!(bigger.unit, dec!(3));
        assert_eq!(bigger.total, dec!(6));

        let counted = measure_count(4).rescale(10).unwrap();
        assert_eq!(counted.total, dec!(10));
        assert_eq!(counted.billed, dec!(10));
    }

    #[test]
    fn test_overflowing_area_is_unmeasured() {
        let side = Some(dec!(1000000000000000));
        // 1e13 m per side: 1e26 m² still fits
        let m = measure_area(side, side, 1, dec!(0.5)).unwrap();
        assert_eq!(m.total, dec!(100000000000000000000000000));

        assert!(measure_area(side, side, 1000, dec!(0.5)).is_none());
        assert!(m.rescale(u32::MAX).is_none());

        let wider = Some(dec!(100000000000000000000));
        assert!(measure_area(wider, wider, 1, dec!(0.5)).is_none());
    }
}
