//! # Upsell Advisor
//!
//! Finds the nearest quantity that unlocks a cheaper band: "order 2 to pay
//! 40 lei/m² instead of 45 (-11%)".
//!
//! ## Rule
//! - Scan forward from the current band and stop at the FIRST band whose unit
//!   price is strictly lower. Later, even cheaper bands are not reported.
//! - The band must be reachable: the required quantity is at most
//!   [`MAX_ORDER_QUANTITY`](crate::MAX_ORDER_QUANTITY).
//! - Nothing is suggested from the last band or for a sentinel price.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::area::Measure;
use crate::pricing::tier::{BandTable, ResolvedBand};
use crate::MAX_ORDER_QUANTITY;

/// A cheaper band within reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpsellSuggestion {
    /// Quantity (pieces) that reaches the band.
    pub required_quantity: u32,
    /// Band price per m² or per piece, before surcharges.
    #[ts(as = "String")]
    pub new_unit_price: Decimal,
    /// `(old - new) / old`, in whole percent, rounded half away from zero.
    pub discount_percent: u32,
}

/// Rounded percentage saved going from `old` to `new` unit price.
pub fn discount_percent(old: Decimal, new: Decimal) -> u32 {
    if old <= Decimal::ZERO || new >= old {
        return 0;
    }
    ((old - new) / old * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Suggests the smallest larger quantity that lands in the next cheaper band.
pub fn advise(
    bands: &BandTable,
    current: ResolvedBand,
    measure: &Measure,
) -> Option<UpsellSuggestion> {
    if current.price <= Decimal::ZERO || measure.billed <= Decimal::ZERO {
        return None;
    }

    let target = (current.index + 1..bands.len())
        .find(|&k| bands.price_at(k).is_some_and(|p| p < current.price))?;

    let reaches = |quantity: u32| {
        measure
            .rescale(quantity)
            .and_then(|m| bands.resolve(m.billed))
            .is_some_and(|r| r.index >= target)
    };

    // Billed totals grow with quantity, so `reaches` is monotonic and the
    // smallest reaching quantity can be bisected within the order limit.
    let floor = measure.quantity.checked_add(1)?;
    if floor > MAX_ORDER_QUANTITY || !reaches(MAX_ORDER_QUANTITY) {
        return None;
    }
    let (mut low, mut high) = (floor, MAX_ORDER_QUANTITY);
    while low < high {
        let mid = low + (high - low) / 2;
        if reaches(mid) {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    let quantity = low;

    let reached = bands.resolve(measure.rescale(quantity)?.billed)?;
    if reached.price >= current.price {
        return None;
    }

    Some(UpsellSuggestion {
        required_quantity: quantity,
        new_unit_price: reached.price,
        discount_percent: discount_percent(current.price, reached.price),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::area::{measure_area, measure_count};
    use crate::pricing::tier::Boundary;
    use rust_decimal_macros::dec;

    fn area_bands(boundary: Boundary) -> BandTable {
        BandTable::stepped(
            boundary,
            dec!(0.01),
            &[dec!(5), dec!(20), dec!(50)],
            &[dec!(45), dec!(40), dec!(35), dec!(30)],
        )
    }

    fn piece_bands() -> BandTable {
        BandTable::stepped(
            Boundary::UpperInclusive,
            dec!(1),
            &[dec!(1), dec!(4), dec!(9)],
            &[dec!(89), dec!(80), dec!(72), dec!(65)],
        )
    }

    #[test]
    fn test_area_upsell_to_next_band() {
        let bands = area_bands(Boundary::LowerInclusive);
        let measure = measure_area(Some(dec!(300)), Some(dec!(100)), 1, dec!(0.5)).unwrap();
        let current = bands.resolve(measure.billed).unwrap();

        let s = advise(&bands, current, &measure).unwrap();
        // 2 × 3 m² = 6 m² ≥ 5 m²
        assert_eq!(s.required_quantity, 2);
        assert_eq!(s.new_unit_price, dec!(40));
        // (45 - 40) / 45 = 11.1%
        assert_eq!(s.discount_percent, 11);
    }

    #[test]
    fn test_exact_boundary_depends_on_rule() {
        // 100 × 100 cm = 1 m² per piece
        let measure = measure_area(Some(dec!(100)), Some(dec!(100)), 1, Decimal::ZERO).unwrap();

        let lower = area_bands(Boundary::LowerInclusive);
        let s = advise(&lower, lower.resolve(measure.billed).unwrap(), &measure).unwrap();
        assert_eq!(s.required_quantity, 5);

        let upper = area_bands(Boundary::UpperInclusive);
        let s = advise(&upper, upper.resolve(measure.billed).unwrap(), &measure).unwrap();
        // 5 m² still belongs to the first band; 6 m² is the first step past 5.01
        assert_eq!(s.required_quantity, 6);
    }

    #[test]
    fn test_piece_upsell() {
        let bands = piece_bands();
        let measure = measure_count(3);
        let current = bands.resolve(measure.billed).unwrap();
        assert_eq!(current.price, dec!(80));

        let s = advise(&bands, current, &measure).unwrap();
        assert_eq!(s.required_quantity, 5);
        assert_eq!(s.new_unit_price, dec!(72));
        assert_eq!(s.discount_percent, 10);
    }

    #[test]
    fn test_only_nearest_band_reported() {
        let bands = piece_bands();
        let measure = measure_count(1);
        let s = advise(&bands, bands.resolve(measure.billed).unwrap(), &measure).unwrap();
        assert_eq!(s.required_quantity, 2);
        assert_eq!(s.new_unit_price, dec!(80));
    }

    #[test]
    fn test_skips_bands_that_are_not_cheaper() {
        let bands = BandTable::stepped(
            Boundary::UpperInclusive,
            dec!(1),
            &[dec!(1), dec!(4)],
            &[dec!(50), dec!(50), dec!(40)],
        );
        let measure = measure_count(1);
        let s = advise(&bands, bands.resolve(measure.billed).unwrap(), &measure).unwrap();
        assert_eq!(s.required_quantity, 5);
        assert_eq!(s.new_unit_price, dec!(40));
    }

    #[test]
    fn test_no_upsell_in_last_band() {
        let bands = piece_bands();
        let measure = measure_count(25);
        let current = bands.resolve(measure.billed).unwrap();
        assert!(advise(&bands, current, &measure).is_none());
    }

    #[test]
    fn test_unreachable_band() {
        let bands = BandTable::stepped(
            Boundary::UpperInclusive,
            dec!(1),
            &[dec!(200000)],
            &[dec!(10), dec!(9)],
        );
        let measure = measure_count(1);
        assert!(advise(&bands, bands.resolve(measure.billed).unwrap(), &measure).is_none());
    }

    #[test]
    fn test_tiny_pieces() {
        let bands = area_bands(Boundary::LowerInclusive);

        // 1 × 1 cm: 0.0001 m² per piece; 49 950 pieces round up to 5.00 m²
        let measure = measure_area(Some(dec!(1)), Some(dec!(1)), 1, dec!(0.5)).unwrap();
        let s = advise(&bands, bands.resolve(measure.billed).unwrap(), &measure).unwrap();
        assert_eq!(s.required_quantity, 49950);
        assert_eq!(s.new_unit_price, dec!(40));

        // 0.01 × 0.01 cm: the next band needs ~5e8 pieces
        let measure = measure_area(Some(dec!(0.01)), Some(dec!(0.01)), 1, dec!(0.5)).unwrap();
        assert!(advise(&bands, bands.resolve(measure.billed).unwrap(), &measure).is_none());
    }

    #[test]
    fn test_discount_percent_rounding() {
        assert_eq!(discount_percent(dec!(45), dec!(40)), 11);
        assert_eq!(discount_percent(dec!(40), dec!(39)), 3); // 2.5 → 3
        assert_eq!(discount_percent(dec!(0), dec!(0)), 0);
        assert_eq!(discount_percent(dec!(10), dec!(12)), 0);
    }
}
