//! # Pricing Orchestrator
//!
//! One parameterized pipeline shared by every product configurator.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingRequest                                                        │
//! │    measurement (area / count) ─► Measure { unit, total, billed }       │
//! │    bands (from the table lookup; None = not sold) ─► ResolvedBand      │
//! │    surcharges ─► compose() ─► adjusted unit price                      │
//! │                                                                         │
//! │  stepped  = adjusted unit × billed                                     │
//! │  capped   = min(stepped, cheapest later break point)                   │
//! │  final    = round(capped + flat fees + pro design fee)                 │
//! │                                                                         │
//! │  Any missing input ─► sentinel breakdown (final price 0)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Break Points
//! Step pricing alone lets a bigger order cost less than a smaller one
//! (4.99 m² at 45 is more than 5 m² at 40). The stepped total is capped at
//! what the smallest total of any later band would cost with the same
//! surcharges, so the final price never drops when quantity or area grows.
//! The reduction is reported as `break_credit`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::area::{effective_quantity, measure_area, measure_count, Measure};
use crate::pricing::surcharge::{compose, Composition, FlatFee, Surcharge};
use crate::pricing::tier::{BandTable, ResolvedBand};
use crate::pricing::upsell::{advise, discount_percent, UpsellSuggestion};
use crate::types::{DesignOption, PricingBasis};

// =============================================================================
// Request
// =============================================================================

/// How the billed total is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Priced per m² of total area.
    Area {
        width_cm: Option<Decimal>,
        height_cm: Option<Decimal>,
        min_billable_m2: Decimal,
    },
    /// Priced per piece.
    Count,
}

impl Measurement {
    pub fn basis(&self) -> PricingBasis {
        match self {
            Measurement::Area { .. } => PricingBasis::SquareMeter,
            Measurement::Count => PricingBasis::Piece,
        }
    }
}

/// Everything the orchestrator needs to price one configuration.
#[derive(Debug, Clone)]
pub struct PricingRequest<'a> {
    pub measurement: Measurement,
    pub quantity: u32,
    /// Bands for the selected table row; `None` when the combination is not
    /// sold.
    pub bands: Option<&'a BandTable>,
    pub surcharges: Vec<Surcharge>,
    pub flat_fees: Vec<FlatFee>,
    pub design: DesignOption,
    /// Charged once when `design` is [`DesignOption::Pro`].
    pub pro_design_fee: Money,
}

// =============================================================================
// Breakdown
// =============================================================================

/// One line of the surcharge section of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeLine {
    pub label: String,
    /// Contribution to the order total, rounded for display.
    pub amount: Money,
}

/// The itemized result of pricing a configuration.
///
/// `final_price` is computed from exact intermediates and rounded once; the
/// itemized amounts are rounded individually for display and may differ
/// from it by a ban.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub basis: PricingBasis,
    /// Clamped piece count.
    pub quantity: u32,
    /// Area of one piece (m²) or 1.
    #[ts(as = "String")]
    pub unit_area_or_count: Decimal,
    /// Total area rounded to 0.01 m², or the piece count.
    #[ts(as = "String")]
    pub total_area_or_count: Decimal,
    /// Total raised to the product minimum.
    #[ts(as = "String")]
    pub billed_area_or_count: Decimal,
    /// Band price per m² or per piece, before surcharges.
    #[ts(as = "String")]
    pub price_per_unit: Decimal,
    /// Zero-based band index; `None` for the sentinel.
    pub tier: Option<u32>,
    /// Saving of the resolved band against the first band, in whole percent.
    pub tier_discount_percent: u32,
    /// `price_per_unit × billed`.
    pub base_amount: Money,
    pub surcharges: Vec<SurchargeLine>,
    /// Zero or negative: reduction from the break-point cap.
    pub break_credit: Money,
    pub pro_design_fee: Money,
    pub final_price: Money,
}

impl PriceBreakdown {
    /// The "not orderable" breakdown: every amount is zero.
    pub fn sentinel(basis: PricingBasis, quantity: u32) -> Self {
        PriceBreakdown {
            basis,
            quantity: effective_quantity(quantity),
            unit_area_or_count: Decimal::ZERO,
            total_area_or_count: Decimal::ZERO,
            billed_area_or_count: Decimal::ZERO,
            price_per_unit: Decimal::ZERO,
            tier: None,
            tier_discount_percent: 0,
            base_amount: Money::zero(),
            surcharges: Vec::new(),
            break_credit: Money::zero(),
            pro_design_fee: Money::zero(),
            final_price: Money::zero(),
        }
    }

    fn sentinel_for(basis: PricingBasis, measure: &Measure) -> Self {
        PriceBreakdown {
            unit_area_or_count: measure.unit,
            total_area_or_count: measure.total,
            billed_area_or_count: measure.billed,
            ..PriceBreakdown::sentinel(basis, measure.quantity)
        }
    }

    /// A zero final price means the configuration cannot be ordered.
    #[inline]
    pub fn is_orderable(&self) -> bool {
        self.final_price.is_positive()
    }

    /// Cart unit price: `final_price / quantity`.
    pub fn unit_price(&self) -> Money {
        self.final_price.per_unit(self.quantity)
    }
}

/// Breakdown plus the optional upsell hint.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    pub breakdown: PriceBreakdown,
    pub upsell: Option<UpsellSuggestion>,
}

impl PricingOutcome {
    fn sentinel(breakdown: PriceBreakdown) -> Self {
        PricingOutcome {
            breakdown,
            upsell: None,
        }
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Prices a request.
///
/// Never fails: missing dimensions, a missing table row, an empty band
/// list or amounts too large for `Money` produce the sentinel breakdown.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tipo_core::money::Money;
/// use tipo_core::pricing::engine::{price, Measurement, PricingRequest};
/// use tipo_core::pricing::tier::{BandTable, Boundary};
/// use tipo_core::types::DesignOption;
///
/// let bands = BandTable::stepped(
///     Boundary::LowerInclusive,
///     dec!(0.01),
///     &[dec!(5), dec!(20)],
///     &[dec!(45), dec!(40), dec!(35)],
/// );
/// let request = PricingRequest {
///     measurement: Measurement::Area {
///         width_cm: Some(dec!(300)),
///         height_cm: Some(dec!(100)),
///         min_billable_m2: dec!(0.5),
///     },
///     quantity: 1,
///     bands: Some(&bands),
///     surcharges: vec![],
///     flat_fees: vec![],
///     design: DesignOption::Upload,
///     pro_design_fee: Money::from_cents(5000),
/// };
///
/// let outcome = price(&request);
/// assert_eq!(outcome.breakdown.final_price, Money::from_cents(13500));
/// assert_eq!(outcome.upsell.unwrap().required_quantity, 2);
/// ```
pub fn price(request: &PricingRequest<'_>) -> PricingOutcome {
    let basis = request.measurement.basis();

    let measure = match request.measurement {
        Measurement::Area {
            width_cm,
            height_cm,
            min_billable_m2,
        } => measure_area(width_cm, height_cm, request.quantity, min_billable_m2),
        Measurement::Count => Some(measure_count(request.quantity)),
    };
    let Some(measure) = measure else {
        return PricingOutcome::sentinel(PriceBreakdown::sentinel(basis, request.quantity));
    };

    let Some(bands) = request.bands else {
        return PricingOutcome::sentinel(PriceBreakdown::sentinel_for(basis, &measure));
    };
    if measure.billed <= Decimal::ZERO {
        return PricingOutcome::sentinel(PriceBreakdown::sentinel_for(basis, &measure));
    }
    let Some(resolved) = bands.resolve(measure.billed) else {
        return PricingOutcome::sentinel(PriceBreakdown::sentinel_for(basis, &measure));
    };

    let composition = compose(resolved.price, &request.surcharges);
    let Some(breakdown) = itemize(request, bands, resolved, &composition, &measure) else {
        return PricingOutcome::sentinel(PriceBreakdown::sentinel_for(basis, &measure));
    };
    if breakdown.final_price.is_zero() {
        return PricingOutcome::sentinel(PriceBreakdown::sentinel_for(basis, &measure));
    }

    PricingOutcome {
        breakdown,
        upsell: advise(bands, resolved, &measure),
    }
}

/// Amounts for a resolved band. `None` when any amount overflows.
fn itemize(
    request: &PricingRequest<'_>,
    bands: &BandTable,
    resolved: ResolvedBand,
    composition: &Composition,
    measure: &Measure,
) -> Option<PriceBreakdown> {
    let billed = measure.billed;

    let stepped = composition.adjusted_unit.checked_mul(billed)?;
    let mut capped = stepped;
    for k in resolved.index + 1..bands.len() {
        let (Some(first), Some(band_price)) = (bands.first_total(k), bands.price_at(k)) else {
            continue;
        };
        let cost = first
            .max(billed)
            .checked_mul(band_price)?
            .checked_mul(composition.factor)?;
        capped = capped.min(cost);
    }
    let credit = capped - stepped;

    let mut surcharges = Vec::with_capacity(composition.steps.len() + request.flat_fees.len());
    for step in &composition.steps {
        surcharges.push(SurchargeLine {
            label: step.label.clone(),
            amount: Money::try_from_decimal(step.unit_delta.checked_mul(billed)?)?,
        });
    }

    let mut fees = Decimal::ZERO;
    for fee in &request.flat_fees {
        fees = fees.checked_add(fee.amount.to_decimal())?;
        surcharges.push(SurchargeLine {
            label: fee.label(),
            amount: fee.amount,
        });
    }

    let pro_design_fee = match request.design {
        DesignOption::Pro => request.pro_design_fee,
        _ => Money::zero(),
    };
    fees = fees.checked_add(pro_design_fee.to_decimal())?;

    Some(PriceBreakdown {
        basis: request.measurement.basis(),
        quantity: measure.quantity,
        unit_area_or_count: measure.unit,
        total_area_or_count: measure.total,
        billed_area_or_count: billed,
        price_per_unit: resolved.price,
        tier: u32::try_from(resolved.index).ok(),
        tier_discount_percent: bands
            .list_price()
            .map_or(0, |list| discount_percent(list, resolved.price)),
        base_amount: Money::try_from_decimal(resolved.price.checked_mul(billed)?)?,
        surcharges,
        break_credit: Money::try_from_decimal(credit)?,
        pro_design_fee,
        final_price: Money::try_from_decimal(capped.checked_add(fees)?)?.max(Money::zero()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::surcharge::Stage;
    use crate::pricing::tier::Boundary;
    use crate::types::Rate;
    use rust_decimal_macros::dec;

    fn banner_bands() -> BandTable {
        BandTable::stepped(
            Boundary::LowerInclusive,
            dec!(0.01),
            &[dec!(5), dec!(20), dec!(50), dec!(100)],
            &[dec!(45), dec!(40), dec!(35), dec!(30), dec!(27)],
        )
    }

    fn area_request(bands: Option<&BandTable>, w: Option<Decimal>, h: Option<Decimal>, q: u32) -> PricingRequest<'_> {
        PricingRequest {
            measurement: Measurement::Area {
                width_cm: w,
                height_cm: h,
                min_billable_m2: dec!(0.5),
            },
            quantity: q,
            bands,
            surcharges: vec![],
            flat_fees: vec![],
            design: DesignOption::Upload,
            pro_design_fee: Money::from_cents(5000),
        }
    }

    #[test]
    fn test_banner_single_piece() {
        let bands = banner_bands();
        let out = price(&area_request(Some(&bands), Some(dec!(300)), Some(dec!(100)), 1));
        let b = &out.breakdown;

        assert_eq!(b.total_area_or_count, dec!(3));
        assert_eq!(b.price_per_unit, dec!(45));
        assert_eq!(b.tier, Some(0));
        assert_eq!(b.tier_discount_percent, 0);
        assert_eq!(b.final_price, Money::from_cents(13500));
        assert!(b.break_credit.is_zero());

        let upsell = out.upsell.unwrap();
        assert_eq!(upsell.required_quantity, 2);
        assert_eq!(upsell.new_unit_price, dec!(40));
        assert_eq!(upsell.discount_percent, 11);
    }

    #[test]
    fn test_band_price_applies_to_all_units() {
        let bands = banner_bands();
        let out = price(&area_request(Some(&bands), Some(dec!(300)), Some(dec!(100)), 20));
        let b = &out.breakdown;

        assert_eq!(b.total_area_or_count, dec!(60));
        assert_eq!(b.price_per_unit, dec!(30));
        assert_eq!(b.tier, Some(3));
        assert_eq!(b.tier_discount_percent, 33);
        assert_eq!(b.final_price, Money::from_cents(180000));
        assert_eq!(b.unit_price(), Money::from_cents(9000));
    }

    #[test]
    fn test_sentinel_for_missing_inputs() {
        let bands = banner_bands();

        let missing_height = price(&area_request(Some(&bands), Some(dec!(300)), None, 1));
        assert!(missing_height.breakdown.final_price.is_zero());
        assert!(!missing_height.breakdown.is_orderable());
        assert!(missing_height.upsell.is_none());

        let zero_width = price(&area_request(Some(&bands), Some(dec!(0)), Some(dec!(100)), 1));
        assert!(zero_width.breakdown.final_price.is_zero());

        let not_sold = price(&area_request(None, Some(dec!(300)), Some(dec!(100)), 1));
        assert!(not_sold.breakdown.final_price.is_zero());
        assert_eq!(not_sold.breakdown.total_area_or_count, dec!(3));
        assert!(not_sold.breakdown.tier.is_none());
    }

    #[test]
    fn test_pro_design_fee_added_once() {
        let bands = banner_bands();
        let mut request = area_request(Some(&bands), Some(dec!(300)), Some(dec!(100)), 4);
        request.design = DesignOption::Pro;

        let b = price(&request).breakdown;
        // 12 m² × 40 + 50
        assert_eq!(b.pro_design_fee, Money::from_cents(5000));
        assert_eq!(b.final_price, Money::from_cents(53000));
    }

    #[test]
    fn test_surcharges_and_flat_fees() {
        let bands = BandTable::flat(dec!(0.01), dec!(100));
        let mut request = area_request(Some(&bands), Some(dec!(100)), Some(dec!(100)), 1);
        request.surcharges = vec![
            Surcharge::new(Stage::Lamination, "Laminare", Rate::from_percent(10)),
            Surcharge::new(Stage::Finish, "Tăiere pe contur", Rate::from_percent(15)),
        ];
        request.flat_fees = vec![FlatFee::new("Grafică diferită", Money::from_cents(2500))];

        let b = price(&request).breakdown;
        // 100 × 1.15 × 1.10 = 126.50, + 25
        assert_eq!(b.final_price, Money::from_cents(15150));
        assert_eq!(b.base_amount, Money::from_cents(10000));
        assert_eq!(b.surcharges.len(), 3);
        assert_eq!(b.surcharges[0].label, "Tăiere pe contur (+15%)");
        assert_eq!(b.surcharges[0].amount, Money::from_cents(1500));
        assert_eq!(b.surcharges[1].amount, Money::from_cents(1150));
        assert_eq!(b.surcharges[2].amount, Money::from_cents(2500));
    }

    #[test]
    fn test_break_point_cap() {
        // 4.98 m² at 45 = 224.10; 5.00 m² at 40 = 200.00
        let bands = banner_bands();
        let out = price(&area_request(Some(&bands), Some(dec!(166)), Some(dec!(100)), 3));
        let b = &out.breakdown;

        assert_eq!(b.total_area_or_count, dec!(4.98));
        assert_eq!(b.price_per_unit, dec!(45));
        assert_eq!(b.final_price, Money::from_cents(20000));
        assert_eq!(b.break_credit, Money::from_cents(-2410));
    }

    #[test]
    fn test_minimum_billable_area() {
        let bands = banner_bands();
        let b = price(&area_request(Some(&bands), Some(dec!(10)), Some(dec!(10)), 1)).breakdown;
        assert_eq!(b.total_area_or_count, dec!(0.01));
        assert_eq!(b.billed_area_or_count, dec!(0.5));
        assert_eq!(b.final_price, Money::from_cents(2250));
    }

    #[test]
    fn test_count_measurement() {
        let bands = BandTable::stepped(
            Boundary::UpperInclusive,
            dec!(1),
            &[dec!(1), dec!(4)],
            &[dec!(249), dec!(229), dec!(209)],
        );
        let request = PricingRequest {
            measurement: Measurement::Count,
            quantity: 0,
            bands: Some(&bands),
            surcharges: vec![],
            flat_fees: vec![],
            design: DesignOption::Upload,
            pro_design_fee: Money::zero(),
        };
        let b = price(&request).breakdown;
        assert_eq!(b.basis, PricingBasis::Piece);
        assert_eq!(b.quantity, 1);
        assert_eq!(b.final_price, Money::from_cents(24900));
    }

    #[test]
    fn test_overflowing_amounts_give_sentinel() {
        let bands = banner_bands();
        let side = Some(dec!(1000000000000000));

        for quantity in [1, 1000, u32::MAX] {
            let out = price(&area_request(Some(&bands), side, side, quantity));
            assert!(out.breakdown.final_price.is_zero(), "quantity {}", quantity);
            assert!(out.breakdown.tier.is_none());
            assert!(out.upsell.is_none());
        }

        // still priced when the amount fits
        let out = price(&area_request(Some(&bands), Some(dec!(100000)), Some(dec!(100000)), 1000));
        assert!(out.breakdown.is_orderable());
    }

    #[test]
    fn test_idempotent() {
        let bands = banner_bands();
        let request = area_request(Some(&bands), Some(dec!(123.4)), Some(dec!(56.7)), 7);
        assert_eq!(price(&request), price(&request));
    }
}
