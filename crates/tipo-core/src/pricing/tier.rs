//! # Quantity/Area Tier Resolver
//!
//! Step pricing: a total (m² or pieces) falls into exactly one band and the
//! band's price applies to the whole order. No interpolation.
//!
//! ## Boundary Rules
//! ```text
//!   bands:  [0 ─── 5] [5 ─── 20] [20 ─── ∞)
//!   price:     45         40         35
//!
//!   total = 5.00
//!   ├── UpperInclusive → band 0 (45)   "up to and including 5 m²"
//!   └── LowerInclusive → band 1 (40)   "from 5 m²"
//! ```
//! The rule is declared per table because the reference price lists use
//! both conventions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Which side of a bound a total exactly equal to it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// `total == bound` stays in the band that ends at `bound`.
    #[default]
    UpperInclusive,
    /// `total == bound` moves to the next band.
    LowerInclusive,
}

/// One step of a price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    /// Upper bound of the band; `None` means unbounded.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Price per m² or per piece.
    pub price: Decimal,
}

/// The band a total resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBand {
    pub index: usize,
    pub price: Decimal,
}

/// An ordered list of bands with its boundary rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandTable {
    #[serde(default)]
    pub boundary: Boundary,
    /// Smallest step a total can move by (0.01 m², 1 piece).
    pub granularity: Decimal,
    pub bands: Vec<Band>,
}

impl BandTable {
    /// Builds a table from `n - 1` bounds and `n` prices; the last band is
    /// unbounded.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tipo_core::pricing::tier::{BandTable, Boundary};
    ///
    /// let table = BandTable::stepped(
    ///     Boundary::UpperInclusive,
    ///     dec!(1),
    ///     &[dec!(1), dec!(4)],
    ///     &[dec!(249), dec!(229), dec!(209)],
    /// );
    /// assert_eq!(table.resolve(dec!(4)).unwrap().price, dec!(229));
    /// assert_eq!(table.resolve(dec!(5)).unwrap().price, dec!(209));
    /// ```
    pub fn stepped(
        boundary: Boundary,
        granularity: Decimal,
        bounds: &[Decimal],
        prices: &[Decimal],
    ) -> Self {
        let bands = prices
            .iter()
            .enumerate()
            .map(|(i, price)| Band {
                up_to: bounds.get(i).copied(),
                price: *price,
            })
            .collect();
        BandTable {
            boundary,
            granularity,
            bands,
        }
    }

    /// A single unbounded band (flat price per unit).
    pub fn flat(granularity: Decimal, price: Decimal) -> Self {
        BandTable::stepped(Boundary::UpperInclusive, granularity, &[], &[price])
    }

    /// Number of bands.
    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Price of the first (most expensive) band.
    pub fn list_price(&self) -> Option<Decimal> {
        self.bands.first().map(|b| b.price)
    }

    /// Price of band `index`.
    pub fn price_at(&self, index: usize) -> Option<Decimal> {
        self.bands.get(index).map(|b| b.price)
    }

    /// Resolves the band for a total.
    ///
    /// The first band whose bound admits the total wins; the last band is
    /// treated as unbounded whatever its `up_to` says.
    pub fn resolve(&self, total: Decimal) -> Option<ResolvedBand> {
        let last = self.bands.len().checked_sub(1)?;
        let index = self.bands[..last]
            .iter()
            .position(|band| match band.up_to {
                Some(bound) => self.admits(total, bound),
                None => true,
            })
            .unwrap_or(last);
        Some(ResolvedBand {
            index,
            price: self.bands[index].price,
        })
    }

    fn admits(&self, total: Decimal, bound: Decimal) -> bool {
        match self.boundary {
            Boundary::UpperInclusive => total <= bound,
            Boundary::LowerInclusive => total < bound,
        }
    }

    /// Smallest total that resolves to band `index`.
    ///
    /// Returns `None` for an index past the end or after an unbounded band.
    pub fn first_total(&self, index: usize) -> Option<Decimal> {
        if index == 0 {
            return (!self.bands.is_empty()).then_some(Decimal::ZERO);
        }
        let previous = self.bands.get(index - 1)?.up_to?;
        self.bands.get(index)?;
        Some(match self.boundary {
            Boundary::UpperInclusive => previous + self.granularity,
            Boundary::LowerInclusive => previous,
        })
    }

    /// Checks the structural rules of the table.
    ///
    /// ## Rules
    /// - At least one band
    /// - Granularity is positive
    /// - Prices are non-negative
    /// - Bounds are positive and strictly ascending
    /// - Only the last band may be unbounded
    pub fn validate(&self, table: &str) -> CoreResult<()> {
        let invalid = |reason: String| CoreError::InvalidPriceTable {
            table: table.to_string(),
            reason,
        };

        if self.bands.is_empty() {
            return Err(invalid("must have at least one band".into()));
        }
        if self.granularity <= Decimal::ZERO {
            return Err(invalid("granularity must be positive".into()));
        }

        let last = self.bands.len() - 1;
        let mut previous = Decimal::ZERO;
        for (i, band) in self.bands.iter().enumerate() {
            if band.price < Decimal::ZERO {
                return Err(invalid(format!("band {} has a negative price", i)));
            }
            match band.up_to {
                Some(bound) if bound <= previous => {
                    return Err(invalid(format!(
                        "band {} bound {} does not ascend past {}",
                        i, bound, previous
                    )));
                }
                Some(bound) => previous = bound,
                None if i != last => {
                    return Err(invalid(format!("band {} is unbounded but not last", i)));
                }
                None => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
