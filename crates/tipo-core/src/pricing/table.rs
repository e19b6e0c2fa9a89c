//! # Price-Table Lookup
//!
//! Static reference tables keyed by whatever selects a product's price
//! (material, thickness, print sides, size, ...).
//!
//! A lookup either finds the exact key or fails closed. There is no fallback
//! row: a material not offered in a given size is not orderable, and the
//! orchestrator turns the miss into the sentinel price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::pricing::tier::BandTable;

/// One row of a price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry<K> {
    pub key: K,
    pub bands: BandTable,
}

/// A product's price table.
///
/// Rows are kept as a list so catalog files can use structured keys; tables
/// hold a few dozen rows at most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable<K> {
    /// Totals below this are billed as this (m² or pieces).
    #[serde(default)]
    pub min_billable: Decimal,
    pub entries: Vec<PriceEntry<K>>,
}

impl<K: PartialEq> PriceTable<K> {
    pub fn new(min_billable: Decimal, entries: Vec<PriceEntry<K>>) -> Self {
        PriceTable {
            min_billable,
            entries,
        }
    }

    /// Finds the bands for `key`, or `None` when the combination is not sold.
    pub fn lookup(&self, key: &K) -> Option<&BandTable> {
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.bands)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validates every row and rejects duplicate keys.
    pub fn validate(&self, table: &str) -> CoreResult<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.bands.validate(&format!("{}[{}]", table, i))?;
            if self.entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(CoreError::InvalidPriceTable {
                    table: table.to_string(),
                    reason: format!("row {} duplicates an earlier key", i),
                });
            }
        }
        if self.min_billable < Decimal::ZERO {
            return Err(CoreError::InvalidPriceTable {
                table: table.to_string(),
                reason: "minimum billable total is negative".into(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tier::Boundary;
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Finish {
        Matte,
        Gloss,
        Satin,
    }

    fn table() -> PriceTable<Finish> {
        PriceTable::new(
            Decimal::ZERO,
            vec![
                PriceEntry {
                    key: Finish::Matte,
                    bands: BandTable::flat(dec!(1), dec!(10)),
                },
                PriceEntry {
                    key: Finish::Gloss,
                    bands: BandTable::stepped(
                        Boundary::UpperInclusive,
                        dec!(1),
                        &[dec!(10)],
                        &[dec!(12), dec!(11)],
                    ),
                },
            ],
        )
    }

    #[test]
    fn test_lookup_hit() {
        let t = table();
        assert_eq!(t.lookup(&Finish::Gloss).unwrap().len(), 2);
        assert_eq!(t.lookup(&Finish::Matte).unwrap().list_price(), Some(dec!(10)));
    }

    #[test]
    fn test_lookup_fails_closed() {
        assert!(table().lookup(&Finish::Satin).is_none());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut t = table();
        t.entries.push(PriceEntry {
            key: Finish::Matte,
            bands: BandTable::flat(dec!(1), dec!(9)),
        });
        assert!(t.validate("finishes").is_err());
        assert!(table().validate("finishes").is_ok());
    }
}
