//! Precious metal domain models.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::month::{Month, MonthIndex};

/// Metal type key ("gold", "silver", ...).
///
/// Owner-defined and open-ended, so a newtype over the raw string rather
/// than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetalType(String);

impl MetalType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetalType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for MetalType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One purchase of physical metal.
///
/// `price_per_gram` is what was paid; `average_price` is the market
/// valuation price captured with the entry. Cost basis uses the former,
/// mark-to-market the latter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreciousMetalRecord {
    pub id: String,
    /// Purchase month, persisted under the frontend's `date` key.
    #[serde(rename = "date")]
    pub month: Month,
    pub metal_type: MetalType,
    pub grams: Decimal,
    pub price_per_gram: Decimal,
    pub average_price: Decimal,
    /// Frontend-computed purchase cost; engines recompute from grams and
    /// price instead of trusting it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
}

impl PreciousMetalRecord {
    pub fn new(
        month: Month,
        metal_type: MetalType,
        grams: Decimal,
        price_per_gram: Decimal,
        average_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            month,
            metal_type,
            grams,
            price_per_gram,
            average_price,
            total_amount: None,
        }
    }

    /// Purchase cost of this record.
    pub fn cost(&self) -> Decimal {
        self.grams * self.price_per_gram
    }
}

/// Position summary for one metal type as of some month.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalStats {
    pub total_grams: Decimal,
    pub total_amount: Decimal,
    pub current_value: Decimal,
    pub total_profit: Decimal,
    pub monthly_profit: Decimal,
}

/// Purchase records grouped by metal type, in the persisted shape.
///
/// Buckets keep records in insertion order; that order is the tie-break
/// when several records share a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetalLedger(BTreeMap<MetalType, Vec<PreciousMetalRecord>>);

impl MetalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to its metal type's bucket.
    pub fn add(&mut self, record: PreciousMetalRecord) {
        self.0
            .entry(record.metal_type.clone())
            .or_default()
            .push(record);
    }

    /// Replaces the record at `index` in `metal_type`'s bucket. When the
    /// replacement names a different metal type the record moves to that
    /// bucket instead.
    pub fn update(
        &mut self,
        metal_type: &MetalType,
        index: usize,
        record: PreciousMetalRecord,
    ) -> Result<()> {
        if record.metal_type == *metal_type {
            let slot = self
                .0
                .get_mut(metal_type)
                .and_then(|records| records.get_mut(index))
                .ok_or_else(|| Error::NotFound(format!("{} record {}", metal_type, index)))?;
            *slot = record;
        } else {
            self.remove(metal_type, index)?;
            self.add(record);
        }
        Ok(())
    }

    /// Removes and returns the record at `index` in `metal_type`'s bucket.
    /// A bucket left empty is pruned.
    pub fn remove(&mut self, metal_type: &MetalType, index: usize) -> Result<PreciousMetalRecord> {
        let records = self
            .0
            .get_mut(metal_type)
            .ok_or_else(|| Error::NotFound(format!("{} record {}", metal_type, index)))?;
        if index >= records.len() {
            return Err(Error::NotFound(format!("{} record {}", metal_type, index)));
        }
        let removed = records.remove(index);
        if records.is_empty() {
            self.0.remove(metal_type);
        }
        Ok(removed)
    }

    /// The records for one metal type, in insertion order.
    pub fn records_for(&self, metal_type: &MetalType) -> &[PreciousMetalRecord] {
        self.0.get(metal_type).map_or(&[], |records| records)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetalType, &Vec<PreciousMetalRecord>)> {
        self.0.iter()
    }

    pub fn iter_records(&self) -> impl Iterator<Item = &PreciousMetalRecord> {
        self.0.values().flatten()
    }

    pub fn metal_types(&self) -> impl Iterator<Item = &MetalType> {
        self.0.keys()
    }

    /// Every month with at least one purchase, across all metal types.
    pub fn months(&self) -> MonthIndex {
        self.iter_records().map(|record| record.month).collect()
    }

    /// Total record count across all buckets.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
