//! Investment domain models.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};
use crate::month::{Month, MonthIndex};

/// Asset type key ("fund", "stock", "fixed income", ...).
///
/// Owner-defined and open-ended, so a newtype over the raw string rather
/// than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetType(String);

impl AssetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for AssetType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Account key carried on every investment record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for AccountId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Fixed-term deposit contract attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDepositTerms {
    pub term_months: u32,
    /// Annual simple-interest rate as a fraction (0.03 = 3%).
    pub annual_rate: Decimal,
    /// Maturity month as entered by the owner; engines derive maturity from
    /// the start month and term instead of trusting it.
    pub maturity: Option<Month>,
}

/// What kind of investment a record describes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InvestmentKind {
    #[default]
    Standard,
    TimeDeposit(TimeDepositTerms),
}

/// One contribution/valuation event for a traditional asset.
///
/// `amount` is the money put in during `month` (zero for snapshot-only
/// entries); `snapshot` is the total account value as of `month`, when one
/// was taken. Records are append-only; edits replace whole records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvestmentRecordWire", into = "InvestmentRecordWire")]
pub struct InvestmentRecord {
    pub id: String,
    pub month: Month,
    pub account: AccountId,
    pub amount: Decimal,
    pub snapshot: Option<Decimal>,
    pub kind: InvestmentKind,
}

impl InvestmentRecord {
    pub fn new(month: Month, account: AccountId, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            month,
            account,
            amount,
            snapshot: None,
            kind: InvestmentKind::Standard,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Decimal) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn as_time_deposit(mut self, terms: TimeDepositTerms) -> Self {
        self.kind = InvestmentKind::TimeDeposit(terms);
        self
    }

    pub fn is_time_deposit(&self) -> bool {
        matches!(self.kind, InvestmentKind::TimeDeposit(_))
    }

    pub fn deposit_terms(&self) -> Option<&TimeDepositTerms> {
        match &self.kind {
            InvestmentKind::TimeDeposit(terms) => Some(terms),
            InvestmentKind::Standard => None,
        }
    }
}

/// Flat persisted shape for an investment record.
///
/// The frontend stores the month key under `date` and an `isTimeDeposit`
/// flag next to optional term fields; parsing rebuilds the tagged kind and
/// rejects records that claim to be deposits without carrying their terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentRecordWire {
    id: String,
    #[serde(rename = "date")]
    month: Month,
    account: AccountId,
    amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    snapshot: Option<Decimal>,
    #[serde(default)]
    is_time_deposit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deposit_term_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annual_interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maturity_date: Option<Month>,
}

impl TryFrom<InvestmentRecordWire> for InvestmentRecord {
    type Error = ValidationError;

    fn try_from(wire: InvestmentRecordWire) -> std::result::Result<Self, ValidationError> {
        let kind = if wire.is_time_deposit {
            let term_months = wire
                .deposit_term_months
                .ok_or_else(|| ValidationError::MissingField("depositTermMonths".to_string()))?;
            let annual_rate = wire
                .annual_interest_rate
                .ok_or_else(|| ValidationError::MissingField("annualInterestRate".to_string()))?;
            InvestmentKind::TimeDeposit(TimeDepositTerms {
                term_months,
                annual_rate,
                maturity: wire.maturity_date,
            })
        } else {
            InvestmentKind::Standard
        };

        Ok(Self {
            id: wire.id,
            month: wire.month,
            account: wire.account,
            amount: wire.amount,
            snapshot: wire.snapshot,
            kind,
        })
    }
}

impl From<InvestmentRecord> for InvestmentRecordWire {
    fn from(record: InvestmentRecord) -> Self {
        let (is_time_deposit, terms) = match record.kind {
            InvestmentKind::TimeDeposit(terms) => (true, Some(terms)),
            InvestmentKind::Standard => (false, None),
        };
        Self {
            id: record.id,
            month: record.month,
            account: record.account,
            amount: record.amount,
            snapshot: record.snapshot,
            is_time_deposit,
            deposit_term_months: terms.as_ref().map(|t| t.term_months),
            annual_interest_rate: terms.as_ref().map(|t| t.annual_rate),
            maturity_date: terms.and_then(|t| t.maturity),
        }
    }
}

/// One month's return-rate entry in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPoint {
    pub month: Month,
    pub return_rate: Decimal,
}

/// Month-ordered return-rate series for one account or asset type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSeries<K> {
    pub key: K,
    pub points: Vec<ReturnPoint>,
}

/// Portfolio-wide ROI entry: profit relative to the month's contributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiPoint {
    pub month: Month,
    pub roi: Decimal,
}

/// Series point re-indexed onto a full month axis. `None` marks a month
/// without data; charts render it as a gap, never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedReturnPoint {
    pub month: Month,
    pub return_rate: Option<Decimal>,
}

/// A recorded account value at one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPoint {
    pub month: Month,
    pub snapshot: Decimal,
}

/// Investment records grouped by asset type, in the persisted shape.
///
/// Buckets keep records in insertion order. Consumers that merge buckets
/// see them concatenated in asset-type order, which fixes the tie-break
/// when several records share a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestmentLedger(BTreeMap<AssetType, Vec<InvestmentRecord>>);

impl InvestmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to `asset_type`'s bucket.
    pub fn add(&mut self, asset_type: AssetType, record: InvestmentRecord) {
        self.0.entry(asset_type).or_default().push(record);
    }

    /// Replaces the record at `index` in `asset_type`'s bucket.
    pub fn update(
        &mut self,
        asset_type: &AssetType,
        index: usize,
        record: InvestmentRecord,
    ) -> Result<()> {
        let slot = self
            .0
            .get_mut(asset_type)
            .and_then(|records| records.get_mut(index))
            .ok_or_else(|| Error::NotFound(format!("{} record {}", asset_type, index)))?;
        *slot = record;
        Ok(())
    }

    /// Removes and returns the record at `index` in `asset_type`'s bucket.
    /// A bucket left empty is pruned.
    pub fn remove(&mut self, asset_type: &AssetType, index: usize) -> Result<InvestmentRecord> {
        let records = self
            .0
            .get_mut(asset_type)
            .ok_or_else(|| Error::NotFound(format!("{} record {}", asset_type, index)))?;
        if index >= records.len() {
            return Err(Error::NotFound(format!("{} record {}", asset_type, index)));
        }
        let removed = records.remove(index);
        if records.is_empty() {
            self.0.remove(asset_type);
        }
        Ok(removed)
    }

    /// The records for one asset type, in insertion order.
    pub fn records_for(&self, asset_type: &AssetType) -> &[InvestmentRecord] {
        self.0.get(asset_type).map_or(&[], |records| records)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetType, &Vec<InvestmentRecord>)> {
        self.0.iter()
    }

    pub fn iter_records(&self) -> impl Iterator<Item = &InvestmentRecord> {
        self.0.values().flatten()
    }

    pub fn asset_types(&self) -> impl Iterator<Item = &AssetType> {
        self.0.keys()
    }

    /// Every distinct account seen across all asset types, sorted.
    pub fn accounts(&self) -> Vec<AccountId> {
        let accounts: BTreeSet<AccountId> = self
            .iter_records()
            .map(|record| record.account.clone())
            .collect();
        accounts.into_iter().collect()
    }

    /// Every month with at least one record, across all asset types.
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
