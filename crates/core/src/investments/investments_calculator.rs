//! Investment calculation engine.
//!
//! Monthly profit, ROI, and return-rate series from contribution and
//! periodic-snapshot records. Every function consumes the complete,
//! unfiltered ledger: profit for a month compares against the most recent
//! earlier snapshot wherever it sits in history, so trimming records first
//! corrupts every later figure. Display ranges are applied to the month
//! axis afterwards.

use std::collections::BTreeMap;

use num_traits::Zero;
use rust_decimal::Decimal;

use super::investments_model::{
    AccountId, AlignedReturnPoint, AssetType, InvestmentLedger, InvestmentRecord, ReturnPoint,
    ReturnSeries, RoiPoint, SnapshotPoint,
};
use crate::month::{Month, MonthIndex};

/// Snapshot recorded for `month`, if any. When several records in the
/// month carry one, the last in the slice wins.
fn snapshot_in(records: &[InvestmentRecord], month: Month) -> Option<Decimal> {
    records
        .iter()
        .rev()
        .filter(|record| record.month == month)
        .find_map(|record| record.snapshot)
}

/// Money contributed during `month` across `records`.
fn contributions_in(records: &[InvestmentRecord], month: Month) -> Decimal {
    records
        .iter()
        .filter(|record| record.month == month)
        .map(|record| record.amount)
        .sum()
}

/// Forward-filled account value: the latest snapshot at or before `month`.
/// The search runs over the full history, crossing gaps of any length.
pub fn snapshot_as_of(records: &[InvestmentRecord], month: Month) -> Option<Decimal> {
    let snapshot_months: MonthIndex = records
        .iter()
        .filter(|record| record.snapshot.is_some())
        .map(|record| record.month)
        .collect();
    let target = snapshot_months.latest_at_or_before(month)?;
    snapshot_in(records, target)
}

/// `value` as a percentage of `base`; zero when the base is not positive.
fn percent_of(value: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::zero() {
        value / base * Decimal::ONE_HUNDRED
    } else {
        Decimal::zero()
    }
}

/// Records regrouped by account. Buckets are concatenated in asset-type
/// order, each keeping its insertion order, so when an account spans
/// several asset types a same-month snapshot tie resolves to the
/// alphabetically last type's entry, not the most recently created one.
fn records_by_account(ledger: &InvestmentLedger) -> BTreeMap<AccountId, Vec<InvestmentRecord>> {
    let mut by_account: BTreeMap<AccountId, Vec<InvestmentRecord>> = BTreeMap::new();
    for record in ledger.iter_records() {
        by_account
            .entry(record.account.clone())
            .or_default()
            .push(record.clone());
    }
    by_account
}

/// Profit attributed to `month` for one account's records:
/// `snapshot(month) - snapshot(previous month with a snapshot) -
/// contributions(month)`.
///
/// Zero when `month` has no snapshot, and zero for the first snapshot ever
/// taken: without an earlier value there is nothing to compare against.
/// The backward search skips months without snapshots, however many.
pub fn calculate_monthly_profit(month: Month, records: &[InvestmentRecord]) -> Decimal {
    let current = match snapshot_in(records, month) {
        Some(snapshot) => snapshot,
        None => return Decimal::ZERO,
    };

    let snapshot_months: MonthIndex = records
        .iter()
        .filter(|record| record.snapshot.is_some())
        .map(|record| record.month)
        .collect();
    let previous = match snapshot_months
        .latest_before(month)
        .and_then(|m| snapshot_in(records, m))
    {
        Some(snapshot) => snapshot,
        None => return Decimal::ZERO,
    };

    current - previous - contributions_in(records, month)
}

/// Profit attributed to `month` across the whole portfolio: per-account
/// profits summed.
pub fn calculate_total_monthly_profit(ledger: &InvestmentLedger, month: Month) -> Decimal {
    records_by_account(ledger)
        .values()
        .map(|records| calculate_monthly_profit(month, records))
        .sum()
}

/// Return-rate points for one snapshot stream, on its own month axis.
fn return_points(records: &[InvestmentRecord]) -> Vec<ReturnPoint> {
    let months: MonthIndex = records.iter().map(|record| record.month).collect();
    let snapshot_months: MonthIndex = records
        .iter()
        .filter(|record| record.snapshot.is_some())
        .map(|record| record.month)
        .collect();

    months
        .months()
        .iter()
        .map(|&month| {
            let profit = calculate_monthly_profit(month, records);
            let base = snapshot_months
                .latest_before(month)
                .and_then(|m| snapshot_in(records, m))
                .unwrap_or(Decimal::ZERO);
            ReturnPoint {
                month,
                return_rate: percent_of(profit, base),
            }
        })
        .collect()
}

/// Month-over-month return rate per account:
/// `profit(month) / snapshot(previous) x 100`, zero whenever the previous
/// snapshot is absent or not positive.
pub fn calculate_monthly_return_by_account(
    ledger: &InvestmentLedger,
) -> Vec<ReturnSeries<AccountId>> {
    records_by_account(ledger)
        .into_iter()
        .map(|(account, records)| ReturnSeries {
            key: account,
            points: return_points(&records),
        })
        .collect()
}

/// The same return aggregation keyed by asset type, treating each type's
/// bucket as one snapshot stream.
pub fn calculate_monthly_return_by_asset_type(
    ledger: &InvestmentLedger,
) -> Vec<ReturnSeries<AssetType>> {
    ledger
        .iter()
        .map(|(asset_type, records)| ReturnSeries {
            key: asset_type.clone(),
            points: return_points(records),
        })
        .collect()
}

/// Portfolio-wide ROI per month: profit relative to that month's
/// contributions, zero when nothing was contributed.
pub fn calculate_overall_monthly_roi(ledger: &InvestmentLedger) -> Vec<RoiPoint> {
    let by_account = records_by_account(ledger);

    ledger
        .months()
        .months()
        .iter()
        .map(|&month| {
            let profit: Decimal = by_account
                .values()
                .map(|records| calculate_monthly_profit(month, records))
                .sum();
            let invested: Decimal = ledger
                .iter_records()
                .filter(|record| record.month == month)
                .map(|record| record.amount)
                .sum();
            RoiPoint {
                month,
                roi: percent_of(profit, invested),
            }
        })
        .collect()
}

/// Portfolio-wide return per month: profit relative to the previous
/// month's total as-of value (forward-filled latest snapshot per account,
/// summed).
pub fn calculate_overall_monthly_return(ledger: &InvestmentLedger) -> Vec<ReturnPoint> {
    let by_account = records_by_account(ledger);

    ledger
        .months()
        .months()
        .iter()
        .map(|&month| {
            let profit: Decimal = by_account
                .values()
                .map(|records| calculate_monthly_profit(month, records))
                .sum();
            let previous_total: Decimal = by_account
                .values()
                .filter_map(|records| snapshot_as_of(records, month.pred()))
                .sum();
            ReturnPoint {
                month,
                return_rate: percent_of(profit, previous_total),
            }
        })
        .collect()
}

/// Sorted union of the months appearing in any of the given series.
pub fn all_unique_months<K>(series: &[ReturnSeries<K>]) -> Vec<Month> {
    let index: MonthIndex = series
        .iter()
        .flat_map(|s| s.points.iter().map(|point| point.month))
        .collect();
    index.months().to_vec()
}

/// Re-indexes a sparse series onto `months`. Months without a data point
/// carry `None` so charts draw a gap instead of a fake zero.
pub fn align_return_data_to_months(
    points: &[ReturnPoint],
    months: &[Month],
) -> Vec<AlignedReturnPoint> {
    months
        .iter()
        .map(|&month| AlignedReturnPoint {
            month,
            return_rate: points
                .iter()
                .find(|point| point.month == month)
                .map(|point| point.return_rate),
        })
        .collect()
}

/// Month-sorted snapshot series per account, for trend charts. A month
/// with several snapshots resolves to the last one in the merged
/// per-account stream.
pub fn group_snapshots_by_account(
    ledger: &InvestmentLedger,
) -> BTreeMap<AccountId, Vec<SnapshotPoint>> {
    records_by_account(ledger)
        .into_iter()
        .map(|(account, records)| {
            let snapshot_months: MonthIndex = records
                .iter()
                .filter(|record| record.snapshot.is_some())
                .map(|record| record.month)
                .collect();
            let points = snapshot_months
                .months()
                .iter()
                .filter_map(|&month| {
                    snapshot_in(&records, month).map(|snapshot| SnapshotPoint { month, snapshot })
                })
                .collect();
            (account, points)
        })
        .collect()
}
