//! Precious metal calculation engine.
//!
//! Pure functions over purchase histories. Every "as of month" figure is
//! computed from the complete record set up to that month; display
//! filtering happens on the month axis afterwards and never feeds back in.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::metals_model::{MetalLedger, MetalStats, MetalType, PreciousMetalRecord};
use crate::month::{Month, MonthIndex};

/// Total grams held across `records`.
pub fn calculate_total_grams(records: &[PreciousMetalRecord]) -> Decimal {
    records.iter().map(|record| record.grams).sum()
}

/// Total purchase cost across `records` (cost basis, not valuation).
pub fn calculate_total_amount(records: &[PreciousMetalRecord]) -> Decimal {
    records.iter().map(|record| record.cost()).sum()
}

/// Valuation price for a record set: the `average_price` carried by the
/// latest month present. When several records share that month, the last
/// one in insertion order wins.
pub fn latest_average_price(records: &[PreciousMetalRecord]) -> Option<Decimal> {
    let latest_month = records.iter().map(|record| record.month).max()?;
    records
        .iter()
        .rev()
        .find(|record| record.month == latest_month)
        .map(|record| record.average_price)
}

/// Valuation price as of `month`: the `average_price` of the most recent
/// record at or before `month`. The search runs over the full history, so
/// it crosses gaps of any length.
pub fn average_price_at_or_before(
    records: &[PreciousMetalRecord],
    month: Month,
) -> Option<Decimal> {
    let index: MonthIndex = records.iter().map(|record| record.month).collect();
    let target = index.latest_at_or_before(month)?;
    records
        .iter()
        .rev()
        .find(|record| record.month == target)
        .map(|record| record.average_price)
}

/// Unrealized profit for a record set: current value at the latest
/// `average_price` minus purchase cost. Zero for an empty set.
pub fn calculate_total_profit(records: &[PreciousMetalRecord]) -> Decimal {
    let price = match latest_average_price(records) {
        Some(price) => price,
        None => return Decimal::ZERO,
    };
    calculate_total_grams(records) * price - calculate_total_amount(records)
}

/// Total profit amortized over the record set's span in distinct months.
///
/// This is the per-period figure for a set the caller has already isolated.
/// Profit attributed to one calendar month is a different operation; see
/// `calculate_monthly_accumulated_profit`.
pub fn calculate_monthly_profit(records: &[PreciousMetalRecord]) -> Decimal {
    let index: MonthIndex = records.iter().map(|record| record.month).collect();
    if index.is_empty() {
        return Decimal::ZERO;
    }
    calculate_total_profit(records) / Decimal::from(index.len() as u64)
}

/// Position summary over records with `month <= upto` (all records when
/// `upto` is `None`).
pub fn calculate_metal_stats(
    records: &[PreciousMetalRecord],
    upto: Option<Month>,
) -> MetalStats {
    let in_scope: Vec<PreciousMetalRecord> = match upto {
        Some(limit) => records
            .iter()
            .filter(|record| record.month <= limit)
            .cloned()
            .collect(),
        None => records.to_vec(),
    };

    let total_grams = calculate_total_grams(&in_scope);
    let current_value = match latest_average_price(&in_scope) {
        Some(price) => total_grams * price,
        None => Decimal::ZERO,
    };

    MetalStats {
        total_grams,
        total_amount: calculate_total_amount(&in_scope),
        current_value,
        total_profit: calculate_total_profit(&in_scope),
        monthly_profit: calculate_monthly_profit(&in_scope),
    }
}

/// Mark-to-market value of one type's position as of `month`.
fn value_as_of(records: &[PreciousMetalRecord], month: Month) -> Decimal {
    let grams: Decimal = records
        .iter()
        .filter(|record| record.month <= month)
        .map(|record| record.grams)
        .sum();
    if grams.is_zero() {
        return Decimal::ZERO;
    }
    match average_price_at_or_before(records, month) {
        Some(price) => grams * price,
        None => Decimal::ZERO,
    }
}

/// Purchase cost spent on one type during `month` itself.
fn invested_in(records: &[PreciousMetalRecord], month: Month) -> Decimal {
    records
        .iter()
        .filter(|record| record.month == month)
        .map(|record| record.cost())
        .sum()
}

/// Mark-to-market value of each metal type as of `month`.
///
/// A type with no records at or before `month` contributes zero. The
/// valuation price may come from a much earlier month.
pub fn calculate_monthly_metal_values(
    ledger: &MetalLedger,
    month: Month,
) -> BTreeMap<MetalType, Decimal> {
    ledger
        .iter()
        .map(|(metal_type, records)| (metal_type.clone(), value_as_of(records, month)))
        .collect()
}

/// Combined mark-to-market value of every metal type as of `month`.
pub fn calculate_total_metal_value(ledger: &MetalLedger, month: Month) -> Decimal {
    ledger
        .iter()
        .map(|(_, records)| value_as_of(records, month))
        .sum()
}

/// Combined metal value as of the month before `month`.
pub fn previous_month_metal_value(ledger: &MetalLedger, month: Month) -> Decimal {
    calculate_total_metal_value(ledger, month.pred())
}

/// Profit attributed to `month` for each metal type:
/// `value(<= month) - value(<= previous month) - cost of purchases in month`.
///
/// The first month a type has data yields zero: with no prior position
/// there is no price movement to measure.
pub fn calculate_monthly_accumulated_profit_by_type(
    ledger: &MetalLedger,
    month: Month,
) -> BTreeMap<MetalType, Decimal> {
    let previous = month.pred();
    ledger
        .iter()
        .map(|(metal_type, records)| {
            let has_history = records.iter().any(|record| record.month < month);
            let profit = if has_history {
                value_as_of(records, month) - value_as_of(records, previous)
                    - invested_in(records, month)
            } else {
                Decimal::ZERO
            };
            (metal_type.clone(), profit)
        })
        .collect()
}

/// Profit attributed to `month` summed across all metal types.
pub fn calculate_monthly_accumulated_profit(ledger: &MetalLedger, month: Month) -> Decimal {
    calculate_monthly_accumulated_profit_by_type(ledger, month)
        .values()
        .copied()
        .sum()
}

/// Cumulative profit since inception per type as of `month`:
/// `value(<= month) - cost basis(<= month)`.
pub fn calculate_monthly_total_profit_by_type(
    ledger: &MetalLedger,
    month: Month,
) -> BTreeMap<MetalType, Decimal> {
    ledger
        .iter()
        .map(|(metal_type, records)| {
            let cost: Decimal = records
                .iter()
                .filter(|record| record.month <= month)
                .map(|record| record.cost())
                .sum();
            (metal_type.clone(), value_as_of(records, month) - cost)
        })
        .collect()
}

/// Cumulative profit since inception summed across all metal types.
pub fn calculate_monthly_total_profit(ledger: &MetalLedger, month: Month) -> Decimal {
    calculate_monthly_total_profit_by_type(ledger, month)
        .values()
        .copied()
        .sum()
}
