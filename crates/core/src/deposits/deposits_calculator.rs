//! Time-deposit valuation.
//!
//! Simple, non-compounding interest prorated by month. Deposits enter the
//! dashboard's asset rollups at principal plus accrued interest; no
//! snapshot is ever taken for them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::investments::{InvestmentKind, InvestmentRecord};
use crate::month::Month;

/// Months in a year, for interest proration.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Interest accrued by `month`: `principal x annual_rate x elapsed / 12`,
/// with elapsed months clamped to the deposit's term.
///
/// A matured deposit keeps reporting its full-term interest, and months
/// before the start accrue nothing. Standard records always yield zero.
pub fn calculate_time_deposit_total_profit(record: &InvestmentRecord, month: Month) -> Decimal {
    let terms = match &record.kind {
        InvestmentKind::TimeDeposit(terms) => terms,
        InvestmentKind::Standard => return Decimal::ZERO,
    };
    // term_months is an unbounded u32 in stored data; saturate instead of
    // casting so an oversized term cannot invert the clamp bounds.
    let term = i32::try_from(terms.term_months).unwrap_or(i32::MAX);
    let elapsed = month.months_since(record.month).clamp(0, term);
    record.amount * terms.annual_rate * Decimal::from(elapsed) / MONTHS_PER_YEAR
}

/// Principal plus accrued interest as of `month`.
pub fn calculate_time_deposit_value(record: &InvestmentRecord, month: Month) -> Decimal {
    record.amount + calculate_time_deposit_total_profit(record, month)
}
