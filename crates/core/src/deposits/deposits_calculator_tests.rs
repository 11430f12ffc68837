//! Unit tests for time-deposit valuation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::investments::{AccountId, InvestmentRecord, TimeDepositTerms};
use crate::month::Month;

fn ym(year: i32, month: u32) -> Month {
    Month::new(year, month).unwrap()
}

/// 50,000 at 3% for 12 months, started January 2024.
fn deposit() -> InvestmentRecord {
    InvestmentRecord::new(ym(2024, 1), AccountId::from("Bank"), dec!(50000)).as_time_deposit(
        TimeDepositTerms {
            term_months: 12,
            annual_rate: dec!(0.03),
            maturity: Some(ym(2025, 1)),
        },
    )
}

#[test]
fn accrues_simple_interest_per_month() {
    let record = deposit();
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2024, 1)),
        Decimal::ZERO
    );
    // One month: 50,000 x 0.03 / 12.
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2024, 2)),
        dec!(125)
    );
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2024, 7)),
        dec!(750)
    );
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2025, 1)),
        dec!(1500)
    );
}

#[test]
fn interest_stops_at_maturity() {
    let record = deposit();
    // 17 and 36 months in: still the full-term 1,500.
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2025, 6)),
        dec!(1500)
    );
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2027, 1)),
        dec!(1500)
    );
}

#[test]
fn months_before_the_start_accrue_nothing() {
    let record = deposit();
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2023, 12)),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_time_deposit_value(&record, ym(2023, 6)),
        dec!(50000)
    );
}

#[test]
fn standard_records_accrue_nothing() {
    let record = InvestmentRecord::new(ym(2024, 1), AccountId::from("Main"), dec!(50000));
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2024, 7)),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_time_deposit_value(&record, ym(2024, 7)),
        dec!(50000)
    );
}

#[test]
fn value_is_principal_plus_accrued_interest() {
    let record = deposit();
    assert_eq!(calculate_time_deposit_value(&record, ym(2024, 7)), dec!(50750));
    assert_eq!(calculate_time_deposit_value(&record, ym(2026, 1)), dec!(51500));
}

#[test]
fn zero_term_deposits_never_accrue() {
    let record = InvestmentRecord::new(ym(2024, 1), AccountId::from("Bank"), dec!(1000))
        .as_time_deposit(TimeDepositTerms {
            term_months: 0,
            annual_rate: dec!(0.05),
            maturity: None,
        });
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2024, 6)),
        Decimal::ZERO
    );
}

#[test]
fn oversized_terms_keep_accruing() {
    // Stored data can carry any u32 term, far past what i32 months can
    // express; such a deposit simply never reaches maturity.
    let record = InvestmentRecord::new(ym(2024, 1), AccountId::from("Bank"), dec!(50000))
        .as_time_deposit(TimeDepositTerms {
            term_months: u32::MAX,
            annual_rate: dec!(0.03),
            maturity: None,
        });
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2024, 1)),
        Decimal::ZERO
    );
    // 24 months at 125 each.
    assert_eq!(
        calculate_time_deposit_total_profit(&record, ym(2026, 1)),
        dec!(3000)
    );
    assert_eq!(calculate_time_deposit_value(&record, ym(2026, 1)), dec!(53000));
}
