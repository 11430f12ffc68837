//! Unit tests for investment record parsing and the ledger lifecycle.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use super::*;
use crate::month::Month;

fn ym(year: i32, month: u32) -> Month {
    Month::new(year, month).unwrap()
}

#[test]
fn parses_the_persisted_frontend_shape() {
    let json = json!({
        "fund": [{
            "id": "r-1",
            "date": "2024-01",
            "account": "Main",
            "amount": 10000.0,
            "snapshot": 10000.0
        }],
        "deposit": [{
            "id": "r-2",
            "date": "2024-01",
            "account": "Bank",
            "amount": 50000.0,
            "isTimeDeposit": true,
            "depositTermMonths": 12,
            "annualInterestRate": 0.03,
            "maturityDate": "2025-01"
        }]
    });

    let ledger: InvestmentLedger = serde_json::from_value(json).unwrap();
    assert_eq!(ledger.len(), 2);

    let fund = &ledger.records_for(&AssetType::from("fund"))[0];
    assert_eq!(fund.month, ym(2024, 1));
    assert_eq!(fund.account, AccountId::from("Main"));
    assert_eq!(fund.amount, dec!(10000));
    assert_eq!(fund.snapshot, Some(dec!(10000)));
    assert_eq!(fund.kind, InvestmentKind::Standard);

    let deposit = &ledger.records_for(&AssetType::from("deposit"))[0];
    assert!(deposit.is_time_deposit());
    assert_eq!(deposit.snapshot, None);
    let terms = deposit.deposit_terms().unwrap();
    assert_eq!(terms.term_months, 12);
    assert_eq!(terms.annual_rate, dec!(0.03));
    assert_eq!(terms.maturity, Some(ym(2025, 1)));
}

#[test]
fn rejects_deposits_missing_their_terms() {
    let missing_rate = json!({
        "id": "r-2",
        "date": "2024-01",
        "account": "Bank",
        "amount": 50000.0,
        "isTimeDeposit": true,
        "depositTermMonths": 12
    });
    let err = serde_json::from_value::<InvestmentRecord>(missing_rate)
        .unwrap_err()
        .to_string();
    assert!(err.contains("annualInterestRate"), "unexpected error: {err}");

    let missing_term = json!({
        "id": "r-2",
        "date": "2024-01",
        "account": "Bank",
        "amount": 50000.0,
        "isTimeDeposit": true,
        "annualInterestRate": 0.03
    });
    let err = serde_json::from_value::<InvestmentRecord>(missing_term)
        .unwrap_err()
        .to_string();
    assert!(err.contains("depositTermMonths"), "unexpected error: {err}");
}

#[test]
fn serializes_back_to_the_flat_shape() {
    let mut record = InvestmentRecord::new(ym(2024, 1), AccountId::from("Bank"), dec!(50000))
        .as_time_deposit(TimeDepositTerms {
            term_months: 12,
            annual_rate: dec!(0.03),
            maturity: Some(ym(2025, 1)),
        });
    record.id = "r-2".to_string();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "r-2",
            "date": "2024-01",
            "account": "Bank",
            "amount": 50000.0,
            "isTimeDeposit": true,
            "depositTermMonths": 12,
            "annualInterestRate": 0.03,
            "maturityDate": "2025-01"
        })
    );

    let round_tripped: InvestmentRecord = serde_json::from_value(value).unwrap();
    assert_eq!(round_tripped, record);
}

#[test]
fn standard_records_omit_deposit_fields() {
    let mut record = InvestmentRecord::new(ym(2024, 2), AccountId::from("Main"), dec!(1000))
        .with_snapshot(dec!(11300));
    record.id = "r-1".to_string();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "r-1",
            "date": "2024-02",
            "account": "Main",
            "amount": 1000.0,
            "snapshot": 11300.0,
            "isTimeDeposit": false
        })
    );
}

#[test]
fn tolerates_absent_optional_fields() {
    let json = json!({
        "id": "r-3",
        "date": "2024-03",
        "account": "Main",
        "amount": 0.0
    });
    let record: InvestmentRecord = serde_json::from_value(json).unwrap();
    assert_eq!(record.amount, Decimal::ZERO);
    assert_eq!(record.snapshot, None);
    assert_eq!(record.kind, InvestmentKind::Standard);
}

#[test]
fn malformed_months_fail_at_the_boundary() {
    let json = json!({
        "id": "r-4",
        "date": "2024-13",
        "account": "Main",
        "amount": 100.0
    });
    assert!(serde_json::from_value::<InvestmentRecord>(json).is_err());
}

#[test]
fn add_update_remove_lifecycle() {
    let fund = AssetType::from("fund");
    let mut ledger = InvestmentLedger::new();
    ledger.add(
        fund.clone(),
        InvestmentRecord::new(ym(2024, 1), AccountId::from("Main"), dec!(10000)),
    );
    ledger.add(
        fund.clone(),
        InvestmentRecord::new(ym(2024, 2), AccountId::from("Main"), dec!(1000)),
    );
    assert_eq!(ledger.len(), 2);

    let replacement = InvestmentRecord::new(ym(2024, 2), AccountId::from("Main"), dec!(1500))
        .with_snapshot(dec!(11800));
    ledger.update(&fund, 1, replacement).unwrap();
    assert_eq!(ledger.records_for(&fund)[1].amount, dec!(1500));
    assert_eq!(ledger.records_for(&fund)[1].snapshot, Some(dec!(11800)));

    assert!(ledger
        .update(
            &fund,
            5,
            InvestmentRecord::new(ym(2024, 2), AccountId::from("Main"), dec!(1))
        )
        .is_err());

    let removed = ledger.remove(&fund, 0).unwrap();
    assert_eq!(removed.amount, dec!(10000));
    assert_eq!(ledger.len(), 1);

    ledger.remove(&fund, 0).unwrap();
    assert!(ledger.is_empty());
    assert!(ledger.remove(&fund, 0).is_err());
}

#[test]
fn accounts_are_sorted_and_unique() {
    let mut ledger = InvestmentLedger::new();
    ledger.add(
        AssetType::from("fund"),
        InvestmentRecord::new(ym(2024, 1), AccountId::from("Zenith"), dec!(1)),
    );
    ledger.add(
        AssetType::from("stock"),
        InvestmentRecord::new(ym(2024, 2), AccountId::from("Alpha"), dec!(1)),
    );
    ledger.add(
        AssetType::from("stock"),
        InvestmentRecord::new(ym(2024, 3), AccountId::from("Zenith"), dec!(1)),
    );

    assert_eq!(
        ledger.accounts(),
        vec![AccountId::from("Alpha"), AccountId::from("Zenith")]
    );
    assert_eq!(
        ledger.months().months(),
        &[ym(2024, 1), ym(2024, 2), ym(2024, 3)]
    );
}
