//! Investments module - contribution/snapshot records and the investment
//! calculation engine.

mod investments_calculator;
mod investments_model;

pub use investments_calculator::*;
pub use investments_model::{
    AccountId, AlignedReturnPoint, AssetType, InvestmentKind, InvestmentLedger, InvestmentRecord,
    ReturnPoint, ReturnSeries, RoiPoint, SnapshotPoint, TimeDepositTerms,
};


#[cfg(test)]
mod investments_model_tests;
