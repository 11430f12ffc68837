//! Dashboard aggregation service implementation.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use log::{debug, error};
use rust_decimal::Decimal;

use super::dashboard_model::DashboardBaseData;
use super::dashboard_traits::DashboardServiceTrait;
use crate::cache::ComputeCache;
use crate::constants::{DASHBOARD_CACHE_KEY, DECIMAL_PRECISION, DEFAULT_CACHE_TTL_SECS};
use crate::deposits::calculate_time_deposit_value;
use crate::errors::Result;
use crate::investments::{
    calculate_monthly_return_by_account, calculate_monthly_return_by_asset_type,
    calculate_overall_monthly_return, calculate_overall_monthly_roi,
    calculate_total_monthly_profit, group_snapshots_by_account, snapshot_as_of, AccountId,
    InvestmentLedger, InvestmentRecord,
};
use crate::metals::{calculate_monthly_accumulated_profit, calculate_total_metal_value, MetalLedger};
use crate::month::{Month, MonthIndex, MonthRange};

/// Aggregation service producing the dashboard's month-indexed series.
///
/// Owns the memoization cache; one instance lives behind the application
/// shell for the lifetime of the window.
pub struct DashboardService {
    cache: ComputeCache<DashboardBaseData>,
    ttl: Duration,
}

impl DashboardService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: ComputeCache::new(),
            ttl,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardServiceTrait for DashboardService {
    fn calculate_base_data(
        &self,
        investments: &InvestmentLedger,
        metals: &MetalLedger,
    ) -> DashboardBaseData {
        // A corrupted stored record must degrade the dashboard to "no
        // data", never take it down, so panics out of the arithmetic are
        // absorbed along with errors. The cache stores nothing until a
        // computation completes, so unwinding leaves no partial entry.
        let computed = panic::catch_unwind(AssertUnwindSafe(|| {
            self.cache.get_or_compute(
                DASHBOARD_CACHE_KEY,
                &(investments, metals),
                self.ttl,
                || build_base_data(investments, metals),
            )
        }));

        match computed {
            Ok(Ok(data)) => data,
            Ok(Err(e)) => {
                error!("Dashboard base data calculation failed: {}", e);
                DashboardBaseData::empty()
            }
            Err(payload) => {
                error!(
                    "Dashboard base data calculation panicked: {}",
                    panic_payload_to_string(payload.as_ref())
                );
                DashboardBaseData::empty()
            }
        }
    }

    fn invalidate(&self) {
        debug!("Dropping memoized dashboard data");
        self.cache.clear(Some(DASHBOARD_CACHE_KEY));
    }
}

fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Restricts a month axis to `range` for display.
///
/// Strictly a trim of which months get rendered: every series value was
/// already computed from the full history, so applying or changing a range
/// never alters a month's figure.
pub fn filter_months_by_range(months: &[Month], range: &MonthRange) -> Vec<Month> {
    months
        .iter()
        .copied()
        .filter(|&month| range.contains(month))
        .collect()
}

fn build_base_data(
    investments: &InvestmentLedger,
    metals: &MetalLedger,
) -> Result<DashboardBaseData> {
    debug!(
        "Building dashboard base data from {} investment and {} metal records",
        investments.len(),
        metals.len()
    );

    let investment_months = investments.months();
    let metal_months = metals.months();
    let axis: MonthIndex = investment_months
        .months()
        .iter()
        .chain(metal_months.months().iter())
        .copied()
        .collect();

    let mut investment_profit_by_month = BTreeMap::new();
    let mut metal_profit_by_month = BTreeMap::new();
    let mut investment_assets_by_month = BTreeMap::new();
    let mut total_assets_by_month = BTreeMap::new();

    for &month in axis.months() {
        investment_profit_by_month
            .insert(month, calculate_total_monthly_profit(investments, month));
        metal_profit_by_month.insert(month, calculate_monthly_accumulated_profit(metals, month));

        let investment_value = total_investment_value(investments, month);
        let metal_value = calculate_total_metal_value(metals, month);
        investment_assets_by_month.insert(month, investment_value.round_dp(DECIMAL_PRECISION));
        total_assets_by_month
            .insert(month, (investment_value + metal_value).round_dp(DECIMAL_PRECISION));
    }

    Ok(DashboardBaseData {
        months: axis.months().to_vec(),
        investment_profit_by_month,
        metal_profit_by_month,
        account_returns: calculate_monthly_return_by_account(investments),
        asset_type_returns: calculate_monthly_return_by_asset_type(investments),
        roi_series: calculate_overall_monthly_roi(investments),
        return_series: calculate_overall_monthly_return(investments),
        snapshots_by_account: group_snapshots_by_account(investments),
        investment_assets_by_month,
        total_assets_by_month,
    })
}

/// Total investment value as of `month`.
///
/// Standard records contribute per account: the latest snapshot at or
/// before `month` when the account has one, otherwise cumulative
/// contributions. Time deposits started by `month` are valued at principal
/// plus accrued interest and are kept out of the contribution fallback, so
/// a deposit principal is never counted twice.
fn total_investment_value(ledger: &InvestmentLedger, month: Month) -> Decimal {
    let mut standard_by_account: BTreeMap<AccountId, Vec<InvestmentRecord>> = BTreeMap::new();
    let mut deposit_value = Decimal::ZERO;

    for record in ledger.iter_records() {
        if record.is_time_deposit() {
            if record.month <= month {
                deposit_value += calculate_time_deposit_value(record, month);
            }
        } else {
            standard_by_account
                .entry(record.account.clone())
                .or_default()
                .push(record.clone());
        }
    }

    let standard_value: Decimal = standard_by_account
        .values()
        .map(|records| account_value_as_of(records, month))
        .sum();

    standard_value + deposit_value
}

/// One account's value as of `month`: its forward-filled snapshot, or the
/// contributions accumulated so far while no snapshot has been taken yet.
fn account_value_as_of(records: &[InvestmentRecord], month: Month) -> Decimal {
    match snapshot_as_of(records, month) {
        Some(snapshot) => snapshot,
        None => records
            .iter()
            .filter(|record| record.month <= month)
            .map(|record| record.amount)
            .sum(),
    }
}
