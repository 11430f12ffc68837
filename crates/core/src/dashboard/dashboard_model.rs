//! Dashboard view models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::{
    AccountId, AssetType, ReturnPoint, ReturnSeries, RoiPoint, SnapshotPoint,
};
use crate::month::Month;

/// Every month-indexed series the dashboard views draw from.
///
/// Computed in one pass over the complete ledgers and memoized per data
/// version. All series cover the full history; display ranges trim the
/// month axis afterwards and never reach back into these values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBaseData {
    /// Sorted unique months across both record families.
    pub months: Vec<Month>,
    /// Investment profit attributed to each month, portfolio-wide.
    pub investment_profit_by_month: BTreeMap<Month, Decimal>,
    /// Metal profit attributed to each month, across all metal types.
    pub metal_profit_by_month: BTreeMap<Month, Decimal>,
    /// Month-over-month return series per account.
    pub account_returns: Vec<ReturnSeries<AccountId>>,
    /// Month-over-month return series per asset type.
    pub asset_type_returns: Vec<ReturnSeries<AssetType>>,
    /// Portfolio-wide ROI (profit relative to the month's contributions).
    pub roi_series: Vec<RoiPoint>,
    /// Portfolio-wide return (profit relative to the previous month's
    /// total as-of value).
    pub return_series: Vec<ReturnPoint>,
    /// Recorded snapshot series per account, for trend charts.
    pub snapshots_by_account: BTreeMap<AccountId, Vec<SnapshotPoint>>,
    /// Total investment value as of each month (snapshots forward-filled,
    /// contributions as fallback, deposits at accrued value).
    pub investment_assets_by_month: BTreeMap<Month, Decimal>,
    /// Investment value plus metal mark-to-market value per month.
    pub total_assets_by_month: BTreeMap<Month, Decimal>,
}

impl DashboardBaseData {
    /// The well-typed "no data" bundle views fall back to when the
    /// underlying computation fails.
    pub fn empty() -> Self {
        Self::default()
    }
}
