//! Dashboard service traits.

use super::dashboard_model::DashboardBaseData;
use crate::investments::InvestmentLedger;
use crate::metals::MetalLedger;

/// Contract for the dashboard aggregation service.
pub trait DashboardServiceTrait: Send + Sync {
    /// Computes every month-indexed series the dashboard renders, from the
    /// complete, unfiltered ledgers.
    ///
    /// Memoized per data version: repeated calls with unchanged ledgers
    /// return the cached bundle until the TTL expires. This call never
    /// fails or panics; internal errors and panics out of the computation
    /// are logged and an empty bundle is returned so views degrade to
    /// "no data" instead of crashing.
    fn calculate_base_data(
        &self,
        investments: &InvestmentLedger,
        metals: &MetalLedger,
    ) -> DashboardBaseData;

    /// Drops memoized dashboard data. The next call recomputes.
    fn invalidate(&self);
}
