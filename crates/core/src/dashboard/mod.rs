//! Dashboard aggregation module.
//!
//! Single entry point producing every month-indexed series the dashboard
//! views need, computed once per data version over the complete ledgers
//! and memoized. Display filtering is a separate, later step on the month
//! axis only.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;

pub use dashboard_model::*;
pub use dashboard_service::*;
pub use dashboard_traits::*;
