//! Moneta Core - Monthly financial calculation engine.
//!
//! This crate contains the calculation core for Moneta. Pure engines turn
//! append-only monthly purchase records into profit, return-rate, and ROI
//! series, and the dashboard layer bundles everything the views render.
//! It is storage-agnostic: callers hand it record collections parsed from
//! the persisted JSON and draw whatever comes back.
//!
//! Every "as of month" figure is computed from the complete history up to
//! that month. Date ranges trim the month axis after the fact and never
//! participate in a calculation.

pub mod accounts;
pub mod cache;
pub mod constants;
pub mod dashboard;
pub mod deposits;
pub mod errors;
pub mod investments;
pub mod metals;
pub mod month;

// Re-export common types from the month axis and dashboard modules
pub use dashboard::*;
pub use month::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
