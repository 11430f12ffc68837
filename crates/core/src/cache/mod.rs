//! Cache module - checksum-keyed memoization for derived data.

mod compute_cache;

pub use compute_cache::{Clock, ComputeCache, SystemClock};
