/// Decimal precision for engine calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Cache key under which the dashboard base data is memoized
pub const DASHBOARD_CACHE_KEY: &str = "dashboard:base";

/// Default time-to-live for memoized dashboard data, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
