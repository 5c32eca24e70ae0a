//! Centralized constants for Catalyst
//!
//! Default values shared by settings, the catalog loader and the binaries.
//! Business thresholds used by the engine live next to the engine in
//! `catalyst-core`.

/// Settings defaults
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const CATALOG_DIR: &str = "config/catalog";
    pub const HISTORY_CAPACITY: usize = 1000;
}

/// Validation limits for settings
pub mod limits {
    pub const MAX_HISTORY_CAPACITY: usize = 100_000;
    pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
}

/// Catalog file names inside the catalog directory
pub mod files {
    pub const SCENARIOS: &str = "scenarios.yaml";
    pub const ADJUSTMENTS: &str = "adjustments.yaml";
    pub const CURRENCIES: &str = "currencies.yaml";
}

/// Bounds checked by the catalog validator
pub mod catalog_limits {
    /// Percent-valued fields (adoption rate, resource availability, confidence)
    pub const PERCENT_MIN: f64 = 0.0;
    pub const PERCENT_MAX: f64 = 100.0;

    /// Success-rate bonuses outside this range would always hit the clamp
    pub const MAX_SUCCESS_RATE_BONUS: i32 = 45;

    /// Longest default timeframe a scenario may declare
    pub const MAX_SCENARIO_TIMEFRAME_MONTHS: u32 = catalyst_core::validation::MAX_TIMEFRAME_MONTHS;
}
