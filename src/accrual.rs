//! Local approximation of DSR compounding between two balance polls.
//!
//! The savings module compounds per second. Between polls the screen smooths
//! the displayed balance by compounding the last fetched balance over a
//! fraction of a 30 minute window, one fraction per tick.

/// Days used to spread the yearly rate
pub const DAYS_PER_YEAR: f64 = 365.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Ticks in one compounding window (~30 minutes at one tick per second)
pub const TICKS_PER_WINDOW: f64 = 1_800.0;

/// Per-second growth factor for a yearly rate expressed as a fraction
pub fn rate_per_second(apr: f64) -> f64 {
    1.0 + apr / DAYS_PER_YEAR / SECONDS_PER_DAY
}

/// Elapsed ticks as a fraction of the compounding window
pub fn time_elapsed(elapsed_ticks: u64) -> f64 {
    elapsed_ticks as f64 / TICKS_PER_WINDOW
}

/// Estimated savings balance after `elapsed_ticks`
pub fn estimate_total(dsr_balance: f64, apr: f64, elapsed_ticks: u64) -> f64 {
    dsr_balance * rate_per_second(apr).powf(time_elapsed(elapsed_ticks))
}
