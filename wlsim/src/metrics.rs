//! Derived metrics

// Imports
use {crate::report::ParsedStats, wlsim_util::NonZeroDiv};

/// Days per year, for lifetime projections
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Metrics configuration
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
	/// Endurance limit, in writes per line
	pub endurance: f64,

	/// Hot fraction assumed by the no-wear-leveling baseline
	pub hot_fraction: f64,

	/// Share of writes to the hot lines assumed by the no-wear-leveling baseline
	pub hot_share_of_writes: f64,

	/// Writes per day for lifetime projections.
	///
	/// Defaults to the total writes of each report.
	pub writes_per_day: Option<f64>,
}

impl Default for MetricsConfig {
	fn default() -> Self {
		Self {
			endurance:           1e8,
			hot_fraction:        0.2,
			hot_share_of_writes: 0.8,
			writes_per_day:      None,
		}
	}
}

/// Returns the difference between the most and least worn lines
pub fn wear_spread(stats: &ParsedStats) -> f64 {
	stats.max_wear - stats.min_wear
}

/// Returns how many more times the observed writes may be repeated before
/// the most worn line reaches `endurance`.
///
/// Returns `None` if nothing was worn.
pub fn remaining_lifetime_multiple(stats: &ParsedStats, endurance: f64) -> Option<f64> {
	endurance.div_nonzero(stats.max_wear)
}

/// Returns the years until the most worn line reaches `endurance`, writing
/// `writes_per_day` per day with the observed distribution.
///
/// If `writes_per_day` is `None`, the observed writes are assumed to be a
/// day's worth.
pub fn projected_years(stats: &ParsedStats, endurance: f64, writes_per_day: Option<f64>) -> Option<f64> {
	// Note: `total_writes` could be zero while `max_wear` isn't, with labels
	//       that don't match the simulator's.
	if stats.total_writes == 0.0 {
		return None;
	}

	let multiple = self::remaining_lifetime_multiple(stats, endurance)?;
	let days = match writes_per_day {
		Some(writes_per_day) => (multiple * stats.total_writes).div_nonzero(writes_per_day)?,
		None => multiple,
	};

	Some(days / DAYS_PER_YEAR)
}

/// Estimates the wear of the most worn line without any wear leveling.
///
/// Assumes `hot_share_of_writes` of all writes land on `hot_fraction` of the
/// written lines, regardless of how the trace was actually generated.
pub fn baseline_no_leveling_estimate(stats: &ParsedStats, hot_fraction: f64, hot_share_of_writes: f64) -> Option<f64> {
	(stats.total_writes * hot_share_of_writes).div_nonzero(stats.unique_lines * hot_fraction)
}

/// Returns the ratio between the estimated no-wear-leveling wear and the observed wear
pub fn improvement_ratio(stats: &ParsedStats, hot_fraction: f64, hot_share_of_writes: f64) -> Option<f64> {
	self::baseline_no_leveling_estimate(stats, hot_fraction, hot_share_of_writes)?.div_nonzero(stats.max_wear)
}

/// Derived metrics
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct DerivedMetrics {
	pub wear_spread:                   f64,
	pub remaining_lifetime_multiple:   Option<f64>,
	pub projected_years:               Option<f64>,
	pub baseline_no_leveling_estimate: Option<f64>,
	pub improvement_ratio:             Option<f64>,
}

impl DerivedMetrics {
	/// Derives all metrics from `stats`
	pub fn derive(stats: &ParsedStats, config: &MetricsConfig) -> Self {
		Self {
			wear_spread:                   self::wear_spread(stats),
			remaining_lifetime_multiple:   self::remaining_lifetime_multiple(stats, config.endurance),
			projected_years:               self::projected_years(stats, config.endurance, config.writes_per_day),
			baseline_no_leveling_estimate: self::baseline_no_leveling_estimate(
				stats,
				config.hot_fraction,
				config.hot_share_of_writes,
			),
			improvement_ratio:             self::improvement_ratio(stats, config.hot_fraction, config.hot_share_of_writes),
		}
	}
}
