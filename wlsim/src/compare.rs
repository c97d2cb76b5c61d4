//! Comparison between experiment runs

// Imports
use {
	crate::{
		metrics::{DerivedMetrics, MetricsConfig},
		report::{Field, ParsedStats},
	},
	itertools::Itertools,
	std::fmt,
	wlsim_util::display_opt,
};

/// Uniformity ratio reported by the Start-Gap paper (MICRO '09), as `(min, max)`
pub const REFERENCE_UNIFORMITY: (f64, f64) = (2.0, 6.0);

/// Lifetime improvement reported by the Start-Gap paper
pub const REFERENCE_IMPROVEMENT: f64 = 10.6;

/// Experiment mode
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
	Hotspot,
	Uniform,
	Sequential,
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(match self {
			Self::Hotspot => "Hotspot",
			Self::Uniform => "Uniform",
			Self::Sequential => "Sequential",
		})
	}
}

/// Inclusive range of expected values
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ExpectedRange {
	pub min: f64,
	pub max: f64,
}

impl ExpectedRange {
	/// Returns if `value` is within this range
	pub fn contains(&self, value: f64) -> bool {
		(self.min..=self.max).contains(&value)
	}
}

/// Expected uniformity ratio ranges
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UniformityRanges {
	pub hotspot: ExpectedRange,
	pub uniform: ExpectedRange,
}

impl Default for UniformityRanges {
	fn default() -> Self {
		Self {
			hotspot: ExpectedRange { min: 2.0, max: 8.0 },
			uniform: ExpectedRange { min: 1.0, max: 4.0 },
		}
	}
}

/// Result set of a single experiment run
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize)]
pub struct ResultSet {
	pub mode:    Mode,
	pub stats:   ParsedStats,
	pub derived: DerivedMetrics,
}

/// Uniformity range check
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize)]
pub struct UniformityCheck {
	pub mode:       Mode,
	pub uniformity: f64,
	pub expected:   ExpectedRange,
	pub in_range:   bool,
}

/// Comparison between the hotspot, uniform and, optionally, sequential runs
#[derive(Clone, Debug)]
#[derive(serde::Serialize)]
pub struct Comparison {
	/// Result sets, in mode order
	pub sets: Vec<ResultSet>,

	/// Uniformity checks
	pub uniformity_checks: Vec<UniformityCheck>,

	/// Metrics configuration used
	pub metrics_config: MetricsConfig,
}

impl Comparison {
	/// Creates a comparison.
	///
	/// # Errors
	/// Returns an error if either the hotspot or uniform result sets are missing.
	pub fn new(
		hotspot: Option<ParsedStats>,
		uniform: Option<ParsedStats>,
		sequential: Option<ParsedStats>,
		metrics_config: &MetricsConfig,
		uniformity_ranges: &UniformityRanges,
	) -> Result<Self, anyhow::Error> {
		let (hotspot, uniform) = match (hotspot, uniform) {
			(Some(hotspot), Some(uniform)) => (hotspot, uniform),
			(hotspot, uniform) => anyhow::bail!(
				"Both baseline result sets are required (hotspot: {}, uniform: {})",
				self::presence(hotspot.is_some()),
				self::presence(uniform.is_some()),
			),
		};

		let sets = [
			(Mode::Hotspot, Some(hotspot)),
			(Mode::Uniform, Some(uniform)),
			(Mode::Sequential, sequential),
		]
		.into_iter()
		.filter_map(|(mode, stats)| {
			let stats = stats?;
			Some(ResultSet {
				mode,
				stats,
				derived: DerivedMetrics::derive(&stats, metrics_config),
			})
		})
		.collect::<Vec<_>>();

		let uniformity_checks = [
			(Mode::Hotspot, &hotspot, uniformity_ranges.hotspot),
			(Mode::Uniform, &uniform, uniformity_ranges.uniform),
		]
		.into_iter()
		.map(|(mode, stats, expected)| UniformityCheck {
			mode,
			uniformity: stats.uniformity,
			expected,
			in_range: expected.contains(stats.uniformity),
		})
		.collect();

		Ok(Self {
			sets,
			uniformity_checks,
			metrics_config: *metrics_config,
		})
	}

	/// Returns the result set of `mode`, if present
	pub fn get(&self, mode: Mode) -> Option<&ResultSet> {
		self.sets.iter().find(|set| set.mode == mode)
	}

	/// Formats the metrics table
	fn fmt_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:<24}", "Metric")?;
		for set in &self.sets {
			write!(f, "{:>20}", format!("{} mode", set.mode))?;
		}
		writeln!(f)?;
		writeln!(f, "{}", "-".repeat(24 + 20 * self.sets.len()))?;

		for field in Field::ALL {
			write!(f, "{field:<24}")?;
			for set in &self.sets {
				write!(f, "{:>20.2}", set.stats.get(field))?;
			}
			writeln!(f)?;
		}

		Ok(())
	}

	/// Formats the wear uniformity of each set
	fn fmt_wear(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for set in &self.sets {
			writeln!(
				f,
				"{}: uniformity {:.2}x, max wear {:.0}, min wear {:.0}, spread {:.0}",
				set.mode, set.stats.uniformity, set.stats.max_wear, set.stats.min_wear, set.derived.wear_spread
			)?;
		}

		Ok(())
	}

	/// Formats the uniformity checks
	fn fmt_uniformity_checks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (reference_min, reference_max) = REFERENCE_UNIFORMITY;
		writeln!(
			f,
			"Reference Start-Gap results: uniformity {reference_min}-{reference_max}x, {REFERENCE_IMPROVEMENT}x lifetime \
			 improvement"
		)?;

		for check in &self.uniformity_checks {
			writeln!(
				f,
				"{}: {:.2}x, expected {}-{}x: {}",
				check.mode,
				check.uniformity,
				check.expected.min,
				check.expected.max,
				match check.in_range {
					true => "within range",
					false => "OUT OF RANGE",
				}
			)?;
		}

		Ok(())
	}

	/// Formats the lifetime projections
	fn fmt_lifetime(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Endurance: {:e} writes per line", self.metrics_config.endurance)?;

		let writes_per_day = |set: &ResultSet| self.metrics_config.writes_per_day.unwrap_or(set.stats.total_writes);
		for set in self.sets.iter().filter(|set| set.mode != Mode::Sequential) {
			writeln!(
				f,
				"{}: remaining lifetime {}x the current writes, {} years at {:.0} writes per day",
				set.mode,
				display_opt(set.derived.remaining_lifetime_multiple, 0),
				display_opt(set.derived.projected_years, 1),
				writes_per_day(set),
			)?;
		}

		Ok(())
	}

	/// Formats the wear-leveling effect on the hotspot set
	fn fmt_improvement(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Note: The baseline always assumes a hotspot distribution, so it's
		//       only meaningful for the hotspot set.
		let Some(set) = self.get(Mode::Hotspot) else {
			return Ok(());
		};

		writeln!(
			f,
			"Estimated max wear without wear leveling ({:.0}% of writes to {:.0}% of lines): {}",
			100.0 * self.metrics_config.hot_share_of_writes,
			100.0 * self.metrics_config.hot_fraction,
			display_opt(set.derived.baseline_no_leveling_estimate, 0)
		)?;
		writeln!(f, "Max wear with Start-Gap: {:.0}", set.stats.max_wear)?;
		writeln!(f, "Lifetime improvement: {}x", display_opt(set.derived.improvement_ratio, 2))?;

		Ok(())
	}
}

impl fmt::Display for Comparison {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sections: [(&str, fn(&Self, &mut fmt::Formatter<'_>) -> fmt::Result); 5] = [
			("Results", Self::fmt_table),
			("Wear uniformity", Self::fmt_wear),
			("Uniformity checks", Self::fmt_uniformity_checks),
			("Lifetime", Self::fmt_lifetime),
			("Start-Gap effect", Self::fmt_improvement),
		];

		let modes = self.sets.iter().map(|set| set.mode).join(", ");
		writeln!(f, "Comparison of {modes}")?;
		for (title, fmt_section) in sections {
			writeln!(f)?;
			writeln!(f, "[{title}]")?;
			fmt_section(self, f)?;
		}

		Ok(())
	}
}

/// Returns a description of whether a result set is present
fn presence(present: bool) -> &'static str {
	match present {
		true => "present",
		false => "missing",
	}
}
