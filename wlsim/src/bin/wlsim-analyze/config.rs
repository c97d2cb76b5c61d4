//! Configuration

// Imports
use wlsim::{compare::UniformityRanges, report::LabelTable, MetricsConfig};

/// Configuration
#[derive(Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	/// Metrics configuration
	pub metrics: MetricsConfig,

	/// Expected uniformity ranges
	pub uniformity_ranges: UniformityRanges,

	/// Report labels
	pub labels: LabelTable,

	/// Report files, relative to the results directory
	pub files: ResultFiles,
}

/// Report files
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResultFiles {
	pub hotspot:    String,
	pub uniform:    String,
	pub sequential: String,
}

impl Default for ResultFiles {
	fn default() -> Self {
		Self {
			hotspot:    "exp1_hotspot.txt".to_owned(),
			uniform:    "exp2_uniform.txt".to_owned(),
			sequential: "exp3_sequential.txt".to_owned(),
		}
	}
}
