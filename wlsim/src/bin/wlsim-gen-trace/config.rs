//! Configuration

// Imports
use wlsim::trace::Payload;

/// Configuration
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	/// Address space
	pub address_space: AddressSpaceConfig,

	/// Cycles between each access
	pub cycle_stride: u64,

	/// Payload of every record
	pub payload: Payload,

	/// Issuing thread of every record
	pub thread_id: u32,

	/// Hotspot configuration
	pub hotspot: HotspotConfig,

	/// Debug output period (in seconds)
	pub debug_output_period_secs: f64,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			address_space:            AddressSpaceConfig::default(),
			cycle_stride:             wlsim::TraceGenerator::DEFAULT_CYCLE_STRIDE,
			payload:                  Payload::default(),
			thread_id:                0,
			hotspot:                  HotspotConfig::default(),
			debug_output_period_secs: 1.0,
		}
	}
}

/// Address space config
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AddressSpaceConfig {
	pub lines:  u64,
	pub stride: u64,
}

impl Default for AddressSpaceConfig {
	fn default() -> Self {
		Self {
			lines:  wlsim::AddressSpace::DEFAULT_LINES,
			stride: wlsim::AddressSpace::DEFAULT_STRIDE,
		}
	}
}

/// Hotspot config
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
	pub hot_fraction:           f64,
	pub hot_access_probability: f64,
}

impl Default for HotspotConfig {
	fn default() -> Self {
		Self {
			hot_fraction:           0.2,
			hot_access_probability: 0.8,
		}
	}
}
