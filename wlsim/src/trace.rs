//! Memory access traces
//!
//! Traces are line-oriented, with one access per line:
//! `<cycle> <W|R> 0x<address> <payload> <thread_id>`.

// Modules
pub mod generator;
pub mod summary;
pub mod writer;

// Exports
pub use self::{
	generator::{DistributionPolicy, Records, TraceGenerator},
	summary::TraceSummary,
	writer::TraceWriter,
};

// Imports
use std::fmt::{self, Write};

/// Access record
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct AccessRecord {
	/// Cycle
	pub cycle: u64,

	/// Access kind
	pub kind: AccessKind,

	/// Address
	pub addr: u64,

	/// Payload
	pub payload: Payload,

	/// Issuing thread
	pub thread_id: u32,
}

impl fmt::Display for AccessRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} {} {:#x} {} {}",
			self.cycle, self.kind, self.addr, self.payload, self.thread_id
		)
	}
}

/// Access kind
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AccessKind {
	/// Read
	Read,

	/// Write
	Write,
}

impl fmt::Display for AccessKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Read => f.write_char('R'),
			Self::Write => f.write_char('W'),
		}
	}
}

/// Placeholder payload.
///
/// The contents are irrelevant, only the length matters to the simulator.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Payload {
	/// Filler character
	pub filler: char,

	/// Length, in characters
	pub len: usize,
}

impl Default for Payload {
	fn default() -> Self {
		Self { filler: '0', len: 128 }
	}
}

impl fmt::Display for Payload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for _ in 0..self.len {
			f.write_char(self.filler)?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_line() {
		let record = AccessRecord {
			cycle:     120,
			kind:      AccessKind::Write,
			addr:      0x3e700,
			payload:   Payload { filler: 'a', len: 4 },
			thread_id: 0,
		};
		assert_eq!(record.to_string(), "120 W 0x3e700 aaaa 0");
	}

	#[test]
	fn zero_address_is_hex_prefixed() {
		let record = AccessRecord {
			cycle:     10,
			kind:      AccessKind::Read,
			addr:      0,
			payload:   Payload::default(),
			thread_id: 0,
		};
		assert_eq!(record.to_string(), format!("10 R 0x0 {} 0", "0".repeat(128)));
	}
}
