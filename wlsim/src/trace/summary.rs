//! Trace summary

// Imports
use {
	super::{AccessKind, AccessRecord},
	crate::address_space::{AddressSpace, Partition},
	itertools::Itertools,
	std::fmt,
};

/// Realized statistics of a generated trace
#[derive(Clone, Debug)]
pub struct TraceSummary {
	/// Address space
	space: AddressSpace,

	/// Hot partition, if any
	hot: Option<Partition>,

	/// Writes per line
	line_writes: Vec<u64>,

	/// Total writes
	writes: u64,

	/// Writes to the hot partition
	hot_writes: u64,

	/// Total reads
	reads: u64,

	/// Writes outside of the address space
	stray_writes: u64,
}

impl TraceSummary {
	/// Creates a new, empty, summary.
	///
	/// If `hot` is given, writes to it are counted separately.
	pub fn new(space: AddressSpace, hot: Option<Partition>) -> Self {
		Self {
			space,
			hot,
			line_writes: vec![0; space.lines() as usize],
			writes: 0,
			hot_writes: 0,
			reads: 0,
			stray_writes: 0,
		}
	}

	/// Registers a record
	pub fn register(&mut self, record: &AccessRecord) {
		match record.kind {
			AccessKind::Read => self.reads += 1,
			AccessKind::Write => {
				self.writes += 1;
				let Some(line) = self.space.line_of(record.addr) else {
					tracing::warn!(?record, "Write outside of address space");
					self.stray_writes += 1;
					return;
				};

				self.line_writes[line as usize] += 1;
				if self.hot.is_some_and(|hot| hot.contains(line)) {
					self.hot_writes += 1;
				}
			},
		}
	}

	/// Returns the total number of writes
	pub fn writes(&self) -> u64 {
		self.writes
	}

	/// Returns the total number of reads
	pub fn reads(&self) -> u64 {
		self.reads
	}

	/// Returns the number of distinct lines written
	pub fn lines_written(&self) -> usize {
		self.line_writes.iter().filter(|&&writes| writes > 0).count()
	}

	/// Returns the fraction of writes to the hot partition.
	///
	/// Returns `None` if there's no hot partition, or nothing was written.
	pub fn hot_write_fraction(&self) -> Option<f64> {
		self.hot?;
		match self.writes {
			0 => None,
			writes => Some(self.hot_writes as f64 / writes as f64),
		}
	}
}

impl fmt::Display for TraceSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} writes, {} reads", self.writes, self.reads)?;

		if let Some(hot_write_fraction) = self.hot_write_fraction() {
			write!(f, ", {:.2}% to hot lines", 100.0 * hot_write_fraction)?;
		}

		let line_writes = self
			.line_writes
			.iter()
			.map(|&writes| writes as f64)
			.collect::<average::Variance>();
		let (min_line_writes, max_line_writes) = self.line_writes.iter().minmax().into_option().unwrap_or((&0, &0));
		write!(
			f,
			", {:.4} ± {:.4} writes per line ({min_line_writes}..{max_line_writes}), {} lines written",
			line_writes.mean(),
			line_writes.error(),
			self.lines_written()
		)?;

		if self.stray_writes > 0 {
			write!(f, ", {} writes outside of the address space", self.stray_writes)?;
		}

		Ok(())
	}
}
