//! Trace generator

// Imports
use {
	super::{AccessKind, AccessRecord, Payload},
	crate::address_space::{AddressSpace, Partition},
	rand::{Rng, RngCore},
	std::fmt,
};

/// Distribution of the generated addresses
#[derive(PartialEq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DistributionPolicy {
	/// A fraction of the address space receives most accesses
	Hotspot {
		/// Fraction of the address space that is hot
		hot_fraction: f64,

		/// Probability of each access landing in the hot partition
		hot_access_probability: f64,
	},

	/// All addresses are equally likely
	Uniform,

	/// Access `i` targets line `i mod lines`
	Sequential,
}

impl DistributionPolicy {
	/// Hotspot policy with the reference 80/20 parameters
	pub const HOTSPOT_80_20: Self = Self::Hotspot {
		hot_fraction:           0.2,
		hot_access_probability: 0.8,
	};

	/// Returns the name of this policy
	pub fn name(&self) -> &'static str {
		match self {
			Self::Hotspot { .. } => "hotspot",
			Self::Uniform => "uniform",
			Self::Sequential => "sequential",
		}
	}

	/// Checks that this policy may generate addresses within `space`.
	///
	/// # Errors
	/// Returns an error if the hotspot parameters are out of range, or
	/// if they would leave the hot or cold partitions empty.
	pub fn validate(&self, space: &AddressSpace) -> Result<(), anyhow::Error> {
		if let Self::Hotspot {
			hot_fraction,
			hot_access_probability,
		} = *self
		{
			anyhow::ensure!(
				hot_fraction > 0.0 && hot_fraction < 1.0,
				"Hot fraction must be within (0, 1), found {hot_fraction}"
			);
			anyhow::ensure!(
				(0.0..=1.0).contains(&hot_access_probability),
				"Hot access probability must be within [0, 1], found {hot_access_probability}"
			);

			let hot_lines = space.hot_lines(hot_fraction);
			anyhow::ensure!(
				hot_lines > 0 && hot_lines < space.lines(),
				"Hot fraction {hot_fraction} of {} lines leaves an empty partition",
				space.lines()
			);
		}

		Ok(())
	}
}

impl fmt::Display for DistributionPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hotspot {
				hot_fraction,
				hot_access_probability,
			} => write!(
				f,
				"hotspot ({:.0}% of accesses to {:.0}% of lines)",
				100.0 * hot_access_probability,
				100.0 * hot_fraction
			),
			Self::Uniform => f.pad("uniform"),
			Self::Sequential => f.pad("sequential"),
		}
	}
}

/// Trace generator
#[derive(Clone, Copy, Debug)]
pub struct TraceGenerator {
	/// Address space
	pub space: AddressSpace,

	/// Cycles between each access
	pub cycle_stride: u64,

	/// Payload of every record
	pub payload: Payload,

	/// Issuing thread of every record
	pub thread_id: u32,
}

impl TraceGenerator {
	/// Cycle stride of the reference traces
	pub const DEFAULT_CYCLE_STRIDE: u64 = 10;

	/// Creates a new generator over `space` with the reference parameters
	pub fn new(space: AddressSpace) -> Self {
		Self {
			space,
			cycle_stride: Self::DEFAULT_CYCLE_STRIDE,
			payload: Payload::default(),
			thread_id: 0,
		}
	}

	/// Checks that `count` writes (and the final read) may be generated with
	/// strictly increasing cycles.
	///
	/// # Errors
	/// Returns an error if the cycle stride is zero, or if the number of
	/// records or the cycle of the final read don't fit in a `u64`.
	pub fn validate(&self, count: u64) -> Result<(), anyhow::Error> {
		anyhow::ensure!(self.cycle_stride > 0, "Cycle stride must be non-zero");
		anyhow::ensure!(
			count.checked_add(1).is_some(),
			"Trace of {count} writes has too many records"
		);
		anyhow::ensure!(
			count.checked_mul(self.cycle_stride).is_some(),
			"Trace of {count} writes with cycle stride {} overflows the cycle counter",
			self.cycle_stride
		);

		Ok(())
	}

	/// Generates `count` writes with addresses distributed according to `policy`,
	/// followed by a single read of address 0.
	///
	/// `rng` is only used by the random policies, `Sequential` never touches it.
	///
	/// # Panics
	/// Panics if `policy` is a hotspot policy that leaves a partition empty
	/// (see [`DistributionPolicy::validate`]), or if [`Self::validate`] fails.
	pub fn generate<'r, R: Rng + ?Sized>(
		&self,
		policy: &DistributionPolicy,
		count: u64,
		rng: &'r mut R,
	) -> Records<'r, R> {
		let picker = match *policy {
			DistributionPolicy::Hotspot {
				hot_fraction,
				hot_access_probability,
			} => {
				let (hot, cold) = self.space.partition(hot_fraction);
				Picker::Hotspot {
					hot,
					cold,
					hot_access_probability,
					rng,
				}
			},
			DistributionPolicy::Uniform => Picker::Uniform {
				full: self.space.full(),
				rng,
			},
			DistributionPolicy::Sequential => Picker::Sequential,
		};

		self.records(picker, count)
	}

	/// Generates `count` sequential writes, followed by a single read of address 0.
	///
	/// # Panics
	/// Panics if [`Self::validate`] fails.
	pub fn generate_sequential(&self, count: u64) -> Records<'static, dyn RngCore> {
		self.records(Picker::Sequential, count)
	}

	fn records<'r, R: Rng + ?Sized>(&self, picker: Picker<'r, R>, count: u64) -> Records<'r, R> {
		if let Err(err) = self.validate(count) {
			panic!("Invalid trace generator: {err}");
		}

		Records {
			generator: *self,
			picker,
			count,
			next_idx: 0,
		}
	}
}

/// Records iterator returned by [`TraceGenerator::generate`]
pub struct Records<'r, R: ?Sized> {
	/// Generator
	generator: TraceGenerator,

	/// Line picker
	picker: Picker<'r, R>,

	/// Number of writes
	count: u64,

	/// Index of the next record.
	///
	/// Once it reaches `count`, the final read is emitted.
	next_idx: u64,
}

impl<R: ?Sized> fmt::Debug for Records<'_, R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Records")
			.field("generator", &self.generator)
			.field("count", &self.count)
			.field("next_idx", &self.next_idx)
			.finish_non_exhaustive()
	}
}

impl<R: Rng + ?Sized> Iterator for Records<'_, R> {
	type Item = AccessRecord;

	fn next(&mut self) -> Option<Self::Item> {
		let idx = self.next_idx;
		let (kind, addr) = match idx {
			_ if idx < self.count => {
				let line = self.picker.pick(idx, &self.generator.space);
				(AccessKind::Write, self.generator.space.addr_of(line))
			},

			// Note: The simulator mishandles traces that end in a write,
			//       so we always finish with a read.
			_ if idx == self.count => (AccessKind::Read, 0),
			_ => return None,
		};
		self.next_idx += 1;

		// Note: `idx <= count`, and `count * cycle_stride` was validated on creation.
		Some(AccessRecord {
			cycle: idx * self.generator.cycle_stride,
			kind,
			addr,
			payload: self.generator.payload,
			thread_id: self.generator.thread_id,
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.count.saturating_add(1).saturating_sub(self.next_idx);
		let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
		(remaining, Some(remaining))
	}
}

impl<R: Rng + ?Sized> ExactSizeIterator for Records<'_, R> {}

/// Line picker
enum Picker<'r, R: ?Sized> {
	Hotspot {
		hot:                    Partition,
		cold:                   Partition,
		hot_access_probability: f64,
		rng:                    &'r mut R,
	},
	Uniform {
		full: Partition,
		rng:  &'r mut R,
	},
	Sequential,
}

impl<R: Rng + ?Sized> Picker<'_, R> {
	/// Picks the line for access `idx`
	fn pick(&mut self, idx: u64, space: &AddressSpace) -> u64 {
		match self {
			Self::Hotspot {
				hot,
				cold,
				hot_access_probability,
				rng,
			} => match rng.gen::<f64>() < *hot_access_probability {
				true => hot.pick(&mut **rng),
				false => cold.pick(&mut **rng),
			},
			Self::Uniform { full, rng } => full.pick(&mut **rng),
			Self::Sequential => idx % space.lines(),
		}
	}
}
