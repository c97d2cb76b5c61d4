//! Address space

// Imports
use rand::Rng;

/// Address space
///
/// Contains `lines` lines, each `stride` bytes apart, starting at address 0.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct AddressSpace {
	/// Number of lines
	lines: u64,

	/// Line stride, in bytes
	stride: u64,
}

impl AddressSpace {
	/// Line stride of the reference address space
	pub const DEFAULT_STRIDE: u64 = 0x100;

	/// Number of lines of the reference address space
	pub const DEFAULT_LINES: u64 = 1000;

	/// Creates a new address space
	///
	/// # Panics
	/// Panics if [`Self::try_new`] would fail.
	pub fn new(lines: u64, stride: u64) -> Self {
		match Self::try_new(lines, stride) {
			Ok(space) => space,
			Err(err) => panic!("Invalid address space: {err}"),
		}
	}

	/// Creates a new address space.
	///
	/// # Errors
	/// Returns an error if `lines` or `stride` are zero, or if the last
	/// address doesn't fit in a `u64`.
	pub fn try_new(lines: u64, stride: u64) -> Result<Self, anyhow::Error> {
		anyhow::ensure!(lines > 0, "Address space must have at least 1 line");
		anyhow::ensure!(stride > 0, "Address space stride must be non-zero");
		anyhow::ensure!(
			(lines - 1).checked_mul(stride).is_some(),
			"Address space of {lines} lines with stride {stride:#x} overflows a 64-bit address"
		);

		Ok(Self { lines, stride })
	}

	/// Returns the number of lines
	pub fn lines(&self) -> u64 {
		self.lines
	}

	/// Returns the line stride
	pub fn stride(&self) -> u64 {
		self.stride
	}

	/// Returns the address of line `line`
	pub fn addr_of(&self, line: u64) -> u64 {
		line * self.stride
	}

	/// Returns the line of `addr`, if it's a valid address in this space
	pub fn line_of(&self, addr: u64) -> Option<u64> {
		let line = addr / self.stride;
		(addr % self.stride == 0 && line < self.lines).then_some(line)
	}

	/// Returns all addresses, in order
	pub fn addresses(&self) -> impl Iterator<Item = u64> + '_ {
		(0..self.lines).map(|line| self.addr_of(line))
	}

	/// Returns the whole address space as a partition
	pub fn full(&self) -> Partition {
		Partition {
			first_line: 0,
			lines:      self.lines,
		}
	}

	/// Returns the number of hot lines for `hot_fraction`
	pub fn hot_lines(&self, hot_fraction: f64) -> u64 {
		(hot_fraction * self.lines as f64).round() as u64
	}

	/// Splits this address space into a hot prefix and a cold remainder.
	///
	/// The hot partition has `round(hot_fraction * lines)` lines.
	///
	/// # Panics
	/// Panics if either partition would be empty.
	pub fn partition(&self, hot_fraction: f64) -> (Partition, Partition) {
		let hot_lines = self.hot_lines(hot_fraction);
		assert!(
			hot_lines > 0 && hot_lines < self.lines,
			"Hot fraction {hot_fraction} leaves an empty partition of {} lines",
			self.lines
		);

		let hot = Partition {
			first_line: 0,
			lines:      hot_lines,
		};
		let cold = Partition {
			first_line: hot_lines,
			lines:      self.lines - hot_lines,
		};

		(hot, cold)
	}
}

impl Default for AddressSpace {
	fn default() -> Self {
		Self::new(Self::DEFAULT_LINES, Self::DEFAULT_STRIDE)
	}
}

/// A contiguous, non-empty, range of lines of an address space
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Partition {
	/// First line
	first_line: u64,

	/// Number of lines
	lines: u64,
}

impl Partition {
	/// Returns the number of lines
	pub fn lines(&self) -> u64 {
		self.lines
	}

	/// Returns if `line` is within this partition
	pub fn contains(&self, line: u64) -> bool {
		(self.first_line..self.first_line + self.lines).contains(&line)
	}

	/// Picks a line uniformly at random
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
		rng.gen_range(self.first_line..self.first_line + self.lines)
	}
}

#[cfg(test)]
mod tests {
	use {super::*, rand::SeedableRng};

	#[test]
	fn addresses_are_strided() {
		let space = AddressSpace::new(4, 0x100);
		assert_eq!(space.addresses().collect::<Vec<_>>(), [0x0, 0x100, 0x200, 0x300]);
		assert_eq!(space.line_of(0x200), Some(2));
		assert_eq!(space.line_of(0x210), None);
		assert_eq!(space.line_of(0x400), None);
	}

	#[test]
	fn reference_partition() {
		let space = AddressSpace::default();
		let (hot, cold) = space.partition(0.2);
		assert_eq!(hot.lines(), 200);
		assert_eq!(cold.lines(), 800);
		assert!(hot.contains(0) && hot.contains(199));
		assert!(!hot.contains(200));
		assert!(cold.contains(200) && cold.contains(999));
		assert!(!cold.contains(1000));
	}

	#[test]
	fn rejects_overflowing_addresses() {
		assert!(AddressSpace::try_new(4, 1 << 62).is_err());
		assert!(AddressSpace::try_new(0, 0x100).is_err());
		assert!(AddressSpace::try_new(4, 0).is_err());

		let space = AddressSpace::try_new(4, 1 << 61).expect("Space should fit");
		assert_eq!(space.addresses().last(), Some(3 << 61));
		assert_eq!(AddressSpace::try_new(1, u64::MAX).map(|space| space.addr_of(0)).ok(), Some(0));
	}

	#[test]
	#[should_panic]
	fn new_panics_on_overflow() {
		AddressSpace::new(4, 1 << 62);
	}

	#[test]
	fn partition_rounds() {
		let space = AddressSpace::new(7, 0x100);
		let (hot, cold) = space.partition(0.5);
		assert_eq!(hot.lines(), 4);
		assert_eq!(cold.lines(), 3);
	}

	#[test]
	#[should_panic]
	fn partition_rejects_empty_side() {
		AddressSpace::new(2, 0x100).partition(0.1);
	}

	#[test]
	fn pick_stays_within_partition() {
		let (_, cold) = AddressSpace::default().partition(0.2);
		let mut rng = rand::rngs::StdRng::seed_from_u64(5);
		for _ in 0..1000 {
			assert!(cold.contains(cold.pick(&mut rng)));
		}
	}
}
