//! Trace writer

// Imports
use {
	super::AccessRecord,
	anyhow::Context,
	std::{
		io,
		time::{Duration, Instant},
	},
};

/// Trace writer
#[derive(Clone, Debug)]
pub struct TraceWriter<W> {
	/// Records written
	records_written: u64,

	/// Writer
	writer: W,
}

impl<W: io::Write> TraceWriter<W> {
	/// Creates a new writer
	pub fn new(writer: W) -> Self {
		Self {
			records_written: 0,
			writer,
		}
	}

	/// Writes a record
	pub fn write(&mut self, record: &AccessRecord) -> Result<(), anyhow::Error> {
		writeln!(self.writer, "{record}").context("Unable to write record")?;

		self.records_written += 1;
		Ok(())
	}

	/// Writes all records from `records`, in order.
	///
	/// Progress is logged at most once every `debug_output_period`.
	pub fn write_records<I>(&mut self, records: I, debug_output_period: Duration) -> Result<(), anyhow::Error>
	where
		I: IntoIterator<Item = AccessRecord>,
		I::IntoIter: ExactSizeIterator,
	{
		// Note: We start in the past so that we output right away at the start
		let mut last_debug_time = Instant::now().checked_sub(debug_output_period);

		let records = records.into_iter();
		let total_records = records.len();
		for (record_idx, record) in records.enumerate() {
			self.write(&record)
				.with_context(|| format!("Unable to write record #{record_idx}"))?;

			let cur_time = Instant::now();
			if last_debug_time.map_or(true, |last_debug_time| {
				cur_time.duration_since(last_debug_time) >= debug_output_period
			}) {
				let records_written = record_idx + 1;
				let records_written_percentage = self::progress_percentage(records_written, total_records);
				tracing::info!("[{records_written_percentage:.2}%] Written {records_written}/{total_records} records");
				last_debug_time = Some(cur_time);
			}
		}

		Ok(())
	}

	/// Returns the number of records written
	pub fn records_written(&self) -> u64 {
		self.records_written
	}

	/// Finishes writing, flushing all records
	pub fn finish(mut self) -> Result<W, anyhow::Error> {
		self.writer.flush().context("Unable to flush writer")?;

		Ok(self.writer)
	}
}

/// Returns the percentage of `total` that `written` represents
fn progress_percentage(written: usize, total: usize) -> f64 {
	match total {
		0 => 100.0,
		_ => 100.0 * (written as f64 / total as f64),
	}
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::{
			address_space::AddressSpace,
			trace::{AccessKind, Payload, TraceGenerator},
		},
	};

	#[test]
	fn writes_one_line_per_record() {
		let generator = TraceGenerator::new(AddressSpace::default());
		let mut writer = TraceWriter::new(vec![]);
		writer
			.write_records(generator.generate_sequential(100), Duration::from_secs(60))
			.expect("Unable to write records");
		assert_eq!(writer.records_written(), 101);

		let output = String::from_utf8(writer.finish().expect("Unable to finish")).expect("Trace wasn't utf-8");
		let lines = output.lines().collect::<Vec<_>>();
		let payload = "0".repeat(128);
		assert_eq!(lines.len(), 101);
		assert_eq!(lines[0], format!("0 W 0x0 {payload} 0"));
		assert_eq!(lines[1], format!("10 W 0x100 {payload} 0"));
		assert_eq!(lines[99], format!("990 W 0x6300 {payload} 0"));
		assert_eq!(lines[100], format!("1000 R 0x0 {payload} 0"));
		assert!(output.ends_with('\n'));
	}

	#[test]
	fn progress_counts_written_records() {
		assert_eq!(progress_percentage(1, 4), 25.0);
		assert_eq!(progress_percentage(4, 4), 100.0);
		assert_eq!(progress_percentage(0, 0), 100.0);
	}

	#[test]
	fn writes_custom_payload() {
		let mut writer = TraceWriter::new(vec![]);
		writer
			.write(&AccessRecord {
				cycle:     0,
				kind:      AccessKind::Write,
				addr:      0xff00,
				payload:   Payload { filler: 'x', len: 3 },
				thread_id: 2,
			})
			.expect("Unable to write record");

		let output = writer.finish().expect("Unable to finish");
		assert_eq!(output, b"0 W 0xff00 xxx 2\n");
	}
}
