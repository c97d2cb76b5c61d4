//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Number of writes for each trace
	#[clap(default_value_t = 100_000)]
	pub count: u64,

	/// Output directory.
	///
	/// Must already exist.
	#[clap(long = "output-dir", default_value = "traces")]
	pub output_dir: PathBuf,

	/// Seed for the random traces.
	///
	/// If unset, the traces are seeded from entropy.
	#[clap(long = "seed")]
	pub seed: Option<u64>,

	/// Config file
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,
}
