//! Logger
//!
//! Logs to `stderr`, filtered by `RUST_LOG` (defaults to `info`), and,
//! optionally, to a file, filtered by `RUST_LOG_FILE` (defaults to `debug`).

// Imports
use {
	std::{fs, path::Path, sync::Mutex},
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Messages logged before the logger is initialized
static PRE_INIT_MESSAGES: Mutex<Vec<(tracing::Level, String)>> = Mutex::new(Vec::new());

/// Logging before initialization.
///
/// Messages are buffered and emitted once [`init`] is called.
pub mod pre_init {
	use super::PRE_INIT_MESSAGES;

	/// Logs a debug message
	pub fn debug(msg: impl Into<String>) {
		self::push(tracing::Level::DEBUG, msg.into());
	}

	/// Logs a warning message
	pub fn warn(msg: impl Into<String>) {
		self::push(tracing::Level::WARN, msg.into());
	}

	fn push(level: tracing::Level, msg: String) {
		match PRE_INIT_MESSAGES.lock() {
			Ok(mut messages) => messages.push((level, msg)),
			// Note: If the lock is poisoned, nothing is going to read it later either
			Err(_) => eprintln!("{msg}"),
		}
	}
}

/// Initializes the logger.
///
/// If `log_file` is set, logs verbosely to it as well, appending instead
/// of truncating if `log_file_append` is set.
///
/// # Panics
/// Panics if a global logger was already set.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let term_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_filter(self::env_filter("RUST_LOG", "info"));

	// Open the log file, if any
	let file_layer = log_file.and_then(|path| {
		let file = fs::OpenOptions::new()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(path);

		match file {
			Ok(file) => Some(
				tracing_subscriber::fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(self::env_filter("RUST_LOG_FILE", "debug")),
			),
			Err(err) => {
				pre_init::warn(format!("Unable to open log file {path:?}: {err}"));
				None
			},
		}
	});

	tracing_subscriber::registry().with(term_layer).with(file_layer).init();

	// Finally emit everything logged before we were initialized
	let messages = match PRE_INIT_MESSAGES.lock() {
		Ok(mut messages) => std::mem::take(&mut *messages),
		Err(_) => vec![],
	};
	for (level, msg) in messages {
		match level == tracing::Level::WARN {
			true => tracing::warn!("{msg}"),
			false => tracing::debug!("{msg}"),
		}
	}
}

/// Creates an env filter from `var`, or `default` if unset or invalid
fn env_filter(var: &str, default: &str) -> EnvFilter {
	EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
