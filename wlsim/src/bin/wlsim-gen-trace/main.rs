//! Generates the hotspot, uniform and sequential experiment traces

// Modules
mod args;
mod config;

// Imports
use {
	self::{args::Args, config::Config},
	anyhow::Context,
	clap::Parser,
	rand::{rngs::StdRng, SeedableRng},
	std::{fs, io::BufWriter, time::Duration},
	wlsim::{trace::TraceSummary, AddressSpace, DistributionPolicy, TraceGenerator, TraceWriter},
	wlsim_util::logger,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Read the config file, if any
	let config = match &args.config_file {
		Some(config_file) => {
			let config_file = fs::File::open(config_file).context("Unable to open config file")?;
			serde_json::from_reader::<_, Config>(config_file).context("Unable to parse config file")?
		},
		None => Config::default(),
	};
	tracing::debug!(?config, "Using config");

	// Build the generator
	let space = AddressSpace::try_new(config.address_space.lines, config.address_space.stride)
		.context("Invalid address space")?;
	let generator = TraceGenerator {
		space,
		cycle_stride: config.cycle_stride,
		payload: config.payload,
		thread_id: config.thread_id,
	};
	generator
		.validate(args.count)
		.context("Invalid trace generator")?;
	let debug_output_period =
		Duration::try_from_secs_f64(config.debug_output_period_secs).context("Invalid debug output period")?;

	let policies = [
		DistributionPolicy::Hotspot {
			hot_fraction:           config.hotspot.hot_fraction,
			hot_access_probability: config.hotspot.hot_access_probability,
		},
		DistributionPolicy::Uniform,
		DistributionPolicy::Sequential,
	];
	for policy in &policies {
		policy
			.validate(&space)
			.with_context(|| format!("Invalid {} policy", policy.name()))?;
	}

	// Then generate each trace
	for (policy_idx, policy) in policies.iter().enumerate() {
		// Note: Each trace gets its own source, so they're independent of each other
		let mut rng = match args.seed {
			Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(policy_idx as u64)),
			None => StdRng::from_entropy(),
		};

		let trace_path = args.output_dir.join(format!("trace_{}.trace", policy.name()));
		tracing::info!("Generating {policy} trace with {} writes to {trace_path:?}", args.count);

		let hot = match *policy {
			DistributionPolicy::Hotspot { hot_fraction, .. } => Some(space.partition(hot_fraction).0),
			DistributionPolicy::Uniform | DistributionPolicy::Sequential => None,
		};
		let mut summary = TraceSummary::new(space, hot);

		let trace_file = fs::File::create(&trace_path)
			.with_context(|| format!("Unable to create trace file {trace_path:?}"))?;
		let mut trace_writer = TraceWriter::new(BufWriter::new(trace_file));
		let records = generator
			.generate(policy, args.count, &mut rng)
			.inspect(|record| summary.register(record));
		trace_writer
			.write_records(records, debug_output_period)
			.with_context(|| format!("Unable to write trace file {trace_path:?}"))?;
		trace_writer.finish().context("Unable to finish writing trace")?;

		tracing::info!("Generated {trace_path:?}: {summary}");
	}

	Ok(())
}
