//! Analyzes the simulator's wear-leveling reports for each experiment

// Modules
mod args;
mod config;

// Imports
use {
	self::{args::Args, config::Config},
	anyhow::Context,
	clap::Parser,
	std::fs,
	wlsim::{Comparison, ReportParser},
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

	// Parse all reports
	tracing::info!("Reading reports from {:?}", args.results_dir);
	let parser = ReportParser::new(&config.labels).context("Unable to create report parser")?;
	let [hotspot, uniform, sequential] = [&config.files.hotspot, &config.files.uniform, &config.files.sequential]
		.map(|file_name| {
			let path = args.results_dir.join(file_name);
			parser
				.parse_file(&path)
				.with_context(|| format!("Unable to parse report {path:?}"))
		});
	let (hotspot, uniform, sequential) = (hotspot?, uniform?, sequential?);

	// Then compare them
	let comparison = Comparison::new(
		hotspot,
		uniform,
		sequential,
		&config.metrics,
		&config.uniformity_ranges,
	)
	.with_context(|| {
		format!(
			"Unable to compare results, expected {:?} and {:?} in {:?}",
			config.files.hotspot, config.files.uniform, args.results_dir
		)
	})?;
	println!("{comparison}");

	if let Some(output_path) = &args.output_file {
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer_pretty(output_file, &comparison).context("Unable to write to output file")?;
	}

	Ok(())
}
