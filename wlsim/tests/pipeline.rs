//! Generation and analysis over real files

// Imports
use {
	rand::{rngs::StdRng, SeedableRng},
	std::{
		fs,
		io::{BufWriter, Write},
		time::Duration,
	},
	wlsim::{
		compare::{Mode, UniformityRanges},
		AddressSpace,
		Comparison,
		DistributionPolicy,
		MetricsConfig,
		ReportParser,
		TraceGenerator,
		TraceWriter,
	},
};

const REPORT: &str = "\
[StartGap] Write #100 addr=0x3e700 writeCounter=100
[StartGap] Gap moved! totalGapMovements=1 gapReg=1048575 startReg=0

========== Start-Gap Statistics ==========
Total Writes: 100000
Unique Lines Written: 1000
Max Wear: 420
Min Wear: 38
Average Wear: 100.0
Uniformity Ratio: 11.05
Estimated Lifetime: 238095
==========================================
";

#[test]
fn writes_hotspot_trace_file() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	let path = dir.path().join("trace_hotspot.trace");

	let space = AddressSpace::default();
	let generator = TraceGenerator::new(space);
	let mut rng = StdRng::seed_from_u64(2024);
	let file = fs::File::create(&path).expect("Unable to create trace file");
	let mut writer = TraceWriter::new(BufWriter::new(file));
	writer
		.write_records(
			generator.generate(&DistributionPolicy::HOTSPOT_80_20, 20_000, &mut rng),
			Duration::from_secs(1),
		)
		.expect("Unable to write trace");
	writer.finish().expect("Unable to finish trace");

	let trace = fs::read_to_string(&path).expect("Unable to read trace");
	let lines = trace.lines().collect::<Vec<_>>();
	assert_eq!(lines.len(), 20_001);

	let payload = "0".repeat(128);
	let mut prev_cycle = None;
	let mut hot_writes = 0;
	for (idx, line) in lines.iter().enumerate() {
		let [cycle, kind, addr, data, thread_id] = line.split(' ').collect::<Vec<_>>()[..] else {
			panic!("Malformed line #{idx}: {line:?}");
		};

		let cycle = cycle.parse::<u64>().expect("Invalid cycle");
		assert_eq!(cycle, idx as u64 * 10);
		assert!(prev_cycle.map_or(true, |prev_cycle| prev_cycle < cycle));
		prev_cycle = Some(cycle);

		let addr = u64::from_str_radix(addr.strip_prefix("0x").expect("Missing hex prefix"), 16).expect("Invalid address");
		let line_idx = space.line_of(addr).expect("Address outside of space");
		assert_eq!(data, payload);
		assert_eq!(thread_id, "0");

		match idx < 20_000 {
			true => {
				assert_eq!(kind, "W");
				hot_writes += usize::from(line_idx < 200);
			},
			false => {
				assert_eq!(kind, "R");
				assert_eq!(addr, 0);
			},
		}
	}

	let hot_fraction = hot_writes as f64 / 20_000.0;
	assert!((hot_fraction - 0.8).abs() < 0.02, "Hot fraction: {hot_fraction}");
}

#[test]
fn rewriting_a_trace_overwrites_it() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	let path = dir.path().join("trace_sequential.trace");
	let generator = TraceGenerator::new(AddressSpace::default());

	for count in [1000, 10] {
		let file = fs::File::create(&path).expect("Unable to create trace file");
		let mut writer = TraceWriter::new(BufWriter::new(file));
		writer
			.write_records(generator.generate_sequential(count), Duration::from_secs(1))
			.expect("Unable to write trace");
		writer.finish().expect("Unable to finish trace");
	}

	let trace = fs::read_to_string(&path).expect("Unable to read trace");
	assert_eq!(trace.lines().count(), 11);
	assert!(trace.lines().last().is_some_and(|line| line.starts_with("100 R 0x0 ")));
}

#[test]
fn analyzes_report_files() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	for file_name in ["exp1_hotspot.txt", "exp2_uniform.txt"] {
		let mut file = fs::File::create(dir.path().join(file_name)).expect("Unable to create report");
		file.write_all(REPORT.as_bytes()).expect("Unable to write report");
	}

	let parser = ReportParser::default();
	let hotspot = parser
		.parse_file(&dir.path().join("exp1_hotspot.txt"))
		.expect("Unable to parse report");
	let uniform = parser
		.parse_file(&dir.path().join("exp2_uniform.txt"))
		.expect("Unable to parse report");
	let sequential = parser
		.parse_file(&dir.path().join("exp3_sequential.txt"))
		.expect("Unable to parse report");
	assert!(sequential.is_none());

	let stats = hotspot.expect("Missing hotspot report");
	assert_eq!(stats.max_wear, 420.0);
	assert_eq!(stats.min_wear, 38.0);
	assert_eq!(stats.gap_movements, 0.0);

	let comparison = Comparison::new(
		hotspot,
		uniform,
		sequential,
		&MetricsConfig::default(),
		&UniformityRanges::default(),
	)
	.expect("Unable to compare");
	let set = comparison.get(Mode::Hotspot).expect("Missing hotspot set");
	assert_eq!(set.derived.wear_spread, 382.0);
	let multiple = set.derived.remaining_lifetime_multiple.expect("Missing lifetime multiple");
	assert!((multiple - 238095.24).abs() < 0.01, "Multiple: {multiple}");
	assert!(comparison.get(Mode::Sequential).is_none());
	assert!(comparison.uniformity_checks.iter().all(|check| !check.in_range));
}

#[test]
fn missing_baseline_fails_comparison() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	fs::write(dir.path().join("exp1_hotspot.txt"), REPORT).expect("Unable to write report");

	let parser = ReportParser::default();
	let hotspot = parser
		.parse_file(&dir.path().join("exp1_hotspot.txt"))
		.expect("Unable to parse report");
	let uniform = parser
		.parse_file(&dir.path().join("exp2_uniform.txt"))
		.expect("Unable to parse report");
	assert!(hotspot.is_some());
	assert!(uniform.is_none());

	let err = Comparison::new(
		hotspot,
		uniform,
		None,
		&MetricsConfig::default(),
		&UniformityRanges::default(),
	)
	.expect_err("Comparison should fail without the uniform results");
	assert!(err.to_string().contains("Both baseline result sets are required"));
}

#[test]
fn unreadable_report_is_an_error() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	assert!(ReportParser::default().parse_file(dir.path()).is_err());
}
