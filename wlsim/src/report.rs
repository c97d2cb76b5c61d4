//! Wear-leveling report parsing.
//!
//! The simulator emits a free-form text report, containing lines such as
//! `Max Wear: 420`. Each known field is extracted by looking for the first
//! occurrence of its label, followed by a colon, whitespace and a number.

// Imports
use {
	anyhow::Context,
	regex::Regex,
	std::{collections::BTreeMap, fmt, fs, io, path::Path},
};

/// Report field
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
	TotalWrites,
	GapMovements,
	UniqueLines,
	MaxWear,
	MinWear,
	AvgWear,
	Uniformity,
	Lifetime,
}

impl Field {
	/// All fields, in report order
	pub const ALL: [Self; 8] = [
		Self::TotalWrites,
		Self::GapMovements,
		Self::UniqueLines,
		Self::MaxWear,
		Self::MinWear,
		Self::AvgWear,
		Self::Uniformity,
		Self::Lifetime,
	];

	/// Returns the key of this field
	pub fn key(self) -> &'static str {
		match self {
			Self::TotalWrites => "total_writes",
			Self::GapMovements => "gap_movements",
			Self::UniqueLines => "unique_lines",
			Self::MaxWear => "max_wear",
			Self::MinWear => "min_wear",
			Self::AvgWear => "avg_wear",
			Self::Uniformity => "uniformity",
			Self::Lifetime => "lifetime",
		}
	}

	/// Returns the label the simulator uses for this field
	pub fn default_label(self) -> &'static str {
		match self {
			Self::TotalWrites => "Total Writes",
			Self::GapMovements => "Gap Movements",
			Self::UniqueLines => "Unique Lines Written",
			Self::MaxWear => "Max Wear",
			Self::MinWear => "Min Wear",
			Self::AvgWear => "Average Wear",
			Self::Uniformity => "Uniformity Ratio",
			Self::Lifetime => "Estimated Lifetime",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.default_label())
	}
}

/// Label of each field.
///
/// When deserializing, any missing field keeps its default label.
#[derive(PartialEq, Eq, Clone, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "BTreeMap<Field, String>", into = "BTreeMap<Field, String>")]
pub struct LabelTable {
	labels: BTreeMap<Field, String>,
}

impl LabelTable {
	/// Returns the label of `field`
	pub fn get(&self, field: Field) -> &str {
		self.labels
			.get(&field)
			.map_or_else(|| field.default_label(), String::as_str)
	}

	/// Sets the label of `field`
	pub fn set(&mut self, field: Field, label: impl Into<String>) {
		self.labels.insert(field, label.into());
	}
}

impl Default for LabelTable {
	fn default() -> Self {
		Self::from(BTreeMap::new())
	}
}

impl From<BTreeMap<Field, String>> for LabelTable {
	fn from(mut labels: BTreeMap<Field, String>) -> Self {
		for field in Field::ALL {
			labels.entry(field).or_insert_with(|| field.default_label().to_owned());
		}

		Self { labels }
	}
}

impl From<LabelTable> for BTreeMap<Field, String> {
	fn from(table: LabelTable) -> Self {
		table.labels
	}
}

/// Statistics parsed from a report.
///
/// Every field is always present, defaulting to `0` when the report lacks it.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ParsedStats {
	pub total_writes:  f64,
	pub gap_movements: f64,
	pub unique_lines:  f64,
	pub max_wear:      f64,
	pub min_wear:      f64,
	pub avg_wear:      f64,
	pub uniformity:    f64,
	pub lifetime:      f64,
}

impl ParsedStats {
	/// Returns the value of `field`
	pub fn get(&self, field: Field) -> f64 {
		match field {
			Field::TotalWrites => self.total_writes,
			Field::GapMovements => self.gap_movements,
			Field::UniqueLines => self.unique_lines,
			Field::MaxWear => self.max_wear,
			Field::MinWear => self.min_wear,
			Field::AvgWear => self.avg_wear,
			Field::Uniformity => self.uniformity,
			Field::Lifetime => self.lifetime,
		}
	}

	fn get_mut(&mut self, field: Field) -> &mut f64 {
		match field {
			Field::TotalWrites => &mut self.total_writes,
			Field::GapMovements => &mut self.gap_movements,
			Field::UniqueLines => &mut self.unique_lines,
			Field::MaxWear => &mut self.max_wear,
			Field::MinWear => &mut self.min_wear,
			Field::AvgWear => &mut self.avg_wear,
			Field::Uniformity => &mut self.uniformity,
			Field::Lifetime => &mut self.lifetime,
		}
	}
}

/// Report parser
#[derive(Clone, Debug)]
pub struct ReportParser {
	/// Pattern for each field
	patterns: Vec<(Field, Regex)>,
}

impl ReportParser {
	/// Creates a parser for reports labelled by `labels`
	pub fn new(labels: &LabelTable) -> Result<Self, anyhow::Error> {
		let patterns = Field::ALL
			.into_iter()
			.map(|field| {
				let label = labels.get(field);
				let pattern = format!(r"{}:\s+([0-9]+(?:\.[0-9]*)?)", regex::escape(label));
				let regex = Regex::new(&pattern)
					.with_context(|| format!("Unable to build pattern for {field:?} with label {label:?}"))?;
				Ok::<_, anyhow::Error>((field, regex))
			})
			.collect::<Result<_, anyhow::Error>>()?;

		Ok(Self { patterns })
	}

	/// Parses a report.
	///
	/// Fields missing from `report` (or with a malformed value) are `0`.
	pub fn parse(&self, report: &str) -> ParsedStats {
		let mut stats = ParsedStats::default();
		for (field, regex) in &self.patterns {
			let value = regex
				.captures(report)
				.and_then(|captures| captures.get(1))
				.and_then(|value| value.as_str().parse::<f64>().ok());

			match value {
				Some(value) => {
					tracing::trace!(?field, value, "Parsed field");
					*stats.get_mut(*field) = value;
				},
				None => tracing::debug!(?field, "Field missing from report, defaulting to 0"),
			}
		}

		stats
	}

	/// Parses the report at `path`.
	///
	/// Returns `Ok(None)` if the report doesn't exist.
	pub fn parse_file(&self, path: &Path) -> Result<Option<ParsedStats>, anyhow::Error> {
		let report = match fs::read_to_string(path) {
			Ok(report) => report,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				tracing::warn!("Report {path:?} does not exist");
				return Ok(None);
			},
			Err(err) => return Err(err).with_context(|| format!("Unable to read report {path:?}")),
		};

		Ok(Some(self.parse(&report)))
	}
}

impl Default for ReportParser {
	fn default() -> Self {
		Self::new(&LabelTable::default()).expect("Default labels should be valid patterns")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const REPORT: &str = "\
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
	fn parses_all_present_fields() {
		let stats = ReportParser::default().parse(REPORT);
		assert_eq!(stats, ParsedStats {
			total_writes:  100000.0,
			gap_movements: 0.0,
			unique_lines:  1000.0,
			max_wear:      420.0,
			min_wear:      38.0,
			avg_wear:      100.0,
			uniformity:    11.05,
			lifetime:      238095.0,
		});
	}

	#[test]
	fn missing_field_defaults_to_zero() {
		let stats = ReportParser::default().parse(REPORT);
		assert_eq!(stats.gap_movements, 0.0);
		assert_eq!(stats.get(Field::GapMovements), 0.0);
		assert_eq!(stats.get(Field::MaxWear), 420.0);
	}

	#[test]
	fn empty_report_is_all_zeros() {
		assert_eq!(ReportParser::default().parse(""), ParsedStats::default());
	}

	#[test]
	fn first_occurrence_wins() {
		let report = "Max Wear: 17\nsomething else\nMax Wear: 9000\n";
		assert_eq!(ReportParser::default().parse(report).max_wear, 17.0);
	}

	#[test]
	fn label_may_be_prefixed() {
		let report = "Total Writes: 500\nTotal Gap Movements: 5\n";
		let stats = ReportParser::default().parse(report);
		assert_eq!(stats.total_writes, 500.0);
		assert_eq!(stats.gap_movements, 5.0);
	}

	#[test]
	fn malformed_value_is_skipped() {
		let report = "Min Wear: many\nAverage Wear: 12.5\nUniformity Ratio:3\n";
		let stats = ReportParser::default().parse(report);
		assert_eq!(stats.min_wear, 0.0);
		assert_eq!(stats.avg_wear, 12.5);
		assert_eq!(stats.uniformity, 0.0);
	}

	#[test]
	fn only_ascii_digits_are_numbers() {
		let report = "Max Wear: \u{664}\u{662}\u{660}\nMax Wear: 420\n";
		assert_eq!(ReportParser::default().parse(report).max_wear, 420.0);
	}

	#[test]
	fn labels_are_case_sensitive() {
		assert_eq!(ReportParser::default().parse("max wear: 10").max_wear, 0.0);
	}

	#[test]
	fn custom_labels() {
		let mut labels = LabelTable::default();
		labels.set(Field::MaxWear, "Max writes to single line");
		labels.set(Field::Uniformity, "Uniformity ratio (max/avg)");
		let parser = ReportParser::new(&labels).expect("Unable to create parser");

		let report = "Total Writes: 100000\nMax writes to single line: 36\nUniformity ratio (max/avg): 3.6\n";
		let stats = parser.parse(report);
		assert_eq!(stats.total_writes, 100000.0);
		assert_eq!(stats.max_wear, 36.0);
		assert_eq!(stats.uniformity, 3.6);
	}

	#[test]
	fn label_table_keeps_defaults() {
		let labels = serde_json::from_str::<LabelTable>(r#"{ "max_wear": "Peak Wear" }"#)
			.expect("Unable to parse label table");
		assert_eq!(labels.get(Field::MaxWear), "Peak Wear");
		assert_eq!(labels.get(Field::MinWear), "Min Wear");
	}

	#[test]
	fn stats_serialize_with_known_keys() {
		let value = serde_json::to_value(ParsedStats::default()).expect("Unable to serialize stats");
		let object = value.as_object().expect("Stats weren't an object");
		assert_eq!(object.len(), Field::ALL.len());
		for field in Field::ALL {
			assert!(object.contains_key(field.key()), "Missing {field:?}");
		}
	}
}
