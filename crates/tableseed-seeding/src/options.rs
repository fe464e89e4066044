//! Run configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SeedingResult;

/// How the run timestamp is written into `created_at`/`updated_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampStyle {
	/// `YYYY-MM-DD HH:MM:SS` in UTC.
	#[default]
	Datetime,
	/// Seconds since the Unix epoch.
	Unix,
}

impl TimestampStyle {
	/// Renders `instant` as a column value.
	pub fn render(self, instant: DateTime<Utc>) -> Value {
		match self {
			Self::Datetime => Value::String(instant.format("%Y-%m-%d %H:%M:%S").to_string()),
			Self::Unix => Value::from(instant.timestamp()),
		}
	}
}

/// Options of a single seed run.
///
/// Set once before the first insert. Can be built in code or read from
/// TOML:
///
/// ```toml
/// skip_truncate_tables = true
/// verbosity = 0
/// rng_seed = 42
/// timestamp_style = "unix"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeederOptions {
	/// Keep existing rows instead of truncating the seeded tables.
	pub skip_truncate_tables: bool,

	/// Verbosity level (0 = silent, 1 = row counts and missing columns).
	pub verbosity: u8,

	/// Seed for the run RNG. Entropy is used when unset.
	pub rng_seed: Option<u64>,

	/// Format of injected timestamps.
	pub timestamp_style: TimestampStyle,

	/// Pins the run timestamp instead of reading the clock.
	pub fixed_timestamp: Option<DateTime<Utc>>,
}

impl Default for SeederOptions {
	fn default() -> Self {
		Self {
			skip_truncate_tables: false,
			verbosity: 1,
			rng_seed: None,
			timestamp_style: TimestampStyle::default(),
			fixed_timestamp: None,
		}
	}
}

impl SeederOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses options from a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> SeedingResult<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Sets skip truncate flag.
	pub fn with_skip_truncate_tables(mut self, skip: bool) -> Self {
		self.skip_truncate_tables = skip;
		self
	}

	/// Sets verbosity level.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}

	/// Sets RNG seed.
	pub fn with_rng_seed(mut self, seed: u64) -> Self {
		self.rng_seed = Some(seed);
		self
	}

	/// Sets timestamp style.
	pub fn with_timestamp_style(mut self, style: TimestampStyle) -> Self {
		self.timestamp_style = style;
		self
	}

	/// Pins the run timestamp.
	pub fn with_fixed_timestamp(mut self, instant: DateTime<Utc>) -> Self {
		self.fixed_timestamp = Some(instant);
		self
	}
}
