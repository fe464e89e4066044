//! seed command implementation.
//!
//! This command runs a list of seeders, one run per seeder, in order.

use crate::error::{SeedingError, SeedingResult};
use crate::executor::StatementExecutor;
use crate::report::{ReportSink, SeedReport, StdoutSink};
use crate::schema::SchemaProvider;
use crate::seeder::{TableSeeder, seed_with};

/// Options for the seed command.
///
/// Unset fields keep the value each seeder asks for in
/// [`TableSeeder::options`].
#[derive(Debug, Clone, Default)]
pub struct SeedCommandOptions {
	/// Only run seeders with these names, in the order they were given.
	pub only: Vec<String>,

	/// Override every seeder's truncation setting.
	pub skip_truncate: Option<bool>,

	/// Override every seeder's verbosity level.
	pub verbosity: Option<u8>,

	/// Override every seeder's RNG seed.
	pub rng_seed: Option<u64>,
}

impl SeedCommandOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets seeder name filter.
	pub fn with_only(mut self, names: Vec<String>) -> Self {
		self.only = names;
		self
	}

	/// Sets skip truncate override.
	pub fn with_skip_truncate(mut self, skip: bool) -> Self {
		self.skip_truncate = Some(skip);
		self
	}

	/// Sets verbosity override.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = Some(level);
		self
	}

	/// Sets RNG seed override.
	pub fn with_rng_seed(mut self, seed: u64) -> Self {
		self.rng_seed = Some(seed);
		self
	}
}

/// Result of a seed command execution.
#[derive(Debug, Clone, Default)]
pub struct SeedSummary {
	/// `(seeder name, report)` in execution order.
	pub reports: Vec<(String, SeedReport)>,
}

impl SeedSummary {
	/// Total rows inserted by all seeders.
	pub fn total_rows(&self) -> usize {
		self.reports
			.iter()
			.map(|(_, report)| report.total_rows())
			.sum()
	}

	/// Returns the report of the seeder named `name`.
	pub fn report(&self, name: &str) -> Option<&SeedReport> {
		self.reports
			.iter()
			.find(|(seeder, _)| seeder == name)
			.map(|(_, report)| report)
	}
}

/// The seed command for running table seeders.
///
/// Seeders run in the order given. Each one gets a fresh run, so each
/// truncates only the tables it seeds; order seeders so that referenced
/// tables are seeded before the tables pointing at them.
///
/// # Example
///
/// ```ignore
/// let command = SeedCommand::new();
/// let seeders: Vec<Box<dyn TableSeeder>> = vec![Box::new(UserSeeder), Box::new(PostSeeder)];
/// let options = SeedCommandOptions::new().with_rng_seed(42);
/// let summary = command.execute(&seeders, &database, &database, options).await?;
/// println!("Seeded {} rows", summary.total_rows());
/// ```
#[derive(Debug, Default)]
pub struct SeedCommand;

impl SeedCommand {
	/// Creates a new seed command.
	pub fn new() -> Self {
		Self
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"seed"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Fills tables with generated rows using the registered seeders"
	}

	/// Returns the command help text.
	pub fn help(&self) -> &str {
		r#"
Usage: seed [options]

Runs the registered seeders in order. Each seeder truncates the tables it
fills (unless told otherwise), batch-inserts its rows and reports columns
that were never given a value.

Options:
  --only NAME          Only run the named seeder(s)
  --skip-truncate      Keep existing rows
  --seed N             Seed the random generator for reproducible data
  --verbosity LEVEL    Verbosity level (0=silent, 1=normal)
"#
	}

	/// Executes the seed command, printing to stdout.
	pub async fn execute(
		&self,
		seeders: &[Box<dyn TableSeeder>],
		schema: &dyn SchemaProvider,
		executor: &dyn StatementExecutor,
		options: SeedCommandOptions,
	) -> SeedingResult<SeedSummary> {
		self.execute_with_sink(seeders, schema, executor, options, StdoutSink)
			.await
	}

	/// Executes the seed command, sending report lines to `sink`.
	///
	/// # Errors
	///
	/// - [`SeedingError::Validation`] when there is no seeder to run
	/// - [`SeedingError::SeederNotFound`] when `only` names an unknown seeder
	/// - the first error of any seeder; later seeders do not run
	pub async fn execute_with_sink<K>(
		&self,
		seeders: &[Box<dyn TableSeeder>],
		schema: &dyn SchemaProvider,
		executor: &dyn StatementExecutor,
		options: SeedCommandOptions,
		sink: K,
	) -> SeedingResult<SeedSummary>
	where
		K: ReportSink + Clone + 'static,
	{
		let selected = Self::select(seeders, &options.only)?;

		let mut summary = SeedSummary::default();
		for seeder in selected {
			let mut run_options = seeder.options();
			if let Some(skip) = options.skip_truncate {
				run_options.skip_truncate_tables = skip;
			}
			if let Some(level) = options.verbosity {
				run_options.verbosity = level;
			}
			if let Some(seed) = options.rng_seed {
				run_options.rng_seed = Some(seed);
			}

			let report = seed_with(seeder, schema, executor, run_options, sink.clone()).await?;
			summary.reports.push((seeder.name().to_string(), report));
		}

		Ok(summary)
	}

	fn select<'s>(
		seeders: &'s [Box<dyn TableSeeder>],
		only: &[String],
	) -> SeedingResult<Vec<&'s dyn TableSeeder>> {
		if seeders.is_empty() {
			return Err(SeedingError::Validation {
				field: "seeders".to_string(),
				message: "At least one seeder must be registered".to_string(),
			});
		}

		if only.is_empty() {
			return Ok(seeders.iter().map(|seeder| seeder.as_ref()).collect());
		}

		only.iter()
			.map(|name| {
				seeders
					.iter()
					.find(|seeder| seeder.name() == name)
					.map(|seeder| seeder.as_ref())
					.ok_or_else(|| SeedingError::SeederNotFound(name.clone()))
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::{RecordingExecutor, StaticSchema, Statement};
	use crate::report::BufferSink;
	use crate::row;
	use crate::run::SeedRun;
	use crate::schema::{ColumnSchema, TableSchema};
	use async_trait::async_trait;
	use rstest::{fixture, rstest};

	struct NamedSeeder {
		name: &'static str,
		table: &'static str,
	}

	#[async_trait]
	impl TableSeeder for NamedSeeder {
		fn name(&self) -> &str {
			self.name
		}

		async fn run(&self, run: &mut SeedRun<'_>) -> SeedingResult<()> {
			run.insert(self.table, row! { "label" => self.name }).await
		}
	}

	#[fixture]
	fn schema() -> StaticSchema {
		let label = || vec![ColumnSchema::new("label", "text")];
		StaticSchema::new()
			.with_table(TableSchema::new("authors", label()))
			.with_table(TableSchema::new("books", label()))
	}

	#[fixture]
	fn seeders() -> Vec<Box<dyn TableSeeder>> {
		vec![
			Box::new(NamedSeeder {
				name: "authors",
				table: "authors",
			}),
			Box::new(NamedSeeder {
				name: "books",
				table: "books",
			}),
		]
	}

	fn inserted_tables(executor: &RecordingExecutor) -> Vec<String> {
		executor
			.inserts()
			.into_iter()
			.filter_map(|statement| match statement {
				Statement::BatchInsert { table, .. } => Some(table),
				_ => None,
			})
			.collect()
	}

	#[rstest]
	fn test_command_metadata() {
		let cmd = SeedCommand::new();
		assert_eq!(cmd.name(), "seed");
		assert!(!cmd.description().is_empty());
		assert!(!cmd.help().is_empty());
	}

	#[rstest]
	fn test_options_builder() {
		let options = SeedCommandOptions::new()
			.with_only(vec!["books".to_string()])
			.with_skip_truncate(true)
			.with_verbosity(0)
			.with_rng_seed(5);

		assert_eq!(options.only, vec!["books".to_string()]);
		assert_eq!(options.skip_truncate, Some(true));
		assert_eq!(options.verbosity, Some(0));
		assert_eq!(options.rng_seed, Some(5));
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_without_seeders(schema: StaticSchema) {
		let executor = RecordingExecutor::new();

		let result = SeedCommand::new()
			.execute(&[], &schema, &executor, SeedCommandOptions::new())
			.await;

		assert!(matches!(result, Err(SeedingError::Validation { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_runs_in_order(
		schema: StaticSchema,
		seeders: Vec<Box<dyn TableSeeder>>,
	) {
		let executor = RecordingExecutor::new();
		let sink = BufferSink::new();

		let summary = SeedCommand::new()
			.execute_with_sink(
				&seeders,
				&schema,
				&executor,
				SeedCommandOptions::new(),
				sink.clone(),
			)
			.await
			.unwrap();

		assert_eq!(summary.total_rows(), 2);
		assert_eq!(summary.report("books").unwrap().total_rows(), 1);
		assert_eq!(inserted_tables(&executor), ["authors", "books"]);
		assert_eq!(
			sink.lines(),
			vec!["      1 row inserted in authors", "      1 row inserted in books"]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_only_filter_and_overrides(
		schema: StaticSchema,
		seeders: Vec<Box<dyn TableSeeder>>,
	) {
		let executor = RecordingExecutor::new();
		let options = SeedCommandOptions::new()
			.with_only(vec!["books".to_string()])
			.with_skip_truncate(true)
			.with_verbosity(0);

		let summary = SeedCommand::new()
			.execute_with_sink(&seeders, &schema, &executor, options, BufferSink::new())
			.await
			.unwrap();

		assert_eq!(summary.reports.len(), 1);
		assert!(!summary.reports[0].1.truncated);
		assert_eq!(executor.statements().len(), 1);
		assert_eq!(inserted_tables(&executor), ["books"]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_unknown_seeder(
		schema: StaticSchema,
		seeders: Vec<Box<dyn TableSeeder>>,
	) {
		let executor = RecordingExecutor::new();
		let options = SeedCommandOptions::new().with_only(vec!["comments".to_string()]);

		let result = SeedCommand::new()
			.execute(&seeders, &schema, &executor, options)
			.await;

		assert!(matches!(result, Err(SeedingError::SeederNotFound(name)) if name == "comments"));
		assert!(executor.statements().is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_stops_at_first_failure(
		schema: StaticSchema,
		seeders: Vec<Box<dyn TableSeeder>>,
	) {
		let executor = RecordingExecutor::new().failing_on("authors");

		let result = SeedCommand::new()
			.execute_with_sink(
				&seeders,
				&schema,
				&executor,
				SeedCommandOptions::new(),
				BufferSink::new(),
			)
			.await;

		assert!(matches!(result, Err(SeedingError::Truncate { .. })));
		assert!(inserted_tables(&executor).is_empty());
	}
}
