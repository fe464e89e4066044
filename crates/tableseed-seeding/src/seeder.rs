//! The seeder trait and the helper that drives one seeder through a run.

use async_trait::async_trait;

use crate::error::SeedingResult;
use crate::executor::StatementExecutor;
use crate::options::SeederOptions;
use crate::report::{ReportSink, SeedReport, StdoutSink};
use crate::run::SeedRun;
use crate::schema::SchemaProvider;

/// A unit that generates rows for one or more tables.
///
/// # Example
///
/// ```ignore
/// use tableseed_seeding::fake::Fake;
/// use tableseed_seeding::fake::faker::name::en::Name;
/// use tableseed_seeding::prelude::*;
///
/// struct UserSeeder;
///
/// #[async_trait::async_trait]
/// impl TableSeeder for UserSeeder {
///     fn name(&self) -> &str {
///         "users"
///     }
///
///     async fn run(&self, run: &mut SeedRun<'_>) -> SeedingResult<()> {
///         for _ in 0..10 {
///             let name: String = Name().fake_with_rng(run.rng());
///             run.insert("users", row! { "name" => name }).await?;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait TableSeeder: Send + Sync {
	/// Name used for filtering and logging. Defaults to the type name.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// Options for the run this seeder executes in.
	fn options(&self) -> SeederOptions {
		SeederOptions::default()
	}

	/// Records the seeder's rows.
	async fn run(&self, run: &mut SeedRun<'_>) -> SeedingResult<()>;
}

/// Runs `seeder` with its own options and finishes the run.
pub async fn seed<S: TableSeeder + ?Sized>(
	seeder: &S,
	schema: &dyn SchemaProvider,
	executor: &dyn StatementExecutor,
) -> SeedingResult<SeedReport> {
	seed_with(seeder, schema, executor, seeder.options(), StdoutSink).await
}

/// Runs `seeder` with explicit options and report sink.
pub async fn seed_with<S: TableSeeder + ?Sized>(
	seeder: &S,
	schema: &dyn SchemaProvider,
	executor: &dyn StatementExecutor,
	options: SeederOptions,
	sink: impl ReportSink + 'static,
) -> SeedingResult<SeedReport> {
	tracing::info!(seeder = seeder.name(), "running seeder");
	let mut run = SeedRun::new(schema, executor, options).with_sink(sink);
	seeder.run(&mut run).await?;
	let report = run.finish().await?;
	tracing::info!(
		seeder = seeder.name(),
		rows = report.total_rows(),
		"seeder finished"
	);
	Ok(report)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::{RecordingExecutor, StaticSchema, Statement};
	use crate::report::BufferSink;
	use crate::row;
	use crate::schema::{ColumnSchema, TableSchema};
	use rstest::rstest;
	use serde_json::json;

	struct TagSeeder {
		skip_truncate: bool,
	}

	#[async_trait]
	impl TableSeeder for TagSeeder {
		fn options(&self) -> SeederOptions {
			SeederOptions::new()
				.with_skip_truncate_tables(self.skip_truncate)
				.with_verbosity(0)
		}

		async fn run(&self, run: &mut SeedRun<'_>) -> SeedingResult<()> {
			for label in ["red", "green"] {
				run.insert("tags", row! { "label" => label }).await?;
			}
			Ok(())
		}
	}

	fn tags_schema() -> StaticSchema {
		StaticSchema::new().with_table(TableSchema::new(
			"tags",
			vec![
				ColumnSchema::auto_increment("id", "integer"),
				ColumnSchema::new("label", "text"),
			],
		))
	}

	fn assert_send<T: Send>(_: T) {}

	#[rstest]
	fn test_run_futures_are_send() {
		let schema = tags_schema();
		let executor = RecordingExecutor::new();
		let seeder = TagSeeder {
			skip_truncate: false,
		};

		assert_send(seed(&seeder, &schema, &executor));
		assert_send(seed_with(
			&seeder,
			&schema,
			&executor,
			SeederOptions::new(),
			BufferSink::new(),
		));
		let run = SeedRun::new(&schema, &executor, SeederOptions::new());
		assert_send(run.finish());
	}

	#[rstest]
	fn test_default_name_is_type_name() {
		let seeder = TagSeeder {
			skip_truncate: false,
		};
		assert!(seeder.name().ends_with("TagSeeder"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_seed_uses_seeder_options() {
		let schema = tags_schema();
		let executor = RecordingExecutor::new();
		let seeder = TagSeeder {
			skip_truncate: true,
		};

		let report = seed(&seeder, &schema, &executor).await.unwrap();

		assert!(!report.truncated);
		assert_eq!(report.total_rows(), 2);
		assert_eq!(
			executor.statements(),
			vec![Statement::BatchInsert {
				table: "tags".to_string(),
				columns: vec!["label".to_string()],
				rows: vec![vec![json!("red")], vec![json!("green")]],
			}]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_seed_with_overrides_options() {
		let schema = tags_schema();
		let executor = RecordingExecutor::new();
		let sink = BufferSink::new();
		let seeder = TagSeeder {
			skip_truncate: true,
		};

		let report = seed_with(
			&seeder,
			&schema,
			&executor,
			SeederOptions::new(),
			sink.clone(),
		)
		.await
		.unwrap();

		assert!(report.truncated);
		assert_eq!(
			executor.statements()[..3],
			[
				Statement::ConstraintChecks(false),
				Statement::Truncate("tags".to_string()),
				Statement::ConstraintChecks(true),
			]
		);
		assert_eq!(sink.lines(), vec!["      2 rows inserted in tags"]);
	}
}
