//! A single seeding run: records rows, then truncates, flushes and audits.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;

use crate::audit::MissingColumnsReport;
use crate::batch::{ColumnCoverage, PendingBatch};
use crate::error::{SeedingError, SeedingResult};
use crate::executor::StatementExecutor;
use crate::options::SeederOptions;
use crate::report::{ReportSink, SeedReport, StdoutSink, TableSummary};
use crate::row::Row;
use crate::schema::{CREATED_AT, SchemaProvider, TableSchema, UPDATED_AT};
use crate::weighted::WeightedChoice;

/// Accumulates rows for one seeding run.
///
/// Rows are only written when [`finish`](SeedRun::finish) consumes the run:
///
/// 1. unless `skip_truncate_tables` is set, constraint checks are disabled,
///    every seeded table is truncated and checks are enabled again;
/// 2. one batch insert is issued per table and column signature;
/// 3. row counts are reported;
/// 4. the missing-column audit runs.
///
/// The first failing statement aborts the remaining steps.
///
/// # Example
///
/// ```
/// # use tableseed_seeding::prelude::*;
/// # tokio_test_block_on(async {
/// let schema = StaticSchema::new().with_table(TableSchema::new(
///     "users",
///     vec![
///         ColumnSchema::auto_increment("id", "integer"),
///         ColumnSchema::new("name", "text"),
///     ],
/// ));
/// let executor = RecordingExecutor::new();
///
/// let mut run = SeedRun::new(&schema, &executor, SeederOptions::new().with_verbosity(0));
/// run.insert("users", row! { "name" => "Bob" }).await?;
/// let report = run.finish().await?;
///
/// assert_eq!(report.total_rows(), 1);
/// # Ok::<(), SeedingError>(())
/// # }).unwrap();
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub struct SeedRun<'a> {
	schema: &'a dyn SchemaProvider,
	executor: &'a dyn StatementExecutor,
	options: SeederOptions,
	started_at: DateTime<Utc>,
	timestamp: Value,
	schemas: IndexMap<String, TableSchema>,
	pending: PendingBatch,
	coverage: ColumnCoverage,
	rng: StdRng,
	sink: Box<dyn ReportSink>,
}

impl<'a> SeedRun<'a> {
	/// Starts a run. The run timestamp is fixed here.
	pub fn new(
		schema: &'a dyn SchemaProvider,
		executor: &'a dyn StatementExecutor,
		options: SeederOptions,
	) -> Self {
		let started_at = options.fixed_timestamp.unwrap_or_else(Utc::now);
		let timestamp = options.timestamp_style.render(started_at);
		let rng = match options.rng_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};

		Self {
			schema,
			executor,
			options,
			started_at,
			timestamp,
			schemas: IndexMap::new(),
			pending: PendingBatch::new(),
			coverage: ColumnCoverage::new(),
			rng,
			sink: Box::new(StdoutSink),
		}
	}

	/// Sends report lines to `sink` instead of stdout.
	pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
		self.sink = Box::new(sink);
		self
	}

	/// Options this run was started with.
	pub fn options(&self) -> &SeederOptions {
		&self.options
	}

	/// Instant injected into `created_at`/`updated_at`.
	pub fn started_at(&self) -> DateTime<Utc> {
		self.started_at
	}

	/// Value injected into `created_at`/`updated_at`.
	pub fn timestamp(&self) -> &Value {
		&self.timestamp
	}

	/// The run RNG, for driving [`fake`](crate::fake) generators.
	pub fn rng(&mut self) -> &mut StdRng {
		&mut self.rng
	}

	/// Draws one key from `entries` using the run RNG.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::WeightedSample`] for empty or zero-weight input.
	pub fn pick_weighted<K: Clone>(&mut self, entries: &[(K, u64)]) -> SeedingResult<K> {
		let choice = WeightedChoice::new(entries.iter().cloned())?;
		Ok(choice.pick(&mut self.rng).clone())
	}

	/// Rows recorded so far.
	pub fn pending(&self) -> &PendingBatch {
		&self.pending
	}

	/// Columns populated so far.
	pub fn coverage(&self) -> &ColumnCoverage {
		&self.coverage
	}

	/// Records one row for `table`.
	///
	/// `created_at` and `updated_at` are appended with the run timestamp when
	/// the table has them and the row does not.
	///
	/// # Errors
	///
	/// - [`SeedingError::InvalidTable`] for an empty table name
	/// - [`SeedingError::EmptyRow`] for a row without columns
	/// - [`SeedingError::SchemaLookup`] when the table schema is unavailable
	pub async fn insert(&mut self, table: &str, mut row: Row) -> SeedingResult<()> {
		validate_table(table)?;
		if row.is_empty() {
			return Err(SeedingError::EmptyRow(table.to_string()));
		}

		let injected = self
			.missing_timestamps(table, |name| row.contains_key(name))
			.await?;
		for column in injected {
			row.insert(column.to_string(), self.timestamp.clone());
		}

		let (columns, values): (Vec<String>, Vec<Value>) = row.into_iter().unzip();
		self.coverage.merge(table, &columns);
		self.pending.push(table, &columns, values);
		Ok(())
	}

	/// Records pre-built rows sharing one column list.
	///
	/// Timestamp columns are appended to `columns` once and the run
	/// timestamp is appended to every row of the call.
	///
	/// # Errors
	///
	/// - [`SeedingError::InvalidTable`] for an empty table name
	/// - [`SeedingError::EmptyRow`] for an empty column list
	/// - [`SeedingError::ArityMismatch`] when a row does not match `columns`
	/// - [`SeedingError::SchemaLookup`] when the table schema is unavailable
	pub async fn batch_insert<C, S>(
		&mut self,
		table: &str,
		columns: C,
		mut rows: Vec<Vec<Value>>,
	) -> SeedingResult<()>
	where
		C: IntoIterator<Item = S>,
		S: Into<String>,
	{
		validate_table(table)?;
		let mut columns: Vec<String> = columns.into_iter().map(Into::into).collect();
		if columns.is_empty() {
			return Err(SeedingError::EmptyRow(table.to_string()));
		}
		if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
			return Err(SeedingError::ArityMismatch {
				table: table.to_string(),
				expected: columns.len(),
				actual: row.len(),
			});
		}

		let injected = self
			.missing_timestamps(table, |name| columns.iter().any(|column| column == name))
			.await?;
		for column in injected {
			columns.push(column.to_string());
			for row in &mut rows {
				row.push(self.timestamp.clone());
			}
		}

		self.coverage.merge(table, &columns);
		self.pending.extend(table, &columns, rows);
		Ok(())
	}

	/// Timestamp columns `table` declares that `supplied` does not cover.
	async fn missing_timestamps(
		&mut self,
		table: &str,
		supplied: impl Fn(&str) -> bool,
	) -> SeedingResult<Vec<&'static str>> {
		let schema = self.table_schema(table).await?;
		Ok([CREATED_AT, UPDATED_AT]
			.into_iter()
			.filter(|column| schema.has_column(column) && !supplied(*column))
			.collect())
	}

	async fn table_schema(&mut self, table: &str) -> SeedingResult<&TableSchema> {
		if !self.schemas.contains_key(table) {
			let schema = self.schema.table_schema(table).await?;
			tracing::debug!(table, columns = schema.columns.len(), "loaded table schema");
			self.schemas.insert(table.to_string(), schema);
		}
		self.schemas
			.get(table)
			.ok_or_else(|| SeedingError::schema_lookup(table, "schema cache miss"))
	}

	/// Truncates, flushes and audits. Consumes the run.
	///
	/// # Errors
	///
	/// The first error from the executor is returned unchanged and the
	/// remaining steps are skipped.
	pub async fn finish(mut self) -> SeedingResult<SeedReport> {
		let truncated = !self.options.skip_truncate_tables && !self.pending.is_empty();
		if truncated {
			self.truncate_pending().await?;
		}

		let pending = std::mem::take(&mut self.pending);
		let mut tables = Vec::new();
		for (table, groups) in pending.into_tables() {
			let mut summary = TableSummary {
				table,
				rows: 0,
				statements: 0,
			};
			for group in groups.into_values() {
				tracing::debug!(
					table = %summary.table,
					columns = ?group.columns,
					rows = group.rows.len(),
					"batch insert"
				);
				self.executor
					.batch_insert(&summary.table, &group.columns, &group.rows)
					.await?;
				summary.rows += group.rows.len();
				summary.statements += 1;
			}
			tracing::info!(table = %summary.table, rows = summary.rows, "seeded table");
			self.emit(&summary.line());
			tables.push(summary);
		}

		let missing = self.audit().await;
		for line in missing.lines() {
			self.emit(&line);
		}

		Ok(SeedReport {
			truncated,
			tables,
			missing,
		})
	}

	async fn truncate_pending(&self) -> SeedingResult<()> {
		tracing::debug!("disabling constraint checks");
		self.executor.set_constraint_checks(false).await?;
		for table in self.pending.tables() {
			tracing::debug!(table, "truncate");
			self.executor.truncate_table(table).await?;
		}
		tracing::debug!("enabling constraint checks");
		self.executor.set_constraint_checks(true).await
	}

	/// Runs the missing-column audit against freshly read schemas. Never fails.
	async fn audit(&self) -> MissingColumnsReport {
		let mut schemas = IndexMap::new();
		for (table, _) in self.coverage.iter() {
			match self.schema.table_schema(table).await {
				Ok(schema) => {
					schemas.insert(table.to_string(), schema);
				}
				Err(err) => {
					tracing::warn!(table, error = %err, "skipping missing-column audit");
				}
			}
		}

		let report = MissingColumnsReport::from_coverage(&self.coverage, &schemas);
		for (table, columns) in report.iter() {
			let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
			tracing::warn!(table, columns = ?names, "columns never populated");
		}
		report
	}

	fn emit(&mut self, line: &str) {
		if self.options.verbosity > 0 {
			self.sink.write_line(line);
		}
	}
}

fn validate_table(table: &str) -> SeedingResult<()> {
	if table.trim().is_empty() {
		return Err(SeedingError::InvalidTable(table.to_string()));
	}
	Ok(())
}
