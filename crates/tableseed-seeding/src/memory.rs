//! Database-free schema provider and executor.
//!
//! [`StaticSchema`] serves table definitions declared up front and
//! [`RecordingExecutor`] records statements instead of running them. Together
//! they allow dry runs and tests without a database.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{SeedingError, SeedingResult};
use crate::executor::StatementExecutor;
use crate::schema::{SchemaProvider, TableSchema};

/// Schema provider backed by a fixed set of tables.
#[derive(Debug, Default)]
pub struct StaticSchema {
	tables: RwLock<IndexMap<String, TableSchema>>,
}

impl StaticSchema {
	/// Creates a provider without tables.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a table, replacing any previous definition with the same name.
	pub fn with_table(self, schema: TableSchema) -> Self {
		self.register(schema);
		self
	}

	/// Adds a table through a shared reference.
	pub fn register(&self, schema: TableSchema) {
		self.tables.write().insert(schema.name.clone(), schema);
	}

	/// Removes a table.
	pub fn unregister(&self, table: &str) -> Option<TableSchema> {
		self.tables.write().shift_remove(table)
	}
}

#[async_trait]
impl SchemaProvider for StaticSchema {
	async fn table_schema(&self, table: &str) -> SeedingResult<TableSchema> {
		self.tables
			.read()
			.get(table)
			.cloned()
			.ok_or_else(|| SeedingError::schema_lookup(table, "table does not exist"))
	}
}

/// A statement seen by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// Constraint checks toggled.
	ConstraintChecks(bool),
	/// Table truncated.
	Truncate(String),
	/// Multi-row insert.
	BatchInsert {
		/// Target table
		table: String,
		/// Column list
		columns: Vec<String>,
		/// Row tuples
		rows: Vec<Vec<Value>>,
	},
}

/// Executor that records statements in order.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
	statements: RwLock<Vec<Statement>>,
	failing_table: Option<String>,
}

impl RecordingExecutor {
	/// Creates an executor that accepts every statement.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes truncates and inserts touching `table` fail.
	pub fn failing_on(mut self, table: impl Into<String>) -> Self {
		self.failing_table = Some(table.into());
		self
	}

	/// Returns the recorded statements.
	pub fn statements(&self) -> Vec<Statement> {
		self.statements.read().clone()
	}

	/// Returns only the recorded batch inserts.
	pub fn inserts(&self) -> Vec<Statement> {
		self.statements
			.read()
			.iter()
			.filter(|statement| matches!(statement, Statement::BatchInsert { .. }))
			.cloned()
			.collect()
	}

	fn fails_on(&self, table: &str) -> bool {
		self.failing_table.as_deref() == Some(table)
	}
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
	async fn set_constraint_checks(&self, enabled: bool) -> SeedingResult<()> {
		self.statements
			.write()
			.push(Statement::ConstraintChecks(enabled));
		Ok(())
	}

	async fn truncate_table(&self, table: &str) -> SeedingResult<()> {
		if self.fails_on(table) {
			return Err(SeedingError::truncate(table, "rejected by executor"));
		}
		self.statements
			.write()
			.push(Statement::Truncate(table.to_string()));
		Ok(())
	}

	async fn batch_insert(
		&self,
		table: &str,
		columns: &[String],
		rows: &[Vec<Value>],
	) -> SeedingResult<()> {
		if self.fails_on(table) {
			return Err(SeedingError::insert(table, "rejected by executor"));
		}
		self.statements.write().push(Statement::BatchInsert {
			table: table.to_string(),
			columns: columns.to_vec(),
			rows: rows.to_vec(),
		});
		Ok(())
	}
}
