//! SQLite backend.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Row};
use tableseed_seeding::{SchemaProvider, SeedingError, SeedingResult, StatementExecutor, TableSchema};
use tokio::sync::Mutex;

use crate::columns::{SqliteColumn, sqlite_columns};
use crate::dialect::Dialect;

/// SQLite database used as both schema provider and statement executor.
///
/// `PRAGMA foreign_keys` only affects the connection it runs on, so every
/// statement goes through one connection.
pub struct SqliteDatabase {
	connection: Mutex<SqliteConnection>,
}

impl SqliteDatabase {
	/// Opens `url`, creating the database file when it does not exist.
	///
	/// # Examples
	///
	/// ```no_run
	/// use tableseed_db::SqliteDatabase;
	///
	/// # async fn example() -> Result<(), sqlx::Error> {
	/// let database = SqliteDatabase::connect("sqlite://seed.db").await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
		let connection = SqliteConnectOptions::from_str(url)?
			.create_if_missing(true)
			.connect()
			.await?;
		Ok(Self::from_connection(connection))
	}

	/// Wraps an open connection.
	pub fn from_connection(connection: SqliteConnection) -> Self {
		Self {
			connection: Mutex::new(connection),
		}
	}

	/// Executes raw SQL, which may hold several statements.
	pub async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
		let mut connection = self.connection.lock().await;
		let result = sqlx::Executor::execute(&mut *connection, sqlx::raw_sql(sql)).await?;
		Ok(result.rows_affected())
	}

	/// Counts the rows of `table`.
	pub async fn count_rows(&self, table: &str) -> Result<i64, sqlx::Error> {
		let sql = format!(
			"SELECT COUNT(*) FROM {}",
			Dialect::Sqlite.quote_identifier(table)
		);
		let mut connection = self.connection.lock().await;
		let row = sqlx::query(&sql).fetch_one(&mut *connection).await?;
		row.try_get(0)
	}
}

#[async_trait]
impl SchemaProvider for SqliteDatabase {
	async fn table_schema(&self, table: &str) -> SeedingResult<TableSchema> {
		let sql = format!(
			"PRAGMA table_info({})",
			Dialect::Sqlite.quote_identifier(table)
		);
		let rows = {
			let mut connection = self.connection.lock().await;
			sqlx::query(&sql)
				.fetch_all(&mut *connection)
				.await
				.map_err(|err| SeedingError::schema_lookup(table, err))?
		};
		if rows.is_empty() {
			return Err(SeedingError::schema_lookup(table, "table does not exist"));
		}

		let columns = rows
			.iter()
			.map(|row| {
				Ok(SqliteColumn {
					name: row.try_get("name")?,
					db_type: row.try_get("type")?,
					pk: row.try_get("pk")?,
				})
			})
			.collect::<Result<Vec<_>, sqlx::Error>>()
			.map_err(|err| SeedingError::schema_lookup(table, err))?;

		Ok(TableSchema::new(table, sqlite_columns(columns)))
	}
}

#[async_trait]
impl StatementExecutor for SqliteDatabase {
	async fn set_constraint_checks(&self, enabled: bool) -> SeedingResult<()> {
		let sql = Dialect::Sqlite.constraint_checks_sql(enabled);
		tracing::debug!(sql, "toggling constraint checks");
		self.execute(sql)
			.await
			.map(|_| ())
			.map_err(|err| SeedingError::ConstraintToggle {
				enabled,
				message: err.to_string(),
			})
	}

	async fn truncate_table(&self, table: &str) -> SeedingResult<()> {
		let sql = Dialect::Sqlite.truncate_sql(table);
		tracing::debug!(sql = %sql, "truncating table");
		self.execute(&sql)
			.await
			.map(|_| ())
			.map_err(|err| SeedingError::truncate(table, err))
	}

	async fn batch_insert(
		&self,
		table: &str,
		columns: &[String],
		rows: &[Vec<Value>],
	) -> SeedingResult<()> {
		let sql = Dialect::Sqlite.batch_insert_sql(table, columns, rows)?;
		let inserted = self
			.execute(&sql)
			.await
			.map_err(|err| SeedingError::insert(table, err))?;
		tracing::debug!(table, rows = inserted, "batch inserted");
		Ok(())
	}
}
