//! PostgreSQL backend.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Row};
use tableseed_seeding::{SchemaProvider, SeedingError, SeedingResult, StatementExecutor, TableSchema};
use tokio::sync::Mutex;

use crate::columns::{PostgresColumn, postgres_column};
use crate::dialect::Dialect;

const COLUMNS_SQL: &str = "SELECT column_name::text AS name, data_type::text AS db_type, \
	column_default::text AS default_value, is_identity::text AS identity \
	FROM information_schema.columns \
	WHERE table_schema = current_schema() AND table_name = $1 \
	ORDER BY ordinal_position";

/// PostgreSQL database used as both schema provider and statement executor.
///
/// Constraint checks are toggled through `session_replication_role`, which
/// needs a superuser (or a role allowed to set it) and only affects the
/// current session. Every statement goes through one connection.
pub struct PostgresDatabase {
	connection: Mutex<PgConnection>,
}

impl PostgresDatabase {
	/// Opens a connection to `url`.
	///
	/// # Examples
	///
	/// ```no_run
	/// use tableseed_db::PostgresDatabase;
	///
	/// # async fn example() -> Result<(), sqlx::Error> {
	/// let database = PostgresDatabase::connect("postgres://localhost/app").await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
		let connection = PgConnectOptions::from_str(url)?.connect().await?;
		Ok(Self::from_connection(connection))
	}

	/// Wraps an open connection.
	pub fn from_connection(connection: PgConnection) -> Self {
		Self {
			connection: Mutex::new(connection),
		}
	}

	/// Executes raw SQL, which may hold several statements.
	pub async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
		let mut connection = self.connection.lock().await;
		let result = sqlx::raw_sql(sql).execute(&mut *connection).await?;
		Ok(result.rows_affected())
	}

	/// Counts the rows of `table`.
	pub async fn count_rows(&self, table: &str) -> Result<i64, sqlx::Error> {
		let sql = format!(
			"SELECT COUNT(*) FROM {}",
			Dialect::Postgres.quote_identifier(table)
		);
		let mut connection = self.connection.lock().await;
		let row = sqlx::query(&sql).fetch_one(&mut *connection).await?;
		row.try_get(0)
	}
}

#[async_trait]
impl SchemaProvider for PostgresDatabase {
	async fn table_schema(&self, table: &str) -> SeedingResult<TableSchema> {
		let rows = {
			let mut connection = self.connection.lock().await;
			sqlx::query(COLUMNS_SQL)
				.bind(table)
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
				Ok(postgres_column(PostgresColumn {
					name: row.try_get("name")?,
					db_type: row.try_get("db_type")?,
					default_value: row.try_get("default_value")?,
					identity: row.try_get("identity")?,
				}))
			})
			.collect::<Result<Vec<_>, sqlx::Error>>()
			.map_err(|err| SeedingError::schema_lookup(table, err))?;

		Ok(TableSchema::new(table, columns))
	}
}

#[async_trait]
impl StatementExecutor for PostgresDatabase {
	async fn set_constraint_checks(&self, enabled: bool) -> SeedingResult<()> {
		let sql = Dialect::Postgres.constraint_checks_sql(enabled);
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
		let sql = Dialect::Postgres.truncate_sql(table);
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
		let sql = Dialect::Postgres.batch_insert_sql(table, columns, rows)?;
		let inserted = self
			.execute(&sql)
			.await
			.map_err(|err| SeedingError::insert(table, err))?;
		tracing::debug!(table, rows = inserted, "batch inserted");
		Ok(())
	}
}
