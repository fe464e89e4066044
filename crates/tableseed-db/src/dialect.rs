//! SQL generation for the supported databases.

use sea_query::{Alias, Expr, PostgresQueryBuilder, Query, SqliteQueryBuilder, Value};
use serde_json::Value as JsonValue;
use tableseed_seeding::{SeedingError, SeedingResult};

/// Database dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
	/// SQLite
	Sqlite,
	/// PostgreSQL
	Postgres,
}

impl Dialect {
	/// Detects the dialect from a connection URL.
	///
	/// # Examples
	///
	/// ```
	/// use tableseed_db::Dialect;
	///
	/// assert_eq!(Dialect::from_url("sqlite::memory:"), Some(Dialect::Sqlite));
	/// assert_eq!(Dialect::from_url("postgres://localhost/app"), Some(Dialect::Postgres));
	/// assert_eq!(Dialect::from_url("mysql://localhost/app"), None);
	/// ```
	pub fn from_url(url: &str) -> Option<Self> {
		if url.starts_with("sqlite:") {
			Some(Self::Sqlite)
		} else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
			Some(Self::Postgres)
		} else {
			None
		}
	}

	/// Quotes an identifier with double quotes.
	pub fn quote_identifier(self, name: &str) -> String {
		format!("\"{}\"", name.replace('"', "\"\""))
	}

	/// Statement that enables or disables foreign-key checks for the session.
	///
	/// PostgreSQL has no per-session switch for foreign keys; replica mode
	/// skips the triggers enforcing them and requires superuser rights.
	pub fn constraint_checks_sql(self, enabled: bool) -> &'static str {
		match (self, enabled) {
			(Self::Sqlite, true) => "PRAGMA foreign_keys = ON",
			(Self::Sqlite, false) => "PRAGMA foreign_keys = OFF",
			(Self::Postgres, true) => "SET session_replication_role = DEFAULT",
			(Self::Postgres, false) => "SET session_replication_role = replica",
		}
	}

	/// Statement that removes every row of `table`.
	pub fn truncate_sql(self, table: &str) -> String {
		format!("DELETE FROM {}", self.quote_identifier(table))
	}

	/// Builds one multi-row `INSERT` with inlined values.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::Insert`] when `rows` is empty or a row does
	/// not have one value per column.
	pub fn batch_insert_sql(
		self,
		table: &str,
		columns: &[String],
		rows: &[Vec<JsonValue>],
	) -> SeedingResult<String> {
		if rows.is_empty() {
			return Err(SeedingError::insert(table, "no rows to insert"));
		}

		let mut stmt = Query::insert().into_table(Alias::new(table)).to_owned();
		stmt.columns(columns.iter().map(Alias::new));
		for row in rows {
			let values: Vec<Expr> = row
				.iter()
				.map(|value| Expr::val(json_to_sea_value(value)))
				.collect();
			stmt.values(values)
				.map_err(|err| SeedingError::insert(table, err))?;
		}

		Ok(match self {
			Self::Sqlite => stmt.to_string(SqliteQueryBuilder),
			Self::Postgres => stmt.to_string(PostgresQueryBuilder),
		})
	}
}

/// Converts a row value to a SeaQuery value.
///
/// Arrays and objects are stored as their JSON text.
fn json_to_sea_value(value: &JsonValue) -> Value {
	match value {
		// BigInt(None) renders as a plain NULL in every dialect
		JsonValue::Null => Value::BigInt(None),
		JsonValue::Bool(b) => Value::Bool(Some(*b)),
		JsonValue::Number(n) => {
			if let Some(i) = n.as_i64() {
				Value::BigInt(Some(i))
			} else if let Some(u) = n.as_u64() {
				Value::BigUnsigned(Some(u))
			} else {
				Value::Double(n.as_f64())
			}
		}
		JsonValue::String(s) => Value::String(Some(s.clone())),
		JsonValue::Array(_) | JsonValue::Object(_) => Value::String(Some(value.to_string())),
	}
}
