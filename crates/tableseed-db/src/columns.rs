//! Column metadata as reported by each database.

use tableseed_seeding::ColumnSchema;

/// One row of SQLite's `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteColumn {
	/// Column name
	pub name: String,
	/// Declared type, possibly empty
	pub db_type: String,
	/// 1-based position in the primary key, 0 when not part of it
	pub pk: i64,
}

/// Converts `PRAGMA table_info` rows.
///
/// Only a lone `INTEGER` primary key aliases the rowid and is filled by the
/// database; composite keys and other types are not.
pub fn sqlite_columns(columns: Vec<SqliteColumn>) -> Vec<ColumnSchema> {
	let primary_keys = columns.iter().filter(|column| column.pk > 0).count();
	columns
		.into_iter()
		.map(|column| {
			let rowid = column.pk > 0 && primary_keys == 1;
			if rowid && column.db_type.eq_ignore_ascii_case("integer") {
				ColumnSchema::auto_increment(column.name, column.db_type)
			} else {
				ColumnSchema::new(column.name, column.db_type)
			}
		})
		.collect()
}

/// One row of PostgreSQL's `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresColumn {
	/// Column name
	pub name: String,
	/// `data_type`
	pub db_type: String,
	/// `column_default`
	pub default_value: Option<String>,
	/// `is_identity` (`YES`/`NO`)
	pub identity: Option<String>,
}

/// Converts an `information_schema.columns` row.
///
/// `serial` columns (a `nextval(...)` default) and identity columns are
/// filled by the database.
pub fn postgres_column(column: PostgresColumn) -> ColumnSchema {
	let serial = column
		.default_value
		.as_deref()
		.is_some_and(|default| default.starts_with("nextval("));
	let identity = column.identity.as_deref() == Some("YES");
	if serial || identity {
		ColumnSchema::auto_increment(column.name, column.db_type)
	} else {
		ColumnSchema::new(column.name, column.db_type)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn sqlite(name: &str, db_type: &str, pk: i64) -> SqliteColumn {
		SqliteColumn {
			name: name.to_string(),
			db_type: db_type.to_string(),
			pk,
		}
	}

	#[rstest]
	#[case(Some("nextval('users_id_seq'::regclass)"), Some("NO"), true)]
	#[case(None, Some("YES"), true)]
	#[case(Some("now()"), Some("NO"), false)]
	#[case(Some("'nextval('::text"), Some("NO"), false)]
	#[case(None, None, false)]
	fn test_postgres_auto_increment(
		#[case] default_value: Option<&str>,
		#[case] identity: Option<&str>,
		#[case] expected: bool,
	) {
		let column = postgres_column(PostgresColumn {
			name: "id".to_string(),
			db_type: "integer".to_string(),
			default_value: default_value.map(str::to_string),
			identity: identity.map(str::to_string),
		});

		assert_eq!(column.name, "id");
		assert_eq!(column.db_type, "integer");
		assert_eq!(column.auto_increment, expected);
	}

	#[rstest]
	fn test_sqlite_lone_integer_key_is_auto_increment() {
		let columns = sqlite_columns(vec![sqlite("id", "INTEGER", 1), sqlite("name", "TEXT", 0)]);

		assert!(columns[0].auto_increment);
		assert!(!columns[1].auto_increment);
	}

	#[rstest]
	#[case(vec![sqlite("a", "INTEGER", 1), sqlite("b", "INTEGER", 2)])]
	#[case(vec![sqlite("code", "TEXT", 1)])]
	#[case(vec![sqlite("id", "BIGINT", 1)])]
	fn test_sqlite_other_keys_are_supplied(#[case] columns: Vec<SqliteColumn>) {
		assert!(sqlite_columns(columns).iter().all(|column| !column.auto_increment));
	}
}
