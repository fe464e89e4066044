//! Table schema metadata and the provider trait that supplies it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SeedingResult;

/// Column name that receives the run timestamp on creation.
pub const CREATED_AT: &str = "created_at";

/// Column name that receives the run timestamp on update.
pub const UPDATED_AT: &str = "updated_at";

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
	/// Column name
	pub name: String,
	/// Database type as reported by the backend (e.g. `varchar(255)`)
	pub db_type: String,
	/// Whether the database fills this column on its own
	pub auto_increment: bool,
}

impl ColumnSchema {
	/// Creates a regular column.
	pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			db_type: db_type.into(),
			auto_increment: false,
		}
	}

	/// Creates an auto-increment column.
	pub fn auto_increment(name: impl Into<String>, db_type: impl Into<String>) -> Self {
		Self {
			auto_increment: true,
			..Self::new(name, db_type)
		}
	}
}

/// Ordered column definitions of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
	/// Table name
	pub name: String,
	/// Columns in declaration order
	pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
	/// Creates a table schema from its columns.
	pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
		Self {
			name: name.into(),
			columns,
		}
	}

	/// Returns true if the table declares a column with this name.
	pub fn has_column(&self, name: &str) -> bool {
		self.columns.iter().any(|column| column.name == name)
	}

	/// Returns the column names in declaration order.
	pub fn column_names(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().map(|column| column.name.as_str())
	}
}

/// Source of table metadata.
///
/// Implemented by the database backends and by
/// [`StaticSchema`](crate::memory::StaticSchema). The provider is queried
/// before the first insert into a table and may be queried again by the
/// missing-column audit.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
	/// Returns the schema of `table`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::SchemaLookup`](crate::SeedingError::SchemaLookup)
	/// when the table does not exist or its metadata cannot be read.
	async fn table_schema(&self, table: &str) -> SeedingResult<TableSchema>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_table_schema_columns() {
		let schema = TableSchema::new(
			"users",
			vec![
				ColumnSchema::auto_increment("id", "integer"),
				ColumnSchema::new("name", "varchar(255)"),
				ColumnSchema::new(CREATED_AT, "datetime"),
			],
		);

		assert!(schema.has_column("name"));
		assert!(schema.has_column(CREATED_AT));
		assert!(!schema.has_column(UPDATED_AT));
		assert_eq!(
			schema.column_names().collect::<Vec<_>>(),
			vec!["id", "name", "created_at"]
		);
		assert!(schema.columns[0].auto_increment);
		assert!(!schema.columns[1].auto_increment);
	}
}
