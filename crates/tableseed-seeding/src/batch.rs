//! Pending batches and column coverage accumulated by a seed run.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Rows sharing one exact, ordered column list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureGroup {
	/// Column list every row of the group follows.
	pub columns: Vec<String>,
	/// Row tuples in submission order.
	pub rows: Vec<Vec<Value>>,
}

/// Rows waiting to be flushed, per table and per column signature.
///
/// Groups are keyed by the exact column list, so grouping is order-sensitive:
/// `name,email` and `email,name` are two groups and two insert statements.
/// Tables and groups iterate in the order they were first touched.
#[derive(Debug, Clone, Default)]
pub struct PendingBatch {
	tables: IndexMap<String, IndexMap<Vec<String>, SignatureGroup>>,
}

impl PendingBatch {
	/// Creates an empty batch.
	pub fn new() -> Self {
		Self::default()
	}

	/// Renders a column list as its comma-joined signature, for display.
	pub fn signature(columns: &[String]) -> String {
		columns.join(",")
	}

	/// Appends one row to the group of `columns`.
	///
	/// Callers guarantee that `values` has one entry per column.
	pub fn push(&mut self, table: &str, columns: &[String], values: Vec<Value>) {
		let group = self.group_mut(table, columns);
		debug_assert_eq!(group.columns.len(), values.len());
		group.rows.push(values);
	}

	/// Appends several rows to the group of `columns`.
	pub fn extend(&mut self, table: &str, columns: &[String], rows: Vec<Vec<Value>>) {
		if rows.is_empty() {
			return;
		}
		self.group_mut(table, columns).rows.extend(rows);
	}

	fn group_mut(&mut self, table: &str, columns: &[String]) -> &mut SignatureGroup {
		self.tables
			.entry(table.to_string())
			.or_default()
			.entry(columns.to_vec())
			.or_insert_with(|| SignatureGroup {
				columns: columns.to_vec(),
				rows: Vec::new(),
			})
	}

	/// Returns the tables with at least one pending group, first-touched first.
	pub fn tables(&self) -> impl Iterator<Item = &str> {
		self.tables.keys().map(String::as_str)
	}

	/// Returns the groups of `table` keyed by column list.
	pub fn groups(&self, table: &str) -> Option<&IndexMap<Vec<String>, SignatureGroup>> {
		self.tables.get(table)
	}

	/// Returns the number of pending rows for `table` across all groups.
	pub fn row_count(&self, table: &str) -> usize {
		self.tables
			.get(table)
			.map(|groups| groups.values().map(|group| group.rows.len()).sum())
			.unwrap_or(0)
	}

	/// Returns true if nothing is pending.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Consumes the batch, yielding `(table, groups)` in first-touched order.
	pub fn into_tables(
		self,
	) -> impl Iterator<Item = (String, IndexMap<Vec<String>, SignatureGroup>)> {
		self.tables.into_iter()
	}
}

/// Columns that received a value at least once, per table.
///
/// Coverage only grows during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnCoverage {
	tables: IndexMap<String, IndexSet<String>>,
}

impl ColumnCoverage {
	/// Creates empty coverage.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `columns` as populated for `table`.
	///
	/// Already known columns keep their position; new ones are appended.
	pub fn merge<'a>(&mut self, table: &str, columns: impl IntoIterator<Item = &'a String>) {
		self.tables
			.entry(table.to_string())
			.or_default()
			.extend(columns.into_iter().cloned());
	}

	/// Returns true if `column` of `table` was populated.
	pub fn contains(&self, table: &str, column: &str) -> bool {
		self.tables
			.get(table)
			.is_some_and(|columns| columns.contains(column))
	}

	/// Returns the populated columns of `table`.
	pub fn columns(&self, table: &str) -> Option<&IndexSet<String>> {
		self.tables.get(table)
	}

	/// Iterates over `(table, columns)` in first-touched order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
		self.tables
			.iter()
			.map(|(table, columns)| (table.as_str(), columns))
	}

	/// Returns true if no table was touched.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn cols(names: &[&str]) -> Vec<String> {
		names.iter().map(|name| name.to_string()).collect()
	}

	#[rstest]
	fn test_rows_with_same_columns_share_a_group() {
		let mut batch = PendingBatch::new();
		let columns = cols(&["name", "email"]);

		batch.push("users", &columns, vec![json!("Bob"), json!("bob@example.com")]);
		batch.push("users", &columns, vec![json!("Ann"), json!("ann@example.com")]);

		let groups = batch.groups("users").unwrap();
		assert_eq!(groups.len(), 1);
		let group = &groups[&columns];
		assert_eq!(group.columns, columns);
		assert_eq!(group.rows[0][0], json!("Bob"));
		assert_eq!(group.rows[1][0], json!("Ann"));
		assert_eq!(batch.row_count("users"), 2);
	}

	#[rstest]
	fn test_column_order_splits_groups() {
		let mut batch = PendingBatch::new();

		batch.push("users", &cols(&["name", "email"]), vec![json!("a"), json!("b")]);
		batch.push("users", &cols(&["email", "name"]), vec![json!("b"), json!("a")]);

		let groups = batch.groups("users").unwrap();
		let signatures: Vec<String> = groups
			.keys()
			.map(|key| PendingBatch::signature(key))
			.collect();
		assert_eq!(signatures, ["name,email", "email,name"]);
		assert_eq!(batch.row_count("users"), 2);
	}

	#[rstest]
	fn test_comma_in_column_name_does_not_merge_groups() {
		let mut batch = PendingBatch::new();

		batch.push("pairs", &cols(&["a,b"]), vec![json!(1)]);
		batch.push("pairs", &cols(&["a", "b"]), vec![json!(1), json!(2)]);

		let groups = batch.groups("pairs").unwrap();
		assert_eq!(groups.len(), 2);
		for group in groups.values() {
			assert!(group.rows.iter().all(|row| row.len() == group.columns.len()));
		}
		assert_eq!(groups[&cols(&["a", "b"])].rows, vec![vec![json!(1), json!(2)]]);
	}

	#[rstest]
	fn test_tables_in_first_touched_order() {
		let mut batch = PendingBatch::new();
		let columns = cols(&["id"]);

		batch.push("posts", &columns, vec![json!(1)]);
		batch.push("users", &columns, vec![json!(1)]);
		batch.push("posts", &columns, vec![json!(2)]);

		assert_eq!(batch.tables().collect::<Vec<_>>(), ["posts", "users"]);
	}

	#[rstest]
	fn test_extend_with_no_rows_creates_nothing() {
		let mut batch = PendingBatch::new();
		batch.extend("users", &cols(&["name"]), Vec::new());

		assert!(batch.is_empty());
		assert_eq!(batch.row_count("users"), 0);
	}

	#[rstest]
	fn test_coverage_merge_keeps_first_seen_order() {
		let mut coverage = ColumnCoverage::new();

		coverage.merge("users", &cols(&["name", "created_at"]));
		coverage.merge("users", &cols(&["email", "name"]));

		let columns: Vec<_> = coverage.columns("users").unwrap().iter().collect();
		assert_eq!(columns, ["name", "created_at", "email"]);
		assert!(coverage.contains("users", "email"));
		assert!(!coverage.contains("users", "updated_at"));
		assert!(!coverage.contains("posts", "name"));
	}
}
