//! Missing-column audit.
//!
//! After a run is flushed, every schema column that is neither
//! auto-increment nor covered by an insert is reported. The audit is
//! advisory: it never fails a run.

use std::fmt;

use indexmap::IndexMap;

use crate::batch::ColumnCoverage;
use crate::schema::TableSchema;

const BANNER_WIDTH: usize = 70;
const LINE_PREFIX: &str = "    > ";

/// A schema column that never received a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn {
	/// Column name
	pub name: String,
	/// Database type of the column
	pub db_type: String,
}

/// Missing columns grouped by table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingColumnsReport {
	tables: IndexMap<String, Vec<MissingColumn>>,
}

impl MissingColumnsReport {
	/// Compares `coverage` against `schemas`.
	///
	/// Tables present in `coverage` but absent from `schemas` are skipped.
	pub fn from_coverage(
		coverage: &ColumnCoverage,
		schemas: &IndexMap<String, TableSchema>,
	) -> Self {
		let mut report = Self::default();

		for (table, _) in coverage.iter() {
			let Some(schema) = schemas.get(table) else {
				continue;
			};

			let missing: Vec<MissingColumn> = schema
				.columns
				.iter()
				.filter(|column| !column.auto_increment && !coverage.contains(table, &column.name))
				.map(|column| MissingColumn {
					name: column.name.clone(),
					db_type: column.db_type.clone(),
				})
				.collect();

			if !missing.is_empty() {
				report.tables.insert(table.to_string(), missing);
			}
		}

		report
	}

	/// Returns true if every audited column was covered.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	/// Returns the missing columns of `table`.
	pub fn table(&self, table: &str) -> Option<&[MissingColumn]> {
		self.tables.get(table).map(Vec::as_slice)
	}

	/// Iterates over `(table, missing columns)`.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[MissingColumn])> {
		self.tables
			.iter()
			.map(|(table, columns)| (table.as_str(), columns.as_slice()))
	}

	/// Renders the report as banner lines. Empty when nothing is missing.
	pub fn lines(&self) -> Vec<String> {
		if self.is_empty() {
			return Vec::new();
		}

		let inner = BANNER_WIDTH - 1;
		let mut lines = vec![format!(
			"{LINE_PREFIX}{:#^width$}",
			" MISSING COLUMNS ",
			width = BANNER_WIDTH
		)];
		for (table, columns) in self.iter() {
			lines.push(format!(
				"{LINE_PREFIX}{:<inner$}#",
				format!("# TABLE: {table}")
			));
			for column in columns {
				lines.push(format!(
					"{LINE_PREFIX}{:<inner$}#",
					format!("#    {} => {}", column.name, column.db_type)
				));
			}
		}
		lines.push(format!("{LINE_PREFIX}{}", "#".repeat(BANNER_WIDTH)));
		lines
	}
}

impl fmt::Display for MissingColumnsReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for line in self.lines() {
			writeln!(f, "{line}")?;
		}
		Ok(())
	}
}
