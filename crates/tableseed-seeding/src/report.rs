//! Run results and the line sink they are printed to.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::audit::MissingColumnsReport;

/// Line-oriented output for row counts and audit warnings.
///
/// A run holds its sink across awaits, so sinks must be `Sync` for the run
/// futures to be `Send`.
pub trait ReportSink: Send + Sync {
	/// Writes one line.
	fn write_line(&mut self, line: &str);
}

/// Prints every line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
	fn write_line(&mut self, line: &str) {
		println!("{}", line);
	}
}

/// Collects lines in memory.
///
/// Clones share the same buffer, so a clone can be handed to a run and the
/// original inspected afterwards.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
	lines: Arc<Mutex<Vec<String>>>,
}

impl BufferSink {
	/// Creates an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the collected lines.
	pub fn lines(&self) -> Vec<String> {
		self.lines.lock().clone()
	}
}

impl ReportSink for BufferSink {
	fn write_line(&mut self, line: &str) {
		self.lines.lock().push(line.to_string());
	}
}

/// Rows inserted into one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
	/// Table name
	pub table: String,
	/// Rows inserted, summed over every column signature
	pub rows: usize,
	/// Number of batch-insert statements issued
	pub statements: usize,
}

impl TableSummary {
	/// Human-readable summary line.
	pub fn line(&self) -> String {
		format!(
			"      {} {} inserted in {}",
			self.rows,
			if self.rows == 1 { "row" } else { "rows" },
			self.table
		)
	}
}

/// Outcome of a finished seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
	/// Whether the seeded tables were truncated first.
	pub truncated: bool,
	/// Per-table counts, in flush order.
	pub tables: Vec<TableSummary>,
	/// Columns never populated.
	pub missing: MissingColumnsReport,
}

impl SeedReport {
	/// Total rows inserted across all tables.
	pub fn total_rows(&self) -> usize {
		self.tables.iter().map(|summary| summary.rows).sum()
	}

	/// Returns the summary of `table`.
	pub fn table(&self, table: &str) -> Option<&TableSummary> {
		self.tables.iter().find(|summary| summary.table == table)
	}
}
