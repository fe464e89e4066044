//! Error types for the seeding module.
//!
//! This module defines the error types used throughout the tableseed-seeding crate.

use thiserror::Error;

/// Errors that can occur during seeding operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// Table name was empty or otherwise unusable.
	#[error("Invalid table name: {0:?}")]
	InvalidTable(String),

	/// A row was recorded without any column.
	#[error("Empty row for table: {0}")]
	EmptyRow(String),

	/// A batch row does not have one value per column.
	#[error("Row arity mismatch for table {table}: expected {expected} values, got {actual}")]
	ArityMismatch {
		/// Target table.
		table: String,
		/// Number of columns in the batch.
		expected: usize,
		/// Number of values in the offending row.
		actual: usize,
	},

	/// Table or column metadata could not be read.
	#[error("Schema lookup failed for table {table}: {message}")]
	SchemaLookup {
		/// Table whose schema was requested.
		table: String,
		/// Underlying error message.
		message: String,
	},

	/// Enabling or disabling constraint checks failed.
	#[error("Failed to {} constraint checks: {message}", toggle_verb(.enabled))]
	ConstraintToggle {
		/// Requested state of the constraint checks.
		enabled: bool,
		/// Underlying error message.
		message: String,
	},

	/// Truncating a table failed.
	#[error("Truncate failed for table {table}: {message}")]
	Truncate {
		/// Table being truncated.
		table: String,
		/// Underlying error message.
		message: String,
	},

	/// A batch insert failed.
	#[error("Insert failed for table {table}: {message}")]
	Insert {
		/// Table being inserted into.
		table: String,
		/// Underlying error message.
		message: String,
	},

	/// Weighted selection input was empty or had a non-positive weight.
	#[error("Weighted sample error: {0}")]
	WeightedSample(String),

	/// Validation failed for a specific field.
	#[error("Validation error: {field}: {message}")]
	Validation {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// Seeder was not found among the registered seeders.
	#[error("Seeder not found: {0}")]
	SeederNotFound(String),

	/// Configuration could not be parsed.
	#[error("Configuration error: {0}")]
	Config(#[from] toml::de::Error),
}

impl SeedingError {
	/// Builds a [`SeedingError::SchemaLookup`] from any displayable error.
	pub fn schema_lookup(table: impl Into<String>, err: impl std::fmt::Display) -> Self {
		Self::SchemaLookup {
			table: table.into(),
			message: err.to_string(),
		}
	}

	/// Builds a [`SeedingError::Truncate`] from any displayable error.
	pub fn truncate(table: impl Into<String>, err: impl std::fmt::Display) -> Self {
		Self::Truncate {
			table: table.into(),
			message: err.to_string(),
		}
	}

	/// Builds a [`SeedingError::Insert`] from any displayable error.
	pub fn insert(table: impl Into<String>, err: impl std::fmt::Display) -> Self {
		Self::Insert {
			table: table.into(),
			message: err.to_string(),
		}
	}
}

fn toggle_verb(enabled: &bool) -> &'static str {
	if *enabled { "enable" } else { "disable" }
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
