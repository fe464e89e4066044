//! Statement execution seam between a seed run and the database.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SeedingResult;

/// Executes the statements a seed run issues when it is finished.
///
/// A run calls these methods one at a time, in a fixed order, and stops at
/// the first error. Implementations should keep constraint toggles and the
/// statements that follow them on the same database session.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
	/// Enables or disables foreign-key/constraint checks.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ConstraintToggle`](crate::SeedingError::ConstraintToggle).
	async fn set_constraint_checks(&self, enabled: bool) -> SeedingResult<()>;

	/// Removes every row of `table`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::Truncate`](crate::SeedingError::Truncate).
	async fn truncate_table(&self, table: &str) -> SeedingResult<()>;

	/// Inserts `rows` into `table` with a single multi-row statement.
	///
	/// Every row holds one value per entry of `columns`, in the same order.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::Insert`](crate::SeedingError::Insert).
	async fn batch_insert(
		&self,
		table: &str,
		columns: &[String],
		rows: &[Vec<Value>],
	) -> SeedingResult<()>;
}
