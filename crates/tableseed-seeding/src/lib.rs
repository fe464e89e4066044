//! Table seeding with batched inserts and missing-column audits.
//!
//! This crate lets small "seeder" units generate rows and batch-insert them:
//!
//! - **Batching**: rows are grouped per table and exact column list, and
//!   every group is written with a single multi-row insert
//! - **Timestamps**: `created_at`/`updated_at` are filled with one fixed
//!   instant per run when the table has them and the row does not
//! - **Truncation**: seeded tables are emptied first, with constraint checks
//!   disabled around the truncation
//! - **Audit**: columns that never received a value are reported
//!
//! # Quick Start
//!
//! ```ignore
//! use tableseed_seeding::prelude::*;
//!
//! struct UserSeeder;
//!
//! #[async_trait::async_trait]
//! impl TableSeeder for UserSeeder {
//!     async fn run(&self, run: &mut SeedRun<'_>) -> SeedingResult<()> {
//!         run.insert("users", row! { "name" => "Bob" }).await?;
//!         run.insert("users", row! { "name" => "Ann" }).await?;
//!         Ok(())
//!     }
//! }
//!
//! // `database` implements SchemaProvider and StatementExecutor
//! let report = seed(&UserSeeder, &database, &database).await?;
//! println!("Inserted {} rows", report.total_rows());
//! ```
//!
//! # Architecture
//!
//! - [`SeedRun`] - Records rows and finishes the run (truncate, flush, audit)
//! - [`PendingBatch`](batch::PendingBatch) - Rows grouped by column signature
//! - [`ColumnCoverage`](batch::ColumnCoverage) - Columns populated per table
//! - [`MissingColumnsReport`](audit::MissingColumnsReport) - Audit result
//! - [`WeightedChoice`] - Weighted random selection
//! - [`TableSeeder`] and [`SeedCommand`](commands::SeedCommand) - Seeders and
//!   the command that runs them
//! - [`SchemaProvider`] and [`StatementExecutor`] - Database seams, with
//!   in-memory implementations in [`memory`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod audit;
pub mod batch;
pub mod commands;
pub mod error;
pub mod executor;
pub mod memory;
pub mod options;
pub mod prelude;
pub mod report;
pub mod row;
pub mod run;
pub mod schema;
pub mod seeder;
pub mod weighted;

// Re-export commonly used types at crate root
pub use error::{SeedingError, SeedingResult};
pub use executor::StatementExecutor;
pub use options::{SeederOptions, TimestampStyle};
pub use report::SeedReport;
pub use row::Row;
pub use run::SeedRun;
pub use schema::{ColumnSchema, SchemaProvider, TableSchema};
pub use seeder::{TableSeeder, seed};
pub use weighted::{WeightedChoice, pick_weighted};

// Fake data generators for use with `SeedRun::rng`
pub use fake;

#[doc(hidden)]
pub mod __private {
	pub use serde_json::json;
}
