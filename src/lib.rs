//! # Tableseed
//!
//! Database seeders that batch-insert generated rows, fill `created_at` and
//! `updated_at` with one instant per run and report columns they never
//! populated.
//!
//! ## Feature Flags
//!
//! - `sqlite` (default) - SQLite backend
//! - `postgres` - PostgreSQL backend
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use tableseed::prelude::*;
//! use tableseed::db::SqliteDatabase;
//!
//! struct UserSeeder;
//!
//! #[async_trait::async_trait]
//! impl TableSeeder for UserSeeder {
//!     async fn run(&self, run: &mut SeedRun<'_>) -> SeedingResult<()> {
//!         let role = run.pick_weighted(&[("member", 9), ("admin", 1)])?;
//!         run.insert("users", row! { "name" => "Bob", "role" => role }).await
//!     }
//! }
//!
//! let database = SqliteDatabase::connect("sqlite://app.db").await?;
//! seed(&UserSeeder, &database, &database).await?;
//! ```

pub use tableseed_seeding::{
	ColumnSchema, SchemaProvider, SeedReport, SeedRun, SeederOptions, SeedingError,
	SeedingResult, StatementExecutor, TableSchema, TableSeeder, TimestampStyle, WeightedChoice,
	audit, batch, commands, fake, memory, pick_weighted, report, row, seed,
};

/// Database backends.
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod db {
	pub use tableseed_db::Dialect;

	#[cfg(feature = "postgres")]
	pub use tableseed_db::PostgresDatabase;
	#[cfg(feature = "sqlite")]
	pub use tableseed_db::SqliteDatabase;
}

pub mod prelude {
	pub use tableseed_seeding::prelude::*;

	#[cfg(feature = "postgres")]
	pub use tableseed_db::PostgresDatabase;
	#[cfg(feature = "sqlite")]
	pub use tableseed_db::SqliteDatabase;
}
