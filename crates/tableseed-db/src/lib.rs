//! Database backends for tableseed.
//!
//! Each backend implements both [`SchemaProvider`] and [`StatementExecutor`]
//! over a single connection, so the constraint toggles of a run apply to the
//! truncations and inserts that follow them.
//!
//! ## Features
//!
//! - `sqlite` (default): [`SqliteDatabase`]
//! - `postgres`: [`PostgresDatabase`]
//!
//! ## Example
//!
//! ```ignore
//! use tableseed_db::SqliteDatabase;
//! use tableseed_seeding::seed;
//!
//! let database = SqliteDatabase::connect("sqlite::memory:").await?;
//! let report = seed(&UserSeeder, &database, &database).await?;
//! ```
//!
//! [`SchemaProvider`]: tableseed_seeding::SchemaProvider
//! [`StatementExecutor`]: tableseed_seeding::StatementExecutor

#![warn(missing_docs)]

pub mod columns;
pub mod dialect;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use dialect::Dialect;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

#[cfg(feature = "postgres")]
pub use postgres::PostgresDatabase;
