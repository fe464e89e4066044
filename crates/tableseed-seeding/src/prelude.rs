//! Convenience re-exports for common usage.
//!
//! This module provides a single import for the most commonly used items
//! from the tableseed-seeding crate.
//!
//! # Example
//!
//! ```ignore
//! use tableseed_seeding::prelude::*;
//!
//! // Now you have access to:
//! // - The run, seeder trait and seed command
//! // - Schema and executor traits with their in-memory implementations
//! // - Error types
//! // - The `row!` macro
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Run types
pub use crate::options::{SeederOptions, TimestampStyle};
pub use crate::report::{BufferSink, ReportSink, SeedReport, StdoutSink, TableSummary};
pub use crate::row::Row;
pub use crate::run::SeedRun;
pub use crate::weighted::{WeightedChoice, pick_weighted};

// Seeders and commands
pub use crate::commands::{SeedCommand, SeedCommandOptions, SeedSummary};
pub use crate::seeder::{TableSeeder, seed, seed_with};

// Database seams
pub use crate::executor::StatementExecutor;
pub use crate::memory::{RecordingExecutor, StaticSchema, Statement};
pub use crate::schema::{ColumnSchema, SchemaProvider, TableSchema};

pub use crate::row;
