//! Management commands.

mod seed;

pub use seed::{SeedCommand, SeedCommandOptions, SeedSummary};
