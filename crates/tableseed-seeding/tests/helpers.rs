//! Test helpers for tableseed-seeding tests.
//!
//! This module provides the table definitions and fixed instants shared by
//! the integration tests.

#[path = "helpers/schemas.rs"]
pub mod schemas;
