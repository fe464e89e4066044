//! Schema fixtures.
//!
//! Provides an in-memory schema with a few typical seeded tables.

use chrono::{DateTime, TimeZone, Utc};
use tableseed_seeding::memory::StaticSchema;
use tableseed_seeding::{ColumnSchema, TableSchema};

/// Instant pinned into every run built by the tests.
pub fn fixed_instant() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// `fixed_instant` rendered in the default timestamp style.
pub const FIXED_TIMESTAMP: &str = "2024-03-15 12:00:00";

/// `users`: auto-increment id, name, email, created_at.
pub fn users_table() -> TableSchema {
	TableSchema::new(
		"users",
		vec![
			ColumnSchema::auto_increment("id", "integer"),
			ColumnSchema::new("name", "varchar(255)"),
			ColumnSchema::new("email", "varchar(255)"),
			ColumnSchema::new("created_at", "datetime"),
		],
	)
}

/// `posts`: auto-increment id, user_id, title, created_at, updated_at.
pub fn posts_table() -> TableSchema {
	TableSchema::new(
		"posts",
		vec![
			ColumnSchema::auto_increment("id", "integer"),
			ColumnSchema::new("user_id", "integer"),
			ColumnSchema::new("title", "text"),
			ColumnSchema::new("created_at", "datetime"),
			ColumnSchema::new("updated_at", "datetime"),
		],
	)
}

/// `tags`: a single label column, no timestamps.
pub fn tags_table() -> TableSchema {
	TableSchema::new("tags", vec![ColumnSchema::new("label", "text")])
}

/// Provider serving `users`, `posts` and `tags`.
pub fn blog_schema() -> StaticSchema {
	StaticSchema::new()
		.with_table(users_table())
		.with_table(posts_table())
		.with_table(tags_table())
}
