//! Row representation used by [`SeedRun::insert`](crate::SeedRun::insert).

use indexmap::IndexMap;
use serde_json::Value;

/// One logical row: column name to value, in insertion order.
///
/// Column order is significant because it determines the batch the row
/// joins.
pub type Row = IndexMap<String, Value>;

/// Builds a [`Row`] from `column => value` pairs.
///
/// Values go through [`serde_json::json!`], so anything it accepts works.
///
/// # Example
///
/// ```
/// use tableseed_seeding::row;
///
/// let row = row! {
///     "name" => "Bob",
///     "age" => 42,
/// };
/// assert_eq!(row.keys().collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[macro_export]
macro_rules! row {
	() => {
		$crate::Row::new()
	};
	($($column:expr => $value:expr),+ $(,)?) => {{
		let mut row = $crate::Row::new();
		$(
			row.insert(::std::string::String::from($column), $crate::__private::json!($value));
		)+
		row
	}};
}
