use serenity::async_trait;

use crate::error::StoreError;
use crate::sheets::table::{Row, Table};

/// Row-level access to the roster tables.
///
/// Keys are matched exactly against every cell of the table and the first
/// hit wins, so a key can be any column's value. Nothing here enforces
/// uniqueness.
#[async_trait]
pub trait RecordStore: Send + Sync {
	async fn append(&self, table: Table, row: Row) -> Result<(), StoreError>;

	async fn find(&self, table: Table, key: &str) -> Result<Option<Row>, StoreError>;

	/// Overwrites the row holding `key`. Returns `false` when no row matched.
	async fn update(&self, table: Table, key: &str, row: Row) -> Result<bool, StoreError>;

	/// Deletes the row holding `key`. Returns `false` when no row matched.
	async fn delete(&self, table: Table, key: &str) -> Result<bool, StoreError>;

	async fn list(&self, table: Table) -> Result<Vec<Row>, StoreError>;
}

/// Index of the first row with a cell equal to `key`, scanning row-major.
/// A blank key never matches.
pub fn locate<S: AsRef<str>>(rows: &[Vec<S>], key: &str) -> Option<usize> {
	if key.trim().is_empty() {
		return None;
	}
	rows.iter().position(|row| row.iter().any(|cell| cell.as_ref() == key))
}
