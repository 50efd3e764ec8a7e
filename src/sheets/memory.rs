use std::collections::HashMap;

use serenity::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::sheets::store::{locate, RecordStore};
use crate::sheets::table::{Cell, Row, Table};

/// In-process store used by the unit tests in place of the spreadsheet.
#[derive(Default)]
pub struct MemoryStore {
	tables: Mutex<HashMap<Table, Vec<Row>>>,
	fail_appends_to: Option<Table>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing_appends_to(table: Table) -> Self {
		Self {
			tables: Mutex::default(),
			fail_appends_to: Some(table),
		}
	}

	pub async fn seed(&self, table: Table, rows: Vec<Row>) {
		self.tables.lock().await.insert(table, rows);
	}

	pub async fn rows(&self, table: Table) -> Vec<Row> {
		self.tables.lock().await.get(&table).cloned().unwrap_or_default()
	}
}

fn position(rows: &[Row], key: &str) -> Option<usize> {
	let texts: Vec<Vec<String>> = rows.iter().map(|row| row.iter().map(Cell::as_text).collect()).collect();
	locate(&texts, key)
}

#[async_trait]
impl RecordStore for MemoryStore {
	async fn append(&self, table: Table, row: Row) -> Result<(), StoreError> {
		if self.fail_appends_to == Some(table) {
			return Err(StoreError::Api {
				status: 503,
				message: "backend unavailable".into(),
			});
		}
		self.tables.lock().await.entry(table).or_default().push(row);
		Ok(())
	}

	async fn find(&self, table: Table, key: &str) -> Result<Option<Row>, StoreError> {
		let tables = self.tables.lock().await;
		let rows = tables.get(&table).map(Vec::as_slice).unwrap_or_default();
		Ok(position(rows, key).map(|index| table.normalize(rows[index].clone())))
	}

	async fn update(&self, table: Table, key: &str, row: Row) -> Result<bool, StoreError> {
		let mut tables = self.tables.lock().await;
		let rows = tables.entry(table).or_default();
		match position(rows, key) {
			Some(index) => {
				rows[index] = row;
				Ok(true)
			},
			None => Ok(false),
		}
	}

	async fn delete(&self, table: Table, key: &str) -> Result<bool, StoreError> {
		let mut tables = self.tables.lock().await;
		let rows = tables.entry(table).or_default();
		match position(rows, key) {
			Some(index) => {
				rows.remove(index);
				Ok(true)
			},
			None => Ok(false),
		}
	}

	async fn list(&self, table: Table) -> Result<Vec<Row>, StoreError> {
		Ok(self.rows(table).await)
	}
}
