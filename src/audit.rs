//! The append-only update log sheet.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use log::info;

use crate::error::StoreError;
use crate::sheets::{Cell, RecordStore, Row, Table};
use crate::utils::convert;

/// Maps Discord handles to the short names officers go by in the sheet.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
	aliases: HashMap<String, String>,
}

impl AliasTable {
	pub fn new(aliases: HashMap<String, String>) -> Self {
		Self { aliases }
	}

	pub fn resolve(&self, handle: &str) -> String {
		self.aliases.get(handle).cloned().unwrap_or_else(|| handle.to_string())
	}

	/// Distinct display names, sorted.
	pub fn officers(&self) -> Vec<String> {
		self.aliases.values().cloned().collect::<BTreeSet<_>>().into_iter().collect()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
	pub date: String,
	pub actor: String,
	pub description: String,
}

impl AuditEntry {
	fn to_row(&self) -> Row {
		vec![
			Cell::from(self.date.as_str()),
			Cell::from(self.actor.as_str()),
			Cell::from(self.description.as_str()),
		]
	}

	fn from_row(row: &Row) -> Self {
		let text = |index: usize| row.get(index).map(Cell::as_text).unwrap_or_default();
		Self {
			date: text(0),
			actor: text(1),
			description: text(2),
		}
	}
}

pub struct UpdateLog {
	store: Arc<dyn RecordStore>,
	aliases: AliasTable,
}

impl UpdateLog {
	pub fn new(store: Arc<dyn RecordStore>, aliases: AliasTable) -> Self {
		Self { store, aliases }
	}

	pub fn aliases(&self) -> &AliasTable {
		&self.aliases
	}

	/// Appends `[today, alias(handle), description]`.
	pub async fn record(&self, handle: &str, description: impl Into<String>) -> Result<AuditEntry, StoreError> {
		let entry = AuditEntry {
			date: convert::today(),
			actor: self.aliases.resolve(handle),
			description: description.into(),
		};
		self.store.append(Table::Updates, entry.to_row()).await?;
		info!("update log: {} - {}", entry.actor, entry.description);

		Ok(entry)
	}

	/// The last `limit` rows of the log, oldest first.
	pub async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, StoreError> {
		let rows: Vec<Row> = self
			.store
			.list(Table::Updates)
			.await?
			.into_iter()
			.filter(|row| !Table::Updates.is_header(row))
			.collect();
		let skip = rows.len().saturating_sub(limit);
		Ok(rows[skip..].iter().map(AuditEntry::from_row).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sheets::memory::MemoryStore;

	fn aliases() -> AliasTable {
		AliasTable::new(HashMap::from([
			("kahzukie".to_string(), "Kahz".to_string()),
			(".onlyman".to_string(), "Beaako".to_string()),
			("kahz_alt".to_string(), "Kahz".to_string()),
		]))
	}

	#[test]
	fn unknown_handles_pass_through() {
		let table = aliases();
		assert_eq!(table.resolve("kahzukie"), "Kahz");
		assert_eq!(table.resolve("someone_else"), "someone_else");
	}

	#[test]
	fn officers_are_distinct_and_sorted() {
		assert_eq!(aliases().officers(), vec!["Beaako".to_string(), "Kahz".to_string()]);
	}

	#[tokio::test]
	async fn record_appends_dated_aliased_row() {
		let store = Arc::new(MemoryStore::new());
		let log = UpdateLog::new(store.clone(), aliases());

		let entry = log.record(".onlyman", "Added player to Masterlist: Bob").await.unwrap();

		assert_eq!(entry.actor, "Beaako");
		assert_eq!(
			store.rows(Table::Updates).await,
			vec![vec![
				Cell::from(convert::today()),
				Cell::from("Beaako"),
				Cell::from("Added player to Masterlist: Bob"),
			]]
		);
	}

	#[tokio::test]
	async fn recent_returns_the_tail() {
		let store = Arc::new(MemoryStore::new());
		let rows = (1..=12)
			.map(|n| vec![Cell::from("01/01/2025"), Cell::from("Kahz"), Cell::from(format!("change {}", n))])
			.collect();
		store.seed(Table::Updates, rows).await;
		let log = UpdateLog::new(store, aliases());

		let recent = log.recent(10).await.unwrap();
		assert_eq!(recent.len(), 10);
		assert_eq!(recent[0].description, "change 3");
		assert_eq!(recent[9].description, "change 12");

		assert_eq!(log.recent(50).await.unwrap().len(), 12);
	}

	#[tokio::test]
	async fn recent_skips_the_header_row() {
		let store = Arc::new(MemoryStore::new());
		store
			.seed(Table::Updates, vec![
				vec![Cell::from("Date"), Cell::from("Admin"), Cell::from("Change")],
				vec![Cell::from("01/01/2025"), Cell::from("Kahz"), Cell::from("first")],
			])
			.await;
		let log = UpdateLog::new(store, aliases());

		let recent = log.recent(10).await.unwrap();
		assert_eq!(recent.len(), 1);
		assert_eq!(recent[0].description, "first");
	}
}
