use std::sync::Arc;

use log::{error, info};

use crate::audit::UpdateLog;
use crate::error::WizardError;
use crate::sheets::table::{RosterRecord, WatchEntry};
use crate::sheets::{RecordStore, Row, Table};

/// Writes to the roster tables, mirroring each one into the update log.
pub struct Roster {
	store: Arc<dyn RecordStore>,
	log: Arc<UpdateLog>,
}

impl Roster {
	pub fn new(store: Arc<dyn RecordStore>, log: Arc<UpdateLog>) -> Self {
		Self { store, log }
	}

	pub fn log(&self) -> &UpdateLog {
		&self.log
	}

	pub async fn find(&self, table: Table, key: &str) -> Result<Option<Row>, WizardError> {
		Ok(self.store.find(table, key).await?)
	}

	pub async fn add(&self, table: Table, row: Row, handle: &str) -> Result<String, WizardError> {
		let name = row.first().map(|cell| cell.as_text()).unwrap_or_default();
		self.store.append(table, row).await?;
		self.audit(handle, format!("Added player to {}: {}", table, name)).await;

		Ok(format!("✅ Successfully added {} to {}!", name, table))
	}

	pub async fn edit(&self, table: Table, key: &str, row: Row, handle: &str) -> Result<String, WizardError> {
		if !self.store.update(table, key, row).await? {
			return Err(WizardError::NotFound(key.to_string()));
		}
		self.audit(handle, format!("Edited player in {}: {}", table, key)).await;

		Ok(format!("✅ Successfully edited {} in {}!", key, table))
	}

	pub async fn remove(&self, table: Table, key: &str, handle: &str) -> Result<String, WizardError> {
		if !self.store.delete(table, key).await? {
			return Err(WizardError::NotFound(key.to_string()));
		}
		self.audit(handle, format!("Removed player from {}: {}", table, key)).await;

		Ok(format!("✅ Successfully removed {} from {}!", key, table))
	}

	pub async fn find_member(&self, key: &str) -> Result<Option<RosterRecord>, WizardError> {
		Ok(self.find(Table::Masterlist, key).await?.as_ref().map(RosterRecord::from_row))
	}

	pub async fn find_watch(&self, key: &str) -> Result<Option<WatchEntry>, WizardError> {
		Ok(self.find(Table::Watchlist, key).await?.as_ref().map(WatchEntry::from_row))
	}

	pub async fn is_watched(&self, key: &str) -> Result<bool, WizardError> {
		Ok(self.find_watch(key).await?.is_some())
	}

	/// The row is already written when this runs, so a failure is only logged.
	async fn audit(&self, handle: &str, description: String) {
		match self.log.record(handle, description).await {
			Ok(entry) => info!("{} by {}", entry.description, entry.actor),
			Err(error) => error!("update log write failed: {}", error),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::audit::AliasTable;
	use crate::sheets::memory::MemoryStore;
	use crate::sheets::Cell;
	use assert_matches::assert_matches;

	fn roster(store: Arc<MemoryStore>) -> Roster {
		let log = Arc::new(UpdateLog::new(store.clone(), AliasTable::default()));
		Roster::new(store, log)
	}

	fn row(name: &str) -> Row {
		let mut row = vec![Cell::empty(); 8];
		row[0] = Cell::from(name);
		row.push(Cell::Flag(false));
		row
	}

	#[tokio::test]
	async fn remove_missing_key_touches_nothing() {
		let store = Arc::new(MemoryStore::new());
		store.seed(Table::Masterlist, vec![row("Alice")]).await;
		let roster = roster(store.clone());

		assert_matches!(
			roster.remove(Table::Masterlist, "Bob", "kahzukie").await,
			Err(WizardError::NotFound(key)) if key == "Bob"
		);
		assert_eq!(store.rows(Table::Masterlist).await.len(), 1);
		assert!(store.rows(Table::Updates).await.is_empty());
	}

	#[tokio::test]
	async fn remove_deletes_first_match_and_logs() {
		let store = Arc::new(MemoryStore::new());
		store.seed(Table::Watchlist, vec![row("Alice"), row("Mallory"), row("Mallory")]).await;
		let roster = roster(store.clone());

		let message = roster.remove(Table::Watchlist, "Mallory", "kahzukie").await.unwrap();

		assert_eq!(message, "✅ Successfully removed Mallory from Watchlist!");
		assert_eq!(store.rows(Table::Watchlist).await.len(), 2);
		let updates = store.rows(Table::Updates).await;
		assert_eq!(updates[0][2], Cell::from("Removed player from Watchlist: Mallory"));
	}

	#[tokio::test]
	async fn add_survives_update_log_failure() {
		let store = Arc::new(MemoryStore::failing_appends_to(Table::Updates));
		let roster = roster(store.clone());

		let message = roster.add(Table::Masterlist, row("Bob"), "kahzukie").await.unwrap();

		assert_eq!(message, "✅ Successfully added Bob to Masterlist!");
		assert_eq!(store.rows(Table::Masterlist).await, vec![row("Bob")]);
	}

	#[tokio::test]
	async fn is_watched_checks_the_watchlist_only() {
		let store = Arc::new(MemoryStore::new());
		store.seed(Table::Masterlist, vec![row("Alice")]).await;
		store.seed(Table::Watchlist, vec![row("Mallory")]).await;
		let roster = roster(store);

		assert!(roster.is_watched("Mallory").await.unwrap());
		assert!(!roster.is_watched("Alice").await.unwrap());
		assert_eq!(roster.find_member("Alice").await.unwrap().map(|r| r.name), Some("Alice".to_string()));
	}

	#[tokio::test]
	async fn blank_name_finds_nobody() {
		let store = Arc::new(MemoryStore::new());
		store.seed(Table::Masterlist, vec![row("Alice")]).await;
		store.seed(Table::Watchlist, vec![row("Mallory")]).await;
		let roster = roster(store.clone());

		assert_matches!(roster.find_member("").await, Ok(None));
		assert!(!roster.is_watched(" ").await.unwrap());
		assert_matches!(roster.remove(Table::Masterlist, "", "kahzukie").await, Err(WizardError::NotFound(_)));
		assert_eq!(store.rows(Table::Masterlist).await.len(), 1);
	}
}
