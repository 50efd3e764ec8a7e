use std::fmt::Display;

use serde::Serialize;

/// The three worksheets the bot touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
	Masterlist,
	Watchlist,
	Updates,
}

impl Table {
	pub fn columns(&self) -> &'static [Column] {
		match self {
			Table::Masterlist => &ROSTER_COLUMNS,
			Table::Watchlist => &WATCH_COLUMNS,
			Table::Updates => &UPDATE_COLUMNS,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Table::Masterlist => "masterlist",
			Table::Watchlist => "watchlist",
			Table::Updates => "updates",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"masterlist" => Some(Table::Masterlist),
			"watchlist" => Some(Table::Watchlist),
			"updates" => Some(Table::Updates),
			_ => None,
		}
	}

	/// Whether `row` is the sheet's own header row rather than data.
	pub fn is_header(&self, row: &Row) -> bool {
		match (row.first(), self.columns().first()) {
			(Some(Cell::Text(text)), Some(column)) => text.trim() == column.header,
			_ => false,
		}
	}

	/// Pads a row read from the sheet to the table width and turns flag
	/// columns back into booleans.
	pub fn normalize(&self, mut row: Row) -> Row {
		let columns = self.columns();
		if row.len() < columns.len() {
			row.resize(columns.len(), Cell::empty());
		}
		for (cell, column) in row.iter_mut().zip(columns) {
			if column.flag {
				if let Cell::Text(text) = cell {
					*cell = Cell::Flag(text.trim().eq_ignore_ascii_case("true"));
				}
			}
		}
		row
	}
}

impl Display for Table {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", match self {
			Table::Masterlist => "Masterlist",
			Table::Watchlist => "Watchlist",
			Table::Updates => "Update Sheet",
		})
	}
}

/// One column of a fixed table layout. `field` is the name wizard sessions use.
#[derive(Debug)]
pub struct Column {
	pub field: &'static str,
	pub header: &'static str,
	pub flag: bool,
}

const fn text(field: &'static str, header: &'static str) -> Column {
	Column { field, header, flag: false }
}

pub const F_NAME: &str = "name";
pub const F_JOIN_DATE: &str = "join_date";
pub const F_RANK: &str = "rank";
pub const F_STATUS: &str = "status";
pub const F_ALTS: &str = "alts";
pub const F_HOUSE: &str = "house";
pub const F_DISCORD_ID: &str = "discord_id";
pub const F_NOTES: &str = "notes";
pub const F_SUSPICIOUS: &str = "suspicious";
pub const F_GUILD: &str = "guild";
pub const F_STATUS_DATE: &str = "status_date";
pub const F_REASON: &str = "reason";
pub const F_ACTOR: &str = "actor";
pub const F_SCREENSHOT: &str = "screenshot";

static ROSTER_COLUMNS: [Column; 9] = [
	text(F_NAME, "IGN"),
	text(F_JOIN_DATE, "Join Date"),
	text(F_RANK, "Rank"),
	text(F_STATUS, "Status"),
	text(F_ALTS, "Known Alts"),
	text(F_HOUSE, "House"),
	text(F_DISCORD_ID, "Discord ID"),
	text(F_NOTES, "Notes"),
	Column { field: F_SUSPICIOUS, header: "Suspicious", flag: true },
];

static WATCH_COLUMNS: [Column; 11] = [
	text(F_NAME, "IGN"),
	text(F_STATUS, "Status"),
	text(F_GUILD, "Guild"),
	text(F_STATUS_DATE, "Status Date"),
	text(F_REASON, "Reason"),
	text(F_ACTOR, "Action By"),
	text(F_NOTES, "Notes"),
	text(F_SCREENSHOT, "Screenshot"),
	text(F_ALTS, "Known Alts"),
	text(F_DISCORD_ID, "Discord ID"),
	text(F_HOUSE, "House"),
];

static UPDATE_COLUMNS: [Column; 3] = [
	text("date", "Date"),
	text("actor", "Admin"),
	text("description", "Change"),
];

/// A spreadsheet cell as written by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
	Text(String),
	Flag(bool),
}

impl Cell {
	pub fn empty() -> Self {
		Cell::Text(String::new())
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, Cell::Text(text) if text.trim().is_empty())
	}

	pub fn as_text(&self) -> String {
		match self {
			Cell::Text(text) => text.clone(),
			Cell::Flag(true) => "TRUE".into(),
			Cell::Flag(false) => "FALSE".into(),
		}
	}

	pub fn as_flag(&self) -> bool {
		match self {
			Cell::Flag(value) => *value,
			Cell::Text(text) => text.trim().eq_ignore_ascii_case("true"),
		}
	}
}

impl From<&str> for Cell {
	fn from(value: &str) -> Self {
		Cell::Text(value.to_string())
	}
}

impl From<String> for Cell {
	fn from(value: String) -> Self {
		Cell::Text(value)
	}
}

impl From<bool> for Cell {
	fn from(value: bool) -> Self {
		Cell::Flag(value)
	}
}

pub type Row = Vec<Cell>;

fn cell_text(row: &Row, index: usize) -> String {
	row.get(index).map(Cell::as_text).unwrap_or_default()
}

/// A Masterlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
	pub name: String,
	pub join_date: String,
	pub rank: String,
	pub status: String,
	pub alts: String,
	pub house: String,
	pub discord_id: String,
	pub notes: String,
	pub suspicious: bool,
}

impl RosterRecord {
	pub fn from_row(row: &Row) -> Self {
		Self {
			name: cell_text(row, 0),
			join_date: cell_text(row, 1),
			rank: cell_text(row, 2),
			status: cell_text(row, 3),
			alts: cell_text(row, 4),
			house: cell_text(row, 5),
			discord_id: cell_text(row, 6),
			notes: cell_text(row, 7),
			suspicious: row.get(8).map(Cell::as_flag).unwrap_or(false),
		}
	}
}

/// A Watchlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
	pub name: String,
	pub status: String,
	pub guild: String,
	pub status_date: String,
	pub reason: String,
	pub actor: String,
	pub notes: String,
	pub screenshot: String,
	pub alts: String,
	pub discord_id: String,
	pub house: String,
}

impl WatchEntry {
	pub fn from_row(row: &Row) -> Self {
		Self {
			name: cell_text(row, 0),
			status: cell_text(row, 1),
			guild: cell_text(row, 2),
			status_date: cell_text(row, 3),
			reason: cell_text(row, 4),
			actor: cell_text(row, 5),
			notes: cell_text(row, 6),
			screenshot: cell_text(row, 7),
			alts: cell_text(row, 8),
			discord_id: cell_text(row, 9),
			house: cell_text(row, 10),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_pads_and_parses_flags() {
		let row = vec![Cell::from("Alice"), Cell::from("01/01/2020"), Cell::from("R1"), Cell::from("Active")];
		let padded = Table::Masterlist.normalize(row);
		assert_eq!(padded.len(), 9);
		assert_eq!(padded[8], Cell::Flag(false));

		let mut row = vec![Cell::empty(); 9];
		row[8] = Cell::from("TRUE");
		assert_eq!(Table::Masterlist.normalize(row)[8], Cell::Flag(true));
	}

	#[test]
	fn header_rows_are_recognised_by_first_title() {
		assert!(Table::Updates.is_header(&vec!["Date".into(), "Admin".into(), "Change".into()]));
		assert!(!Table::Updates.is_header(&vec!["01/02/2024".into(), "Kahz".into(), "Added".into()]));
		assert!(!Table::Masterlist.is_header(&vec![]));
	}

	#[test]
	fn cells_serialize_as_plain_json_values() {
		let row: Row = vec!["Bob".into(), false.into()];
		assert_eq!(serde_json::to_string(&row).unwrap(), r#"["Bob",false]"#);
	}

	#[test]
	fn roster_record_reads_columns_in_order() {
		let row: Row = vec![
			"Alice".into(),
			"01/01/2020".into(),
			"R1".into(),
			"Active".into(),
			"".into(),
			"Oakwood".into(),
			"".into(),
			"".into(),
			"TRUE".into(),
		];
		let record = RosterRecord::from_row(&row);
		assert_eq!(record.name, "Alice");
		assert_eq!(record.house, "Oakwood");
		assert!(record.suspicious);
	}

	#[test]
	fn watch_entry_tolerates_short_rows() {
		let entry = WatchEntry::from_row(&vec!["Mallory".into(), "Banned".into()]);
		assert_eq!(entry.status, "Banned");
		assert_eq!(entry.house, "");
	}
}
