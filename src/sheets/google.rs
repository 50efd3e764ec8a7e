use std::collections::HashMap;

use log::{debug, info};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serenity::async_trait;
use tokio::sync::Mutex;

use crate::configs::SheetNames;
use crate::error::StoreError;
use crate::sheets::auth::ServiceAccountAuth;
use crate::sheets::store::{locate, RecordStore};
use crate::sheets::table::{Cell, Row, Table};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	range: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	major_dimension: Option<String>,
	#[serde(default)]
	values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
	#[serde(default)]
	sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
	properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
	sheet_id: i64,
	title: String,
}

/// `RecordStore` backed by one Google spreadsheet, one worksheet per table.
pub struct GoogleSheets {
	http: reqwest::Client,
	auth: ServiceAccountAuth,
	spreadsheet_id: String,
	names: SheetNames,
	sheet_ids: Mutex<HashMap<String, i64>>,
}

impl GoogleSheets {
	pub fn new(http: reqwest::Client, auth: ServiceAccountAuth, spreadsheet_id: String, names: SheetNames) -> Self {
		Self {
			http,
			auth,
			spreadsheet_id,
			names,
			sheet_ids: Mutex::new(HashMap::new()),
		}
	}

	fn title(&self, table: Table) -> &str {
		match table {
			Table::Masterlist => &self.names.masterlist,
			Table::Watchlist => &self.names.watchlist,
			Table::Updates => &self.names.updates,
		}
	}

	fn url(&self, tail: &[&str]) -> Result<Url, StoreError> {
		let mut url = Url::parse(API_BASE).map_err(|e| StoreError::Credentials(e.to_string()))?;
		url.path_segments_mut()
			.map_err(|_| StoreError::Credentials("API base cannot hold a path".into()))?
			.push(&self.spreadsheet_id)
			.extend(tail);
		Ok(url)
	}

	async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, StoreError> {
		let token = self.auth.token().await?;
		Ok(self.http.request(method, url).bearer_auth(token))
	}

	async fn read_values(&self, table: Table) -> Result<Vec<Vec<String>>, StoreError> {
		let range = sheet_range(self.title(table));
		let url = self.url(&["values", &range])?;
		let response = checked(self.request(Method::GET, url).await?.send().await?).await?;
		let body: ValueRange = response.json().await?;

		Ok(body.values.into_iter().map(|row| row.into_iter().map(value_text).collect()).collect())
	}

	async fn sheet_id(&self, table: Table) -> Result<i64, StoreError> {
		let title = self.title(table).to_string();
		let mut ids = self.sheet_ids.lock().await;
		if let Some(id) = ids.get(&title) {
			return Ok(*id);
		}

		let url = self.url(&[])?;
		let builder = self.request(Method::GET, url).await?.query(&[("fields", "sheets.properties(sheetId,title)")]);
		let meta: SpreadsheetMeta = checked(builder.send().await?).await?.json().await?;
		for sheet in meta.sheets {
			ids.insert(sheet.properties.title, sheet.properties.sheet_id);
		}
		debug!("resolved worksheet ids: {:?}", ids);

		ids.get(&title).copied().ok_or(StoreError::UnknownSheet(title))
	}
}

#[async_trait]
impl RecordStore for GoogleSheets {
	async fn append(&self, table: Table, row: Row) -> Result<(), StoreError> {
		let range = sheet_range(self.title(table));
		let url = self.url(&["values", &format!("{}:append", range)])?;
		let body = ValueRange {
			range: None,
			major_dimension: Some("ROWS".into()),
			values: vec![row_values(&row)],
		};
		let builder = self
			.request(Method::POST, url)
			.await?
			.query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
			.json(&body);
		checked(builder.send().await?).await?;

		info!("appended row to {}", self.title(table));
		Ok(())
	}

	async fn find(&self, table: Table, key: &str) -> Result<Option<Row>, StoreError> {
		let rows = self.read_values(table).await?;
		Ok(locate(&rows, key).map(|index| {
			let row = rows[index].iter().map(|text| Cell::Text(text.clone())).collect();
			table.normalize(row)
		}))
	}

	async fn update(&self, table: Table, key: &str, row: Row) -> Result<bool, StoreError> {
		let rows = self.read_values(table).await?;
		let Some(index) = locate(&rows, key) else {
			return Ok(false);
		};

		let range = row_range(self.title(table), index + 1, row.len());
		let url = self.url(&["values", &range])?;
		let body = ValueRange {
			range: Some(range.clone()),
			major_dimension: Some("ROWS".into()),
			values: vec![row_values(&row)],
		};
		let builder = self
			.request(Method::PUT, url)
			.await?
			.query(&[("valueInputOption", "RAW")])
			.json(&body);
		checked(builder.send().await?).await?;

		info!("updated {}", range);
		Ok(true)
	}

	async fn delete(&self, table: Table, key: &str) -> Result<bool, StoreError> {
		let rows = self.read_values(table).await?;
		let Some(index) = locate(&rows, key) else {
			return Ok(false);
		};
		let sheet_id = self.sheet_id(table).await?;

		let url = self.url(&[])?;
		let url = Url::parse(&format!("{}:batchUpdate", url)).map_err(|e| StoreError::Credentials(e.to_string()))?;
		let body = json!({
			"requests": [{
				"deleteDimension": {
					"range": {
						"sheetId": sheet_id,
						"dimension": "ROWS",
						"startIndex": index,
						"endIndex": index + 1,
					}
				}
			}]
		});
		checked(self.request(Method::POST, url).await?.json(&body).send().await?).await?;

		info!("deleted row {} of {}", index + 1, self.title(table));
		Ok(true)
	}

	async fn list(&self, table: Table) -> Result<Vec<Row>, StoreError> {
		let rows = self.read_values(table).await?;
		Ok(rows
			.into_iter()
			.map(|row| table.normalize(row.into_iter().map(Cell::Text).collect()))
			.collect())
	}
}

async fn checked(response: Response) -> Result<Response, StoreError> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	let body: Value = response.json().await.unwrap_or(Value::Null);
	let message = body
		.pointer("/error/message")
		.and_then(Value::as_str)
		.unwrap_or("no error message")
		.to_string();
	Err(StoreError::Api {
		status: status.as_u16(),
		message,
	})
}

fn sheet_range(title: &str) -> String {
	format!("'{}'", title.replace('\'', "''"))
}

fn row_range(title: &str, row_number: usize, width: usize) -> String {
	let last = column_letter(width.max(1) - 1);
	format!("{}!A{}:{}{}", sheet_range(title), row_number, last, row_number)
}

/// Zero-based column index to its A1 letters.
fn column_letter(mut index: usize) -> String {
	let mut letters = Vec::new();
	loop {
		letters.push((b'A' + (index % 26) as u8) as char);
		if index < 26 {
			break;
		}
		index = index / 26 - 1;
	}
	letters.iter().rev().collect()
}

fn row_values(row: &Row) -> Vec<Value> {
	row.iter()
		.map(|cell| match cell {
			Cell::Text(text) => Value::String(text.clone()),
			Cell::Flag(flag) => Value::Bool(*flag),
		})
		.collect()
}

fn value_text(value: Value) -> String {
	match value {
		Value::String(text) => text,
		Value::Bool(true) => "TRUE".into(),
		Value::Bool(false) => "FALSE".into(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn column_letters_follow_a1_notation() {
		assert_eq!(column_letter(0), "A");
		assert_eq!(column_letter(8), "I");
		assert_eq!(column_letter(25), "Z");
		assert_eq!(column_letter(26), "AA");
		assert_eq!(column_letter(27), "AB");
		assert_eq!(column_letter(701), "ZZ");
		assert_eq!(column_letter(702), "AAA");
	}

	#[test]
	fn ranges_quote_sheet_titles() {
		assert_eq!(sheet_range("Update Sheet"), "'Update Sheet'");
		assert_eq!(sheet_range("Bob's"), "'Bob''s'");
		assert_eq!(row_range("Masterlist", 4, 9), "'Masterlist'!A4:I4");
		assert_eq!(row_range("Watchlist", 12, 11), "'Watchlist'!A12:K12");
	}

	#[test]
	fn sheet_values_become_text() {
		assert_eq!(value_text(json!("Alice")), "Alice");
		assert_eq!(value_text(json!(true)), "TRUE");
		assert_eq!(value_text(json!(42)), "42");
		assert_eq!(value_text(Value::Null), "");
	}

	#[test]
	fn flags_are_written_as_booleans() {
		let row: Row = vec!["Bob".into(), false.into()];
		assert_eq!(row_values(&row), vec![json!("Bob"), json!(false)]);
	}

	#[test]
	fn urls_escape_range_segments() {
		let sheets = GoogleSheets::new(
			reqwest::Client::new(),
			ServiceAccountAuth::new(
				crate::sheets::auth::ServiceAccountKey {
					client_email: "bot@example.iam.gserviceaccount.com".into(),
					private_key: String::new(),
					token_uri: "https://oauth2.googleapis.com/token".into(),
				},
				reqwest::Client::new(),
			),
			"1AbC".into(),
			SheetNames::default(),
		);

		let url = sheets.url(&["values", &sheet_range("Update Sheet")]).unwrap();
		assert_eq!(
			url.as_str(),
			"https://sheets.googleapis.com/v4/spreadsheets/1AbC/values/'Update%20Sheet'"
		);
	}
}
