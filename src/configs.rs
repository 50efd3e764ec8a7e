use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const ENV_TOKEN: &str = "BOT_TOKEN";
const ENV_SPREADSHEET: &str = "SPREADSHEET_ID";
const ENV_SERVICE_ACCOUNT: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

#[derive(Serialize, Deserialize)]
pub struct ConfigData {
	#[serde(default)]
	token: String,
	#[serde(default)]
	spreadsheet_id: String,
	/// Key file path, or the key JSON itself.
	#[serde(default)]
	service_account: String,
	#[serde(default)]
	guild_id: Option<u64>,

	#[serde(default)]
	sheets: SheetNames,
	#[serde(default)]
	session: SessionConfig,
	#[serde(default)]
	log: LogConfig,

	/// Discord handle -> name written to the update log.
	#[serde(default)]
	aliases: HashMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SheetNames {
	pub masterlist: String,
	pub watchlist: String,
	pub updates: String,
}

impl Default for SheetNames {
	fn default() -> Self {
		Self {
			masterlist: "Masterlist".into(),
			watchlist: "Watchlist".into(),
			updates: "Update Sheet".into(),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct SessionConfig {
	/// Idle seconds before a pending wizard is dropped. 0 keeps sessions forever.
	pub ttl_secs: u64,
	pub sweep_secs: u64,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			ttl_secs: 900,
			sweep_secs: 60,
		}
	}
}

impl SessionConfig {
	pub fn ttl(&self) -> Option<Duration> {
		(self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
	}

	pub fn sweep_every(&self) -> Duration {
		Duration::from_secs(self.sweep_secs.max(1))
	}
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LogConfig {
	pub level: String,
	pub file: Option<String>,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			level: "info".into(),
			file: None,
		}
	}
}

impl ConfigData {
	/// Reads the YAML file, then lets `.env` / process variables override the secrets.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let _ = dotenvy::dotenv();

		let config_string = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;
		let mut config = Self::from_yaml(&config_string)?;
		config.apply_env(|name| std::env::var(name).ok());
		config.validate()?;

		Ok(config)
	}

	pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
		Ok(serde_yaml::from_str::<ConfigData>(text)?)
	}

	fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

		if let Some(token) = non_empty(ENV_TOKEN) {
			self.token = token;
		}
		if let Some(id) = non_empty(ENV_SPREADSHEET) {
			self.spreadsheet_id = id;
		}
		if let Some(account) = non_empty(ENV_SERVICE_ACCOUNT) {
			self.service_account = account;
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.token.trim().is_empty() {
			return Err(ConfigError::Missing("token"));
		}
		if self.spreadsheet_id.trim().is_empty() {
			return Err(ConfigError::Missing("spreadsheet_id"));
		}
		if self.service_account.trim().is_empty() {
			return Err(ConfigError::Missing("service_account"));
		}
		Ok(())
	}

	pub fn get_token(&self) -> &str {
		&self.token
	}

	pub fn get_spreadsheet_id(&self) -> &str {
		&self.spreadsheet_id
	}

	pub fn get_service_account(&self) -> &str {
		&self.service_account
	}

	pub fn get_guild_id(&self) -> Option<u64> {
		self.guild_id
	}

	pub fn get_sheets(&self) -> &SheetNames {
		&self.sheets
	}

	pub fn get_session(&self) -> SessionConfig {
		self.session
	}

	pub fn get_log(&self) -> &LogConfig {
		&self.log
	}

	pub fn get_aliases(&self) -> &HashMap<String, String> {
		&self.aliases
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	#[test]
	fn defaults_fill_optional_sections() {
		let config = ConfigData::from_yaml("token: abc\nspreadsheet_id: sheet\nservice_account: key.json\n").unwrap();

		assert_eq!(config.get_sheets(), &SheetNames::default());
		assert_eq!(config.get_session().ttl_secs, 900);
		assert_eq!(config.get_log().level, "info");
		assert!(config.get_aliases().is_empty());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn env_overrides_file_values() {
		let mut config = ConfigData::from_yaml("token: from-file\naliases:\n  kahzukie: Kahz\n").unwrap();
		config.apply_env(|name| match name {
			ENV_TOKEN => Some("from-env".to_string()),
			ENV_SPREADSHEET => Some("1AbC".to_string()),
			ENV_SERVICE_ACCOUNT => Some("   ".to_string()),
			_ => None,
		});

		assert_eq!(config.get_token(), "from-env");
		assert_eq!(config.get_spreadsheet_id(), "1AbC");
		assert_eq!(config.get_aliases().get("kahzukie").map(String::as_str), Some("Kahz"));
		assert_matches!(config.validate(), Err(ConfigError::Missing("service_account")));
	}

	#[test]
	fn zero_ttl_disables_expiry() {
		let config = ConfigData::from_yaml("session:\n  ttl_secs: 0\n  sweep_secs: 0\n").unwrap();

		assert_eq!(config.get_session().ttl(), None);
		assert_eq!(config.get_session().sweep_every(), Duration::from_secs(1));
		assert_eq!(SessionConfig::default().ttl(), Some(Duration::from_secs(900)));
	}
}
