//! Error types shared by the sheet store, the wizard engine and startup.
//!
//! Transport failures are plain `serenity::Error`s. Handlers return
//! `serenity::Result<()>` and the interaction dispatcher logs and drops them.

use thiserror::Error;

/// Bad user input caught at the step where it was entered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	#[error("`{0}` is not a date in MM/DD/YYYY form")]
	BadDate(String),

	#[error("`{0}` is not a valid answer, use Yes, No or leave it empty")]
	BadFlag(String),

	#[error("{0} is required")]
	MissingField(&'static str),
}

/// Failures talking to the spreadsheet.
#[derive(Error, Debug)]
pub enum StoreError {
	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error("token signing failed: {0}")]
	Token(#[from] jsonwebtoken::errors::Error),

	#[error("Sheets API returned {status}: {message}")]
	Api { status: u16, message: String },

	#[error("service account credentials: {0}")]
	Credentials(String),

	#[error("no worksheet named `{0}`")]
	UnknownSheet(String),
}

/// Terminal outcomes of a wizard or sheet operation.
///
/// Recoverable validation is not an error here: the engine hands back a
/// retry prompt instead (see `wizard::Advance::Retry`). A `Validation` value
/// only escapes when the step that failed was the finalizing one.
#[derive(Error, Debug)]
pub enum WizardError {
	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("{0} was not found")]
	NotFound(String),

	#[error(transparent)]
	Store(#[from] StoreError),

	/// The event addressed a step the user's session is not on, or no
	/// session exists anymore.
	#[error("this form is no longer active, please start again")]
	Stale,
}

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("cannot read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Yaml(#[from] serde_yaml::Error),

	#[error("missing required setting `{0}`")]
	Missing(&'static str),

	#[error("cannot set up logging: {0}")]
	Logger(String),
}
