use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::{ValidationError, WizardError};
use crate::roster::Roster;
use crate::sheets::{Cell, Row, Table};
use crate::utils::convert;
use crate::wizard::session::{FieldValue, PendingSession, SessionKey, SessionStore};
use crate::wizard::steps::{
	Check, FormField, Options, StepKind, WizardKind, DATE_CUSTOM, DATE_TODAY, DATE_YESTERDAY, NAME_LABEL,
	UNCHANGED,
};
use crate::wizard::validate::{resolve_flag, validate_date};

/// The user driving a wizard.
#[derive(Debug, Clone)]
pub struct Actor {
	pub id: u64,
	pub handle: String,
}

impl Actor {
	fn key(&self, kind: WizardKind) -> SessionKey {
		SessionKey { user: self.id, kind }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
	pub label: String,
	pub value: String,
}

impl ChoiceOption {
	fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

#[derive(Debug, Clone)]
pub enum PromptBody {
	Select { options: Vec<ChoiceOption> },
	Form { fields: Vec<FormField> },
}

/// What the transport should show for the step a session is on.
#[derive(Debug, Clone)]
pub struct Prompt {
	pub kind: WizardKind,
	pub step: usize,
	pub total: usize,
	pub title: &'static str,
	pub target: Option<String>,
	/// Why the step is shown again, when it is.
	pub notice: Option<String>,
	pub body: PromptBody,
}

#[derive(Debug, Clone)]
pub struct Completion {
	pub table: Table,
	pub row: Row,
	pub message: String,
}

#[derive(Debug)]
pub enum Advance {
	Next(Prompt),
	/// Same step again, with `notice` explaining what was wrong.
	Retry(Prompt),
	/// Ask for a typed date for this step.
	CustomDate(Prompt),
	Done(Completion),
}

/// Drives wizard sessions from step to step and finalizes them into rows.
pub struct Wizard {
	sessions: Arc<SessionStore>,
	roster: Arc<Roster>,
}

impl Wizard {
	pub fn new(sessions: Arc<SessionStore>, roster: Arc<Roster>) -> Self {
		Self { sessions, roster }
	}

	pub fn sessions(&self) -> &Arc<SessionStore> {
		&self.sessions
	}

	/// Starts an add wizard, discarding any unfinished one of the same kind.
	pub async fn begin(&self, actor: &Actor, kind: WizardKind) -> Prompt {
		let session = PendingSession::new(None);
		let prompt = self.build_prompt(actor, kind, &session, None);
		self.sessions.start(actor.key(kind), session).await;
		info!("{} started {}", actor.handle, kind.title());
		prompt
	}

	/// Starts an edit wizard for the row holding `key`.
	pub async fn begin_edit(&self, actor: &Actor, kind: WizardKind, key: &str) -> Result<Prompt, WizardError> {
		let key = key.trim();
		if self.roster.find(kind.table(), key).await?.is_none() {
			return Err(WizardError::NotFound(key.to_string()));
		}

		let session = PendingSession::new(Some(key.to_string()));
		let prompt = self.build_prompt(actor, kind, &session, None);
		self.sessions.start(actor.key(kind), session).await;
		info!("{} started {} for {}", actor.handle, kind.title(), key);
		Ok(prompt)
	}

	/// The prompt for `step`, if the session is on it.
	pub async fn prompt(&self, actor: &Actor, kind: WizardKind, step: usize) -> Result<Prompt, WizardError> {
		let session = self.session_on(actor, kind, step).await?;
		Ok(self.build_prompt(actor, kind, &session, None))
	}

	pub async fn choose(&self, actor: &Actor, kind: WizardKind, step: usize, value: &str) -> Result<Advance, WizardError> {
		let session = self.session_on(actor, kind, step).await?;
		let unchanged = kind.is_edit() && value == UNCHANGED;

		let (field, resolved) = match &kind.steps()[step].kind {
			StepKind::Choice { field, options } => {
				let known = self.options(actor, kind, options).iter().any(|option| option.value == value);
				if !known {
					let notice = format!("`{}` is not one of the options", value);
					return Ok(Advance::Retry(self.build_prompt(actor, kind, &session, Some(notice))));
				}
				(*field, if unchanged { String::new() } else { value.to_string() })
			},
			StepKind::Date { field } => match value {
				DATE_TODAY => (*field, convert::today()),
				DATE_YESTERDAY => (*field, convert::yesterday()),
				DATE_CUSTOM => return Ok(Advance::CustomDate(self.build_prompt(actor, kind, &session, None))),
				_ if unchanged => (*field, String::new()),
				_ => {
					let notice = format!("`{}` is not one of the options", value);
					return Ok(Advance::Retry(self.build_prompt(actor, kind, &session, Some(notice))));
				},
			},
			StepKind::Form { .. } => return Err(WizardError::Stale),
		};

		let session = self
			.sessions
			.update(actor.key(kind), step, |s| {
				s.set(field, FieldValue::Text(resolved));
				s.advance();
				s.clone()
			})
			.await?;
		debug!("{} picked {} for {:?} step {}", actor.handle, value, kind, step);

		Ok(Advance::Next(self.build_prompt(actor, kind, &session, None)))
	}

	/// Typed date for a date step. A malformed date keeps the session on the step.
	pub async fn enter_date(&self, actor: &Actor, kind: WizardKind, step: usize, text: &str) -> Result<Advance, WizardError> {
		let session = self.session_on(actor, kind, step).await?;
		let StepKind::Date { field } = kind.steps()[step].kind else {
			return Err(WizardError::Stale);
		};

		let date = match validate_date(text) {
			Ok(date) => date,
			Err(error) => {
				return Ok(Advance::Retry(self.build_prompt(actor, kind, &session, Some(error.to_string()))));
			},
		};

		let session = self
			.sessions
			.update(actor.key(kind), step, |s| {
				s.set(field, FieldValue::Text(date));
				s.advance();
				s.clone()
			})
			.await?;

		Ok(Advance::Next(self.build_prompt(actor, kind, &session, None)))
	}

	/// Captures a submitted form. The last form finalizes the wizard.
	pub async fn submit_form(
		&self,
		actor: &Actor,
		kind: WizardKind,
		step: usize,
		values: &HashMap<String, String>,
	) -> Result<Advance, WizardError> {
		if step + 1 == kind.steps().len() {
			return self.finalize(actor, kind, step, values).await.map(Advance::Done);
		}

		let session = self.session_on(actor, kind, step).await?;
		let StepKind::Form { fields } = kind.steps()[step].kind else {
			return Err(WizardError::Stale);
		};

		let mut staged = session.clone();
		if let Err(error) = apply_form(&mut staged, fields, values, kind.is_edit()) {
			return Ok(Advance::Retry(self.build_prompt(actor, kind, &session, Some(error.to_string()))));
		}
		staged.advance();

		let next = staged.clone();
		self.sessions.update(actor.key(kind), step, move |s| *s = staged).await?;

		Ok(Advance::Next(self.build_prompt(actor, kind, &next, None)))
	}

	/// Removes the user's session and writes whatever it holds.
	///
	/// A session that is already gone finalizes as an empty one, and the
	/// session is gone afterwards even when the answers turn out invalid.
	async fn finalize(
		&self,
		actor: &Actor,
		kind: WizardKind,
		step: usize,
		values: &HashMap<String, String>,
	) -> Result<Completion, WizardError> {
		let StepKind::Form { fields } = kind.steps()[step].kind else {
			return Err(WizardError::Stale);
		};
		if let Some(session) = self.sessions.get(actor.key(kind)).await {
			if session.step() != step {
				return Err(WizardError::Stale);
			}
		}

		let mut session = self.sessions.take(actor.key(kind)).await;
		if let Err(error) = apply_form(&mut session, fields, values, kind.is_edit()) {
			warn!("{} {:?} ended on invalid input: {}", actor.handle, kind, error);
			return Err(error.into());
		}
		self.complete(actor, kind, session).await
	}

	pub async fn cancel(&self, actor: &Actor, kind: WizardKind) -> bool {
		let cancelled = self.sessions.cancel(actor.key(kind)).await;
		if cancelled {
			info!("{} cancelled {}", actor.handle, kind.title());
		}
		cancelled
	}

	async fn complete(&self, actor: &Actor, kind: WizardKind, session: PendingSession) -> Result<Completion, WizardError> {
		let table = kind.table();

		if kind.is_edit() {
			let key = session.target().unwrap_or_default().to_string();
			let existing = self
				.roster
				.find(table, &key)
				.await?
				.ok_or_else(|| WizardError::NotFound(key.clone()))?;
			let row = merge_row(table, &session, existing);
			let message = self.roster.edit(table, &key, row.clone(), &actor.handle).await?;
			return Ok(Completion { table, row, message });
		}

		let row = assemble_row(table, &session);
		if row.first().map_or(true, Cell::is_blank) {
			return Err(ValidationError::MissingField(NAME_LABEL).into());
		}
		let message = self.roster.add(table, row.clone(), &actor.handle).await?;
		Ok(Completion { table, row, message })
	}

	async fn session_on(&self, actor: &Actor, kind: WizardKind, step: usize) -> Result<PendingSession, WizardError> {
		match self.sessions.get(actor.key(kind)).await {
			Some(session) if session.step() == step && step < kind.steps().len() => Ok(session),
			_ => Err(WizardError::Stale),
		}
	}

	fn options(&self, actor: &Actor, kind: WizardKind, options: &Options) -> Vec<ChoiceOption> {
		let mut list: Vec<ChoiceOption> = match options {
			Options::Fixed(values) => values.iter().map(|v| ChoiceOption::new(*v, *v)).collect(),
			Options::Officers => {
				let aliases = self.roster.log().aliases();
				let mut names = aliases.officers();
				let own = aliases.resolve(&actor.handle);
				if !names.contains(&own) {
					names.push(own);
					names.sort();
				}
				names.into_iter().map(|name| ChoiceOption::new(name.clone(), name)).collect()
			},
		};
		if kind.is_edit() {
			list.insert(0, ChoiceOption::new("Unchanged", UNCHANGED));
		}
		list
	}

	fn build_prompt(&self, actor: &Actor, kind: WizardKind, session: &PendingSession, notice: Option<String>) -> Prompt {
		let steps = kind.steps();
		let step = session.step().min(steps.len() - 1);
		let descriptor = &steps[step];

		let body = match &descriptor.kind {
			StepKind::Choice { options, .. } => PromptBody::Select {
				options: self.options(actor, kind, options),
			},
			StepKind::Date { .. } => {
				let mut options = vec![
					ChoiceOption::new(format!("Today ({})", convert::today()), DATE_TODAY),
					ChoiceOption::new(format!("Yesterday ({})", convert::yesterday()), DATE_YESTERDAY),
					ChoiceOption::new("Custom date…", DATE_CUSTOM),
				];
				if kind.is_edit() {
					options.insert(0, ChoiceOption::new("Unchanged", UNCHANGED));
				}
				PromptBody::Select { options }
			},
			StepKind::Form { fields } => PromptBody::Form {
				fields: fields
					.iter()
					.map(|field| FormField {
						required: field.required && !kind.is_edit(),
						..*field
					})
					.collect(),
			},
		};

		Prompt {
			kind,
			step,
			total: steps.len(),
			title: descriptor.title,
			target: session.target().map(str::to_string),
			notice,
			body,
		}
	}
}

/// Copies form answers into the session, validating as it goes.
///
/// In edit wizards a blank answer leaves the field unset so the existing
/// cell survives.
fn apply_form(
	session: &mut PendingSession,
	fields: &[FormField],
	values: &HashMap<String, String>,
	editing: bool,
) -> Result<(), ValidationError> {
	let mut staged = Vec::with_capacity(fields.len());
	for field in fields {
		let raw = values.get(field.field).map(|v| v.trim()).unwrap_or_default();
		if field.required && !editing && raw.is_empty() {
			return Err(ValidationError::MissingField(field.label));
		}

		let value = match field.check {
			Check::Flag if editing && raw.is_empty() => continue,
			Check::Flag => FieldValue::Flag(resolve_flag(Some(raw))?),
			Check::Any => FieldValue::Text(raw.to_string()),
		};
		staged.push((field.field, value));
	}

	for (field, value) in staged {
		session.set(field, value);
	}
	Ok(())
}

fn session_cell(session: &PendingSession, field: &str) -> Option<Cell> {
	match session.get(field)? {
		FieldValue::Text(text) => Some(Cell::Text(text.clone())),
		FieldValue::Flag(flag) => Some(Cell::Flag(*flag)),
	}
}

/// Fresh row in column order; unvisited fields are blank, flags default to false.
fn assemble_row(table: Table, session: &PendingSession) -> Row {
	table
		.columns()
		.iter()
		.map(|column| {
			session_cell(session, column.field).unwrap_or(if column.flag { Cell::Flag(false) } else { Cell::empty() })
		})
		.collect()
}

/// Existing row with every non-blank session answer laid over it.
fn merge_row(table: Table, session: &PendingSession, existing: Row) -> Row {
	let existing = table.normalize(existing);
	table
		.columns()
		.iter()
		.zip(existing)
		.map(|(column, old)| match session_cell(session, column.field) {
			Some(cell) if !cell.is_blank() => cell,
			_ => old,
		})
		.collect()
}
