//! Wizards as data: each kind is an ordered list of step descriptors.

use crate::sheets::table::{
	F_ACTOR, F_ALTS, F_DISCORD_ID, F_GUILD, F_HOUSE, F_JOIN_DATE, F_NAME, F_NOTES, F_RANK, F_REASON, F_SCREENSHOT,
	F_STATUS, F_STATUS_DATE, F_SUSPICIOUS,
};
use crate::sheets::Table;

pub const DATE_TODAY: &str = "today";
pub const DATE_YESTERDAY: &str = "yesterday";
pub const DATE_CUSTOM: &str = "custom";
/// Edit wizards only: keep whatever the row already holds.
pub const UNCHANGED: &str = "unchanged";
pub const NAME_LABEL: &str = "In-game name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardKind {
	AddMember,
	EditMember,
	AddWatch,
	EditWatch,
}

impl WizardKind {
	pub fn table(&self) -> Table {
		match self {
			WizardKind::AddMember | WizardKind::EditMember => Table::Masterlist,
			WizardKind::AddWatch | WizardKind::EditWatch => Table::Watchlist,
		}
	}

	pub fn is_edit(&self) -> bool {
		matches!(self, WizardKind::EditMember | WizardKind::EditWatch)
	}

	pub fn steps(&self) -> &'static [Step] {
		match self.table() {
			Table::Watchlist => &WATCH_STEPS,
			_ => &ROSTER_STEPS,
		}
	}

	pub fn title(&self) -> &'static str {
		match self {
			WizardKind::AddMember => "Add to Masterlist",
			WizardKind::EditMember => "Edit Masterlist entry",
			WizardKind::AddWatch => "Add to Watchlist",
			WizardKind::EditWatch => "Edit Watchlist entry",
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			WizardKind::AddMember => "am",
			WizardKind::EditMember => "em",
			WizardKind::AddWatch => "aw",
			WizardKind::EditWatch => "ew",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"am" => Some(WizardKind::AddMember),
			"em" => Some(WizardKind::EditMember),
			"aw" => Some(WizardKind::AddWatch),
			"ew" => Some(WizardKind::EditWatch),
			_ => None,
		}
	}

	pub fn for_table(table: Table, edit: bool) -> Option<Self> {
		match (table, edit) {
			(Table::Masterlist, false) => Some(WizardKind::AddMember),
			(Table::Masterlist, true) => Some(WizardKind::EditMember),
			(Table::Watchlist, false) => Some(WizardKind::AddWatch),
			(Table::Watchlist, true) => Some(WizardKind::EditWatch),
			(Table::Updates, _) => None,
		}
	}
}

#[derive(Debug)]
pub struct Step {
	pub title: &'static str,
	pub kind: StepKind,
}

#[derive(Debug)]
pub enum StepKind {
	/// One pick from a list, written to `field`.
	Choice { field: &'static str, options: Options },
	/// Today / Yesterday / a typed `MM/DD/YYYY` date.
	Date { field: &'static str },
	/// A text form submitted in one go. Discord allows five inputs per form.
	Form { fields: &'static [FormField] },
}

#[derive(Debug)]
pub enum Options {
	Fixed(&'static [&'static str]),
	/// The officer names from the alias table.
	Officers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
	Any,
	Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct FormField {
	pub field: &'static str,
	pub label: &'static str,
	pub placeholder: &'static str,
	pub required: bool,
	pub long: bool,
	pub check: Check,
}

const fn input(field: &'static str, label: &'static str, placeholder: &'static str) -> FormField {
	FormField {
		field,
		label,
		placeholder,
		required: false,
		long: false,
		check: Check::Any,
	}
}

const fn name_input() -> FormField {
	FormField {
		required: true,
		..input(F_NAME, NAME_LABEL, "Exact in-game name")
	}
}

const fn notes_input() -> FormField {
	FormField {
		long: true,
		..input(F_NOTES, "Notes", "Anything officers should know")
	}
}

pub const MEMBER_STATUSES: [&str; 6] = ["Active-Main", "Active-Alt", "Inactive", "Kicked", "Left", "Banned"];
pub const RANKS: [&str; 5] = ["1 - Guild Master", "2 - Officer", "3 - Veteran", "4 - Member", "5 - Lost Soul"];
pub const WATCH_STATUSES: [&str; 4] = ["Watching", "Banned", "Blacklisted", "Cleared"];
pub const WATCH_REASONS: [&str; 6] = ["Toxicity", "Scamming", "Griefing", "Cheating", "Harassment", "Other"];

static ROSTER_FORM: [FormField; 5] = [
	name_input(),
	input(F_DISCORD_ID, "Discord ID", "e.g. 123456789012345678"),
	input(F_ALTS, "Known alts", "Comma separated"),
	input(F_HOUSE, "House", ""),
	notes_input(),
];

static ROSTER_FLAG_FORM: [FormField; 1] = [FormField {
	check: Check::Flag,
	..input(F_SUSPICIOUS, "Suspicious? (Yes / No)", "Leave empty for No")
}];

static ROSTER_STEPS: [Step; 5] = [
	Step {
		title: "Member status",
		kind: StepKind::Choice {
			field: F_STATUS,
			options: Options::Fixed(&MEMBER_STATUSES),
		},
	},
	Step {
		title: "Join date",
		kind: StepKind::Date { field: F_JOIN_DATE },
	},
	Step {
		title: "Rank",
		kind: StepKind::Choice {
			field: F_RANK,
			options: Options::Fixed(&RANKS),
		},
	},
	Step {
		title: "Player details",
		kind: StepKind::Form { fields: &ROSTER_FORM },
	},
	Step {
		title: "Suspicious flag",
		kind: StepKind::Form {
			fields: &ROSTER_FLAG_FORM,
		},
	},
];

static WATCH_FORM: [FormField; 5] = [
	name_input(),
	input(F_GUILD, "Guild", "Current guild, if any"),
	input(F_ALTS, "Known alts", "Comma separated"),
	input(F_DISCORD_ID, "Discord ID", "e.g. 123456789012345678"),
	input(F_HOUSE, "House", ""),
];

static WATCH_EVIDENCE_FORM: [FormField; 2] = [notes_input(), input(F_SCREENSHOT, "Screenshot", "Link to the evidence")];

static WATCH_STEPS: [Step; 6] = [
	Step {
		title: "Watch status",
		kind: StepKind::Choice {
			field: F_STATUS,
			options: Options::Fixed(&WATCH_STATUSES),
		},
	},
	Step {
		title: "Status date",
		kind: StepKind::Date { field: F_STATUS_DATE },
	},
	Step {
		title: "Reason",
		kind: StepKind::Choice {
			field: F_REASON,
			options: Options::Fixed(&WATCH_REASONS),
		},
	},
	Step {
		title: "Action by",
		kind: StepKind::Choice {
			field: F_ACTOR,
			options: Options::Officers,
		},
	},
	Step {
		title: "Player details",
		kind: StepKind::Form { fields: &WATCH_FORM },
	},
	Step {
		title: "Notes and evidence",
		kind: StepKind::Form {
			fields: &WATCH_EVIDENCE_FORM,
		},
	},
];

#[cfg(test)]
mod tests {
	use super::*;

	const ALL: [WizardKind; 4] = [
		WizardKind::AddMember,
		WizardKind::EditMember,
		WizardKind::AddWatch,
		WizardKind::EditWatch,
	];

	#[test]
	fn kinds_round_trip_through_their_ids() {
		for kind in ALL {
			assert_eq!(WizardKind::parse(kind.as_str()), Some(kind));
			assert_eq!(WizardKind::for_table(kind.table(), kind.is_edit()), Some(kind));
		}
	}

	#[test]
	fn definitions_fit_discord_component_limits() {
		for kind in ALL {
			for step in kind.steps() {
				match &step.kind {
					StepKind::Form { fields } => assert!((1..=5).contains(&fields.len()), "{}", step.title),
					StepKind::Choice {
						options: Options::Fixed(options),
						..
					} => assert!(options.len() < 25, "{}", step.title),
					_ => {},
				}
			}
		}
	}

	#[test]
	fn every_wizard_ends_in_a_form_and_fills_table_columns() {
		for kind in ALL {
			let steps = kind.steps();
			assert!(matches!(steps.last().unwrap().kind, StepKind::Form { .. }));

			let mut fields = vec![];
			for step in steps {
				match &step.kind {
					StepKind::Choice { field, .. } | StepKind::Date { field } => fields.push(*field),
					StepKind::Form { fields: inputs } => fields.extend(inputs.iter().map(|f| f.field)),
				}
			}
			for column in kind.table().columns() {
				assert!(fields.contains(&column.field), "{:?} never asks for {}", kind, column.field);
			}
		}
	}
}
