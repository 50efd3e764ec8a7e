use std::fmt::Display;

use crate::sheets::Table;
use crate::wizard::WizardKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
	Add,
	Remove,
	Edit,
	/// Main panel only: opens the watchlist sub-panel.
	Watchlist,
}

impl PanelAction {
	fn as_str(&self) -> &'static str {
		match self {
			PanelAction::Add => "add",
			PanelAction::Remove => "remove",
			PanelAction::Edit => "edit",
			PanelAction::Watchlist => "watchlist",
		}
	}

	fn parse(value: &str) -> Option<Self> {
		match value {
			"add" => Some(PanelAction::Add),
			"remove" => Some(PanelAction::Remove),
			"edit" => Some(PanelAction::Edit),
			"watchlist" => Some(PanelAction::Watchlist),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
	/// Select menu pick for a choice or date step.
	Pick,
	/// Custom date modal submit.
	Date,
	/// Button that opens the step's form.
	Open,
	/// Form modal submit.
	Form,
}

impl StepAction {
	fn as_str(&self) -> &'static str {
		match self {
			StepAction::Pick => "pick",
			StepAction::Date => "date",
			StepAction::Open => "open",
			StepAction::Form => "form",
		}
	}

	fn parse(value: &str) -> Option<Self> {
		match value {
			"pick" => Some(StepAction::Pick),
			"date" => Some(StepAction::Date),
			"open" => Some(StepAction::Open),
			"form" => Some(StepAction::Form),
			_ => None,
		}
	}
}

/// Everything the bot puts in a component or modal `custom_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomId {
	Panel(PanelAction),
	Watch(PanelAction),
	/// Key entry modal for a removal.
	Remove(Table),
	/// Key entry modal that starts an edit wizard.
	Edit(Table),
	Step {
		kind: WizardKind,
		step: usize,
		action: StepAction,
	},
	Cancel(WizardKind),
}

impl CustomId {
	pub fn parse(value: &str) -> Option<Self> {
		let parts: Vec<&str> = value.split(':').collect();
		match parts.as_slice() {
			["panel", action] => PanelAction::parse(action).map(CustomId::Panel),
			["watch", action] => match PanelAction::parse(action)? {
				PanelAction::Watchlist => None,
				action => Some(CustomId::Watch(action)),
			},
			["remove", table] => Table::parse(table).filter(|t| *t != Table::Updates).map(CustomId::Remove),
			["edit", table] => Table::parse(table).filter(|t| *t != Table::Updates).map(CustomId::Edit),
			["wz", kind, "cancel"] => WizardKind::parse(kind).map(CustomId::Cancel),
			["wz", kind, step, action] => Some(CustomId::Step {
				kind: WizardKind::parse(kind)?,
				step: step.parse().ok()?,
				action: StepAction::parse(action)?,
			}),
			_ => None,
		}
	}
}

impl Display for CustomId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CustomId::Panel(action) => write!(f, "panel:{}", action.as_str()),
			CustomId::Watch(action) => write!(f, "watch:{}", action.as_str()),
			CustomId::Remove(table) => write!(f, "remove:{}", table.as_str()),
			CustomId::Edit(table) => write!(f, "edit:{}", table.as_str()),
			CustomId::Step { kind, step, action } => write!(f, "wz:{}:{}:{}", kind.as_str(), step, action.as_str()),
			CustomId::Cancel(kind) => write!(f, "wz:{}:cancel", kind.as_str()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn formats_the_documented_shapes() {
		let step = CustomId::Step {
			kind: WizardKind::EditWatch,
			step: 4,
			action: StepAction::Form,
		};
		assert_eq!(step.to_string(), "wz:ew:4:form");
		assert_eq!(CustomId::Cancel(WizardKind::AddMember).to_string(), "wz:am:cancel");
		assert_eq!(CustomId::Remove(Table::Watchlist).to_string(), "remove:watchlist");
		assert_eq!(CustomId::Panel(PanelAction::Watchlist).to_string(), "panel:watchlist");
	}

	#[test]
	fn parses_what_it_formats() {
		let ids = [
			CustomId::Panel(PanelAction::Add),
			CustomId::Watch(PanelAction::Edit),
			CustomId::Edit(Table::Masterlist),
			CustomId::Step {
				kind: WizardKind::AddMember,
				step: 1,
				action: StepAction::Date,
			},
			CustomId::Cancel(WizardKind::EditMember),
		];
		for id in ids {
			assert_eq!(CustomId::parse(&id.to_string()), Some(id));
		}
	}

	#[test]
	fn rejects_foreign_and_malformed_ids() {
		for id in [
			"",
			"conf_1_2",
			"watch:watchlist",
			"remove:updates",
			"wz:xx:0:pick",
			"wz:am:-1:pick",
			"wz:am:0:jump",
			"wz:am:0:pick:extra",
		] {
			assert_eq!(CustomId::parse(id), None, "{}", id);
		}
	}
}
