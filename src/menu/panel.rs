use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, CreateEmbed};

use crate::menu::custom_id::{CustomId, PanelAction};
use crate::sheets::Table;
use crate::utils::color;

fn button(id: CustomId, label: &str, style: ButtonStyle) -> CreateButton {
	CreateButton::new(id.to_string()).label(label).style(style)
}

/// The persistent panel posted by `create_sheet_menu`.
pub fn management_panel() -> (CreateEmbed, Vec<CreateActionRow>) {
	let embed = CreateEmbed::new()
		.title("Sheet Management")
		.description("Manage the Masterlist, or open the Watchlist tools.")
		.color(color::normal_color());

	let buttons = vec![
		button(CustomId::Panel(PanelAction::Add), "Add", ButtonStyle::Success),
		button(CustomId::Panel(PanelAction::Remove), "Remove", ButtonStyle::Danger),
		button(CustomId::Panel(PanelAction::Edit), "Edit", ButtonStyle::Primary),
		button(CustomId::Panel(PanelAction::Watchlist), "Watchlist", ButtonStyle::Secondary),
	];

	(embed, vec![CreateActionRow::Buttons(buttons)])
}

pub fn watch_panel() -> (CreateEmbed, Vec<CreateActionRow>) {
	let embed = CreateEmbed::new()
		.title("Watchlist")
		.description("Add, remove or edit a Watchlist entry.")
		.color(color::warning_color());

	let buttons = vec![
		button(CustomId::Watch(PanelAction::Add), "Add", ButtonStyle::Success),
		button(CustomId::Watch(PanelAction::Remove), "Remove", ButtonStyle::Danger),
		button(CustomId::Watch(PanelAction::Edit), "Edit", ButtonStyle::Primary),
	];

	(embed, vec![CreateActionRow::Buttons(buttons)])
}

/// The table a panel button works on.
pub fn panel_table(id: CustomId) -> Option<Table> {
	match id {
		CustomId::Panel(_) => Some(Table::Masterlist),
		CustomId::Watch(_) => Some(Table::Watchlist),
		_ => None,
	}
}
