use std::collections::HashMap;

use serenity::all::{
	ActionRowComponent, ButtonStyle, ComponentInteractionData, ComponentInteractionDataKind, CreateActionRow,
	CreateButton, CreateEmbed, CreateEmbedFooter, CreateInputText, CreateInteractionResponse, CreateInteractionResponseMessage,
	CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditInteractionResponse,
	InputTextStyle, InteractionResponseFlags, ModalInteractionData,
};

use crate::menu::custom_id::{CustomId, StepAction};
use crate::sheets::Table;
use crate::utils::{color, convert};
use crate::wizard::{Prompt, PromptBody};

pub const KEY_INPUT: &str = "key";
pub const DATE_INPUT: &str = "date";

fn step_id(prompt: &Prompt, action: StepAction) -> String {
	CustomId::Step {
		kind: prompt.kind,
		step: prompt.step,
		action,
	}
	.to_string()
}

fn prompt_embed(prompt: &Prompt) -> CreateEmbed {
	let mut embed = CreateEmbed::new()
		.title(format!("{} ({}/{})", prompt.kind.title(), prompt.step + 1, prompt.total))
		.description(format!("**{}**", prompt.title))
		.color(if prompt.notice.is_some() { color::warning_color() } else { color::normal_color() });

	if let Some(target) = &prompt.target {
		embed = embed.field("Editing", target, true);
	}
	if let PromptBody::Form { fields } = &prompt.body {
		let listed: Vec<String> = fields
			.iter()
			.map(|f| if f.required { format!("{} *", f.label) } else { f.label.to_string() })
			.collect();
		embed = embed.field("Fields", listed.join("\n"), false);
	}
	if let Some(notice) = &prompt.notice {
		embed = embed.field("Try again", convert::clip(notice, 1024), false);
	}
	if prompt.kind.is_edit() {
		embed = embed.footer(CreateEmbedFooter::new("Anything left empty keeps its current value"));
	}

	embed
}

fn prompt_components(prompt: &Prompt) -> Vec<CreateActionRow> {
	let cancel = CreateButton::new(CustomId::Cancel(prompt.kind).to_string())
		.label("Cancel")
		.style(ButtonStyle::Secondary);

	match &prompt.body {
		PromptBody::Select { options } => {
			let options = options
				.iter()
				.take(25)
				.map(|option| CreateSelectMenuOption::new(convert::clip(&option.label, 100), option.value.clone()))
				.collect();
			let menu = CreateSelectMenu::new(step_id(prompt, StepAction::Pick), CreateSelectMenuKind::String { options })
				.placeholder(prompt.title);

			vec![CreateActionRow::SelectMenu(menu), CreateActionRow::Buttons(vec![cancel])]
		},
		PromptBody::Form { .. } => {
			let open = CreateButton::new(step_id(prompt, StepAction::Open))
				.label("Continue")
				.style(ButtonStyle::Primary);

			vec![CreateActionRow::Buttons(vec![open, cancel])]
		},
	}
}

/// First prompt of a wizard, sent as a new ephemeral message.
pub fn prompt_message(prompt: &Prompt) -> CreateInteractionResponse {
	CreateInteractionResponse::Message(
		CreateInteractionResponseMessage::new()
			.embed(prompt_embed(prompt))
			.components(prompt_components(prompt))
			.flags(InteractionResponseFlags::EPHEMERAL),
	)
}

/// Replaces the wizard message with `prompt`.
pub fn prompt_update(prompt: &Prompt) -> CreateInteractionResponse {
	CreateInteractionResponse::UpdateMessage(
		CreateInteractionResponseMessage::new()
			.embed(prompt_embed(prompt))
			.components(prompt_components(prompt)),
	)
}

/// Same as [`prompt_update`], for interactions that were already deferred.
pub fn prompt_edit(prompt: &Prompt) -> EditInteractionResponse {
	EditInteractionResponse::new()
		.embed(prompt_embed(prompt))
		.components(prompt_components(prompt))
}

pub fn form_modal(prompt: &Prompt) -> Option<CreateModal> {
	let PromptBody::Form { fields } = &prompt.body else {
		return None;
	};

	let rows = fields
		.iter()
		.map(|field| {
			let style = if field.long { InputTextStyle::Paragraph } else { InputTextStyle::Short };
			let mut input = CreateInputText::new(style, field.label, field.field).required(field.required);
			if !field.placeholder.is_empty() {
				input = input.placeholder(field.placeholder);
			}
			CreateActionRow::InputText(input)
		})
		.collect();

	Some(
		CreateModal::new(step_id(prompt, StepAction::Form), format!("{} ({}/{})", prompt.title, prompt.step + 1, prompt.total))
			.components(rows),
	)
}

pub fn date_modal(prompt: &Prompt) -> CreateModal {
	let input = CreateInputText::new(InputTextStyle::Short, "Date (MM/DD/YYYY)", DATE_INPUT)
		.placeholder(convert::today())
		.min_length(8)
		.max_length(10);

	CreateModal::new(step_id(prompt, StepAction::Date), prompt.title).components(vec![CreateActionRow::InputText(input)])
}

/// Asks for the in-game name of the row to remove or edit.
pub fn key_modal(id: CustomId, table: Table) -> CreateModal {
	let title = match id {
		CustomId::Remove(_) => format!("Remove from {}", table),
		_ => format!("Edit {} entry", table),
	};
	let input = CreateInputText::new(InputTextStyle::Short, "In-game name", KEY_INPUT).required(true);

	CreateModal::new(id.to_string(), title).components(vec![CreateActionRow::InputText(input)])
}

pub fn success_embed(text: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new().description(text).color(color::success_color())
}

pub fn failure_embed(text: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new().description(text).color(color::failed_color())
}

pub fn notice_embed(text: impl Into<String>) -> CreateEmbed {
	CreateEmbed::new().description(text).color(color::warning_color())
}

/// Final state of a wizard message: the outcome and no controls.
pub fn outcome_update(embed: CreateEmbed) -> CreateInteractionResponse {
	CreateInteractionResponse::UpdateMessage(CreateInteractionResponseMessage::new().embed(embed).components(vec![]))
}

pub fn outcome_edit(embed: CreateEmbed) -> EditInteractionResponse {
	EditInteractionResponse::new().embed(embed).components(vec![])
}

/// Text inputs of a submitted modal by custom id. Empty inputs come back as "".
pub fn modal_values(data: &ModalInteractionData) -> HashMap<String, String> {
	data.components
		.iter()
		.flat_map(|row| row.components.iter())
		.filter_map(|component| match component {
			ActionRowComponent::InputText(input) => {
				Some((input.custom_id.clone(), input.value.clone().unwrap_or_default()))
			},
			_ => None,
		})
		.collect()
}

pub fn selected_value(data: &ComponentInteractionData) -> Option<&str> {
	match &data.kind {
		ComponentInteractionDataKind::StringSelect { values } => values.first().map(String::as_str),
		_ => None,
	}
}
