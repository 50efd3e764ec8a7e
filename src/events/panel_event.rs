use log::{error, info};
use serenity::all::{
	ComponentInteraction, CreateInteractionResponse, CreateInteractionResponseMessage, InteractionResponseFlags,
	ModalInteraction,
};
use serenity::client::Context;

use crate::error::{ValidationError, WizardError};
use crate::events::interaction_event::actor;
use crate::events::wizard_event::error_embed;
use crate::menu::{panel, view, CustomId, PanelAction};
use crate::utils::client::Components;
use crate::wizard::{WizardKind, NAME_LABEL};

/// Buttons on the management panel and the watchlist sub-panel.
pub async fn button(
	ctx: &Context,
	mc: &ComponentInteraction,
	id: CustomId,
	components: &Components,
) -> serenity::Result<()> {
	let (CustomId::Panel(action) | CustomId::Watch(action)) = id else {
		return Ok(());
	};
	let Some(table) = panel::panel_table(id) else {
		return Ok(());
	};

	let response = match action {
		PanelAction::Add => match WizardKind::for_table(table, false) {
			Some(kind) => {
				let prompt = components.get_wizard().begin(&actor(&mc.user), kind).await;
				view::prompt_message(&prompt)
			},
			None => return Ok(()),
		},
		PanelAction::Remove => CreateInteractionResponse::Modal(view::key_modal(CustomId::Remove(table), table)),
		PanelAction::Edit => CreateInteractionResponse::Modal(view::key_modal(CustomId::Edit(table), table)),
		PanelAction::Watchlist => {
			let (embed, rows) = panel::watch_panel();
			CreateInteractionResponse::Message(
				CreateInteractionResponseMessage::new()
					.embed(embed)
					.components(rows)
					.flags(InteractionResponseFlags::EPHEMERAL),
			)
		},
	};

	mc.create_response(&ctx.http, response).await
}

/// The name typed into a remove or edit modal.
pub async fn key_submitted(
	ctx: &Context,
	modal: &ModalInteraction,
	id: CustomId,
	components: &Components,
) -> serenity::Result<()> {
	modal
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Defer(
				CreateInteractionResponseMessage::new().flags(InteractionResponseFlags::EPHEMERAL),
			),
		)
		.await?;

	let values = view::modal_values(&modal.data);
	let key = values.get(view::KEY_INPUT).map(|key| key.trim()).unwrap_or_default();
	let actor = actor(&modal.user);

	let edit = if key.is_empty() {
		view::outcome_edit(error_embed(&WizardError::from(ValidationError::MissingField(NAME_LABEL))))
	} else {
		match id {
			CustomId::Remove(table) => match components.get_roster().remove(table, key, &actor.handle).await {
				Ok(message) => {
					info!("{}", message);
					view::outcome_edit(view::success_embed(message))
				},
				Err(error) => {
					error!("{} could not remove {} from {}: {}", actor.handle, key, table, error);
					view::outcome_edit(error_embed(&error))
				},
			},
			CustomId::Edit(table) => {
				let Some(kind) = WizardKind::for_table(table, true) else {
					return Ok(());
				};
				match components.get_wizard().begin_edit(&actor, kind, key).await {
					Ok(prompt) => view::prompt_edit(&prompt),
					Err(error) => view::outcome_edit(error_embed(&error)),
				}
			},
			_ => return Ok(()),
		}
	};

	modal.edit_response(&ctx.http, edit).await?;
	Ok(())
}
