use log::{debug, error, info};
use serenity::all::{ComponentInteraction, CreateEmbed, CreateInteractionResponse, EditInteractionResponse, ModalInteraction};
use serenity::client::Context;

use crate::error::WizardError;
use crate::events::interaction_event::actor;
use crate::menu::{view, CustomId, StepAction};
use crate::utils::client::Components;
use crate::wizard::Advance;

pub(crate) fn error_embed(error: &WizardError) -> CreateEmbed {
	match error {
		WizardError::Stale => view::notice_embed(error.to_string()),
		_ => view::failure_embed(format!("❌ Error: {}", error)),
	}
}

/// Select picks, Continue and Cancel buttons on a wizard message.
///
/// Answered with an in-place update of the wizard message, or with a modal.
pub async fn component(
	ctx: &Context,
	mc: &ComponentInteraction,
	id: CustomId,
	components: &Components,
) -> serenity::Result<()> {
	let wizard = components.get_wizard();
	let actor = actor(&mc.user);

	let response = match id {
		CustomId::Cancel(kind) => {
			wizard.cancel(&actor, kind).await;
			view::outcome_update(view::notice_embed("Cancelled, nothing was written."))
		},
		CustomId::Step {
			kind,
			step,
			action: StepAction::Pick,
		} => {
			let value = view::selected_value(&mc.data).unwrap_or_default();
			match wizard.choose(&actor, kind, step, value).await {
				Ok(Advance::Next(prompt) | Advance::Retry(prompt)) => view::prompt_update(&prompt),
				Ok(Advance::CustomDate(prompt)) => CreateInteractionResponse::Modal(view::date_modal(&prompt)),
				Ok(Advance::Done(completion)) => view::outcome_update(view::success_embed(completion.message)),
				Err(error) => view::outcome_update(error_embed(&error)),
			}
		},
		CustomId::Step {
			kind,
			step,
			action: StepAction::Open,
		} => match wizard.prompt(&actor, kind, step).await {
			Ok(prompt) => match view::form_modal(&prompt) {
				Some(modal) => CreateInteractionResponse::Modal(modal),
				None => view::outcome_update(error_embed(&WizardError::Stale)),
			},
			Err(error) => view::outcome_update(error_embed(&error)),
		},
		_ => return Ok(()),
	};

	mc.create_response(&ctx.http, response).await
}

/// Custom date and form submits. Acknowledged first, then the wizard message is edited.
pub async fn modal_submitted(
	ctx: &Context,
	modal: &ModalInteraction,
	id: CustomId,
	components: &Components,
) -> serenity::Result<()> {
	let CustomId::Step { kind, step, action } = id else {
		return Ok(());
	};
	modal.create_response(&ctx.http, CreateInteractionResponse::Acknowledge).await?;

	let wizard = components.get_wizard();
	let actor = actor(&modal.user);
	let values = view::modal_values(&modal.data);

	let advance = match action {
		StepAction::Date => {
			let text = values.get(view::DATE_INPUT).map(String::as_str).unwrap_or_default();
			wizard.enter_date(&actor, kind, step, text).await
		},
		StepAction::Form => wizard.submit_form(&actor, kind, step, &values).await,
		_ => return Ok(()),
	};

	modal.edit_response(&ctx.http, advance_edit(advance)).await?;
	Ok(())
}

fn advance_edit(advance: Result<Advance, WizardError>) -> EditInteractionResponse {
	match advance {
		Ok(Advance::Next(prompt) | Advance::Retry(prompt) | Advance::CustomDate(prompt)) => view::prompt_edit(&prompt),
		Ok(Advance::Done(completion)) => {
			info!("{}", completion.message);
			debug!("{} row: {:?}", completion.table, completion.row);
			view::outcome_edit(view::success_embed(completion.message))
		},
		Err(error) => {
			error!("wizard ended: {}", error);
			view::outcome_edit(error_embed(&error))
		},
	}
}
