use log::{debug, error};
use serenity::all::{Interaction, User};
use serenity::client::Context;

use crate::commands::Commands;
use crate::events::{panel_event, wizard_event};
use crate::menu::CustomId;
use crate::utils::client::Components;
use crate::utils::convert::format_discord_username;
use crate::wizard::Actor;

pub(crate) fn actor(user: &User) -> Actor {
	Actor {
		id: user.id.get(),
		handle: format_discord_username(user),
	}
}

/// Single entry point for slash commands, component clicks and modal submits.
pub async fn execute(ctx: Context, interaction: Interaction, commands: &Commands, components: &Components) {
	let res = match interaction {
		Interaction::Command(command) => {
			commands.interaction_route(ctx, command, components).await;
			Ok(())
		},
		Interaction::Component(mc) => {
			debug!("\nmcID: {}\nmcType: {:?}\nmcCustomID: {}", mc.id, mc.data.kind, mc.data.custom_id);
			match CustomId::parse(&mc.data.custom_id) {
				Some(id @ (CustomId::Panel(_) | CustomId::Watch(_))) => {
					panel_event::button(&ctx, &mc, id, components).await
				},
				Some(id @ (CustomId::Step { .. } | CustomId::Cancel(_))) => {
					wizard_event::component(&ctx, &mc, id, components).await
				},
				_ => {
					error!("unknown component id {}", mc.data.custom_id);
					Ok(())
				},
			}
		},
		Interaction::Modal(modal) => {
			debug!("\nmodalID: {}\nmodalCustomID: {}", modal.id, modal.data.custom_id);
			match CustomId::parse(&modal.data.custom_id) {
				Some(id @ (CustomId::Remove(_) | CustomId::Edit(_))) => {
					panel_event::key_submitted(&ctx, &modal, id, components).await
				},
				Some(id @ CustomId::Step { .. }) => wizard_event::modal_submitted(&ctx, &modal, id, components).await,
				_ => {
					error!("unknown modal id {}", modal.data.custom_id);
					Ok(())
				},
			}
		},
		_ => Ok(()),
	};

	if let Err(error) = res {
		error!("{}", error);
	}
}
