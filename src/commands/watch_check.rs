use serenity::all::{
	CommandDataOption, CommandInteraction, CommandOptionType, Context, CreateEmbed, CreateInteractionResponse,
	CreateInteractionResponseMessage, EditInteractionResponse, InteractionResponseFlags,
};
use serenity::async_trait;

use crate::command_define::{reply_name_required, string_arg, BaseCommand, Command};
use crate::menu::view;
use crate::sheets::table::WatchEntry;
use crate::utils::client::Components;
use crate::utils::convert::{self, or_dash};
use crate::utils::color;

const PARAMS: [(&str, &str, CommandOptionType, bool); 1] =
	[("name", "In-game name to check", CommandOptionType::String, true)];

pub struct WatchCheckCommand;

impl BaseCommand for WatchCheckCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"watch_check".into()
	}

	fn get_description(&self) -> String {
		"Checks whether a player is on the Watchlist".into()
	}
}

/// Banned and blacklisted players are shown in red, anything else watched in yellow.
fn entry_embed(entry: &WatchEntry) -> CreateEmbed {
	let severe = ["banned", "blacklisted"].contains(&entry.status.to_lowercase().as_str());
	let mut embed = CreateEmbed::new()
		.title(format!("{} is on the Watchlist", entry.name))
		.field("Status", or_dash(&entry.status), true)
		.field("Since", or_dash(&entry.status_date), true)
		.field("Reason", or_dash(&entry.reason), true)
		.field("Action by", or_dash(&entry.actor), true)
		.color(if severe { color::failed_color() } else { color::warning_color() });

	for (name, value) in [
		("Guild", &entry.guild),
		("House", &entry.house),
		("Discord ID", &entry.discord_id),
		("Alts", &entry.alts),
	] {
		if !value.is_empty() {
			embed = embed.field(name, convert::clip(value, 1024), true);
		}
	}
	if !entry.notes.is_empty() {
		embed = embed.field("Notes", convert::clip(&entry.notes, 1024), false);
	}
	if !entry.screenshot.is_empty() {
		embed = embed.field("Evidence", convert::clip(&entry.screenshot, 1024), false);
	}

	embed
}

#[async_trait]
impl Command for WatchCheckCommand {
	fn args_param(&self) -> &'static [(&'static str, &'static str, CommandOptionType, bool)] {
		&PARAMS
	}

	async fn execute(
		&self,
		ctx: Context,
		command: CommandInteraction,
		args: Vec<CommandDataOption>,
		components: &Components,
	) -> serenity::Result<()> {
		let name = string_arg(&args, "name").unwrap_or_default();
		if name.is_empty() {
			return reply_name_required(&ctx, &command).await;
		}
		command
			.create_response(
				&ctx.http,
				CreateInteractionResponse::Defer(
					CreateInteractionResponseMessage::new().flags(InteractionResponseFlags::EPHEMERAL),
				),
			)
			.await?;

		let embed = match components.get_roster().find_watch(&name).await {
			Ok(Some(entry)) => entry_embed(&entry),
			Ok(None) => view::success_embed(format!("{} is not on the Watchlist.", name)),
			Err(error) => view::failure_embed(format!("❌ Error: {}", error)),
		};
		command.edit_response(&ctx.http, EditInteractionResponse::new().embed(embed)).await?;

		Ok(())
	}
}
