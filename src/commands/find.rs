use log::error;
use serenity::all::{
	CommandDataOption, CommandInteraction, CommandOptionType, Context, CreateEmbed, CreateInteractionResponse,
	CreateInteractionResponseMessage, EditInteractionResponse, InteractionResponseFlags,
};
use serenity::async_trait;

use crate::command_define::{reply_name_required, string_arg, BaseCommand, Command};
use crate::menu::view;
use crate::sheets::table::RosterRecord;
use crate::utils::client::Components;
use crate::utils::color;
use crate::utils::convert::or_dash;

const PARAMS: [(&str, &str, CommandOptionType, bool); 1] =
	[("name", "In-game name to look up", CommandOptionType::String, true)];

/// Looks a player up on the Masterlist.
pub struct FindCommand;

impl BaseCommand for FindCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"find".into()
	}

	fn get_description(&self) -> String {
		"Shows a player's Masterlist entry".into()
	}
}

fn record_embed(record: &RosterRecord, watched: bool) -> CreateEmbed {
	CreateEmbed::new()
		.title(&record.name)
		.field("Status", or_dash(&record.status), true)
		.field("Rank", or_dash(&record.rank), true)
		.field("Joined", or_dash(&record.join_date), true)
		.field("House", or_dash(&record.house), true)
		.field("Discord ID", or_dash(&record.discord_id), true)
		.field("Suspicious", if record.suspicious { "Yes" } else { "No" }, true)
		.field("Watchlist", if watched { "Listed" } else { "-" }, true)
		.field("Alts", or_dash(&record.alts), false)
		.field("Notes", or_dash(&record.notes), false)
		.color(if record.suspicious || watched { color::warning_color() } else { color::normal_color() })
}

#[async_trait]
impl Command for FindCommand {
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

		let roster = components.get_roster();
		let embed = match roster.find_member(&name).await {
			Ok(Some(record)) => {
				let watched = roster.is_watched(&record.name).await.unwrap_or_else(|error| {
					error!("watchlist lookup failed: {}", error);
					false
				});
				record_embed(&record, watched)
			},
			Ok(None) => view::notice_embed(format!("{} is not on the Masterlist.", name)),
			Err(error) => view::failure_embed(format!("❌ Error: {}", error)),
		};
		command.edit_response(&ctx.http, EditInteractionResponse::new().embed(embed)).await?;

		Ok(())
	}
}
