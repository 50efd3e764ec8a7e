use serenity::all::{
	CommandDataOption, CommandInteraction, CommandOptionType, Context, CreateEmbed, CreateInteractionResponse,
	CreateInteractionResponseMessage, EditInteractionResponse, InteractionResponseFlags,
};
use serenity::async_trait;

use crate::audit::AuditEntry;
use crate::command_define::{integer_arg, BaseCommand, Command};
use crate::menu::view;
use crate::utils::client::Components;
use crate::utils::{color, convert};

const PARAMS: [(&str, &str, CommandOptionType, bool); 1] =
	[("limit", "How many entries to show (default 10)", CommandOptionType::Integer, false)];

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 25;

pub struct UpdatesCommand;

impl BaseCommand for UpdatesCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"updates".into()
	}

	fn get_description(&self) -> String {
		"Shows the most recent Update Sheet entries".into()
	}
}

fn updates_embed(entries: &[AuditEntry]) -> CreateEmbed {
	let lines: Vec<String> = entries
		.iter()
		.rev()
		.map(|entry| format!("`{}` **{}**: {}", entry.date, entry.actor, entry.description))
		.collect();

	CreateEmbed::new()
		.title("Recent updates")
		.description(if lines.is_empty() { "Nothing logged yet.".to_string() } else { convert::clip(&lines.join("\n"), 4096) })
		.color(color::normal_color())
}

#[async_trait]
impl Command for UpdatesCommand {
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
		let limit = integer_arg(&args, "limit").unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize;
		command
			.create_response(
				&ctx.http,
				CreateInteractionResponse::Defer(
					CreateInteractionResponseMessage::new().flags(InteractionResponseFlags::EPHEMERAL),
				),
			)
			.await?;

		let embed = match components.get_roster().log().recent(limit).await {
			Ok(entries) => updates_embed(&entries),
			Err(error) => view::failure_embed(format!("❌ Error: {}", error)),
		};
		command.edit_response(&ctx.http, EditInteractionResponse::new().embed(embed)).await?;

		Ok(())
	}
}
