use log::info;
use serenity::all::{
	CommandDataOption, CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::async_trait;

use crate::command_define::{BaseCommand, Command};
use crate::menu::panel;
use crate::utils::client::Components;
use crate::utils::convert::format_discord_username;

pub struct CreateSheetMenuCommand;

impl BaseCommand for CreateSheetMenuCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"create_sheet_menu".into()
	}

	fn get_description(&self) -> String {
		"Posts the sheet management panel in this channel".into()
	}
}

#[async_trait]
impl Command for CreateSheetMenuCommand {
	async fn execute(
		&self,
		ctx: Context,
		command: CommandInteraction,
		_: Vec<CommandDataOption>,
		_: &Components,
	) -> serenity::Result<()> {
		let (embed, rows) = panel::management_panel();
		command
			.create_response(
				&ctx.http,
				CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed).components(rows)),
			)
			.await?;

		info!("{} posted the management panel in {}", format_discord_username(&command.user), command.channel_id);
		Ok(())
	}
}
