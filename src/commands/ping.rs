use log::error;
use serenity::all::{CommandDataOption, CommandInteraction, CreateInteractionResponse};
use serenity::async_trait;
use serenity::builder::{CreateEmbed, CreateInteractionResponseMessage, EditInteractionResponse};
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::utils::client::Components;
use crate::utils::color;

pub struct PingCommand;

impl BaseCommand for PingCommand {
	fn new() -> Self {
		Self {}
	}

	fn get_name(&self) -> String {
		"ping".into()
	}

	fn get_description(&self) -> String {
		"Measures the bot's response latency".into()
	}
}

impl PingCommand {
	async fn defer_res(&self, ctx: &Context, command: &CommandInteraction) -> serenity::Result<()> {
		command
			.create_response(&ctx.http, CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()))
			.await
	}

	async fn get_ping(&self, ctx: &Context, command: &CommandInteraction) -> i64 {
		match command.get_response(&ctx.http).await {
			Ok(command_res) => {
				command_res.timestamp.timestamp_millis() - command.id.created_at().timestamp_millis()
			},
			Err(error) => {
				error!("{}", error);
				-1
			},
		}
	}

	async fn send_result(&self, ctx: &Context, command: &CommandInteraction, ping: i64) -> serenity::Result<()> {
		command
			.edit_response(
				&ctx.http,
				EditInteractionResponse::new().add_embed(
					CreateEmbed::new()
						.title("Pong!")
						.description(format!("Latency is {}ms", ping))
						.color(color::normal_color()),
				),
			)
			.await?;

		Ok(())
	}
}

#[async_trait]
impl Command for PingCommand {
	async fn execute(
		&self,
		ctx: Context,
		command: CommandInteraction,
		_: Vec<CommandDataOption>,
		_: &Components,
	) -> serenity::Result<()> {
		let ctx = &ctx;
		let command = &command;
		self.defer_res(ctx, command).await?;

		self.send_result(ctx, command, self.get_ping(ctx, command).await).await
	}
}
