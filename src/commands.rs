use log::{debug, error};
use serenity::all::{CommandDataOption, CommandDataOptionValue, CommandInteraction};
use serenity::builder::CreateCommand;
use serenity::client::Context;

use crate::command_define::{BaseCommand, Command};
use crate::commands::create_sheet_menu::CreateSheetMenuCommand;
use crate::commands::find::FindCommand;
use crate::commands::ping::PingCommand;
use crate::commands::updates::UpdatesCommand;
use crate::commands::watch_check::WatchCheckCommand;
use crate::utils::client::Components;
use crate::utils::convert::format_discord_username;

mod create_sheet_menu;
mod find;
mod ping;
mod updates;
mod watch_check;

pub const ROOT_COMMAND: &str = "warden";

/// The subcommands of `/warden`.
pub struct Commands {
	commands: Vec<Box<dyn Command + Sync + Send>>,
}

impl Commands {
	pub fn new() -> Self {
		Self {
			commands: vec![
				PingCommand::new().to_box(),
				CreateSheetMenuCommand::new().to_box(),
				FindCommand::new().to_box(),
				WatchCheckCommand::new().to_box(),
				UpdatesCommand::new().to_box(),
			],
		}
	}

	pub fn app_commands_build(&self) -> CreateCommand {
		self.commands.iter().fold(
			CreateCommand::new(ROOT_COMMAND).description("Roster sheet tools"),
			|root, cmd| root.add_option(cmd.command_build()),
		)
	}

	pub async fn interaction_route(&self, ctx: Context, command: CommandInteraction, components: &Components) {
		debug!("\ncommandID: {}\nname: {}", command.id, command.data.name);
		for option in &command.data.options {
			debug!("option name: {}", option.name);
		}

		if command.user.bot {
			return;
		}

		let res = match command.data.name.as_str() {
			ROOT_COMMAND => self.root_commands_route(ctx, command, components).await,
			_ => {
				error!("No Exist Command!");
				Ok(())
			},
		};
		if let Err(error) = res {
			error!("{}", error);
		}
	}

	async fn root_commands_route(
		&self,
		ctx: Context,
		command: CommandInteraction,
		components: &Components,
	) -> serenity::Result<()> {
		if command.data.options.len() != 1 {
			error!("Command option length is not 1.");
			return Ok(());
		}

		let sub_command: CommandDataOption = command.data.options[0].clone();
		let CommandDataOptionValue::SubCommand(args) = sub_command.value else {
			error!("{} is not a subcommand", sub_command.name);
			return Ok(());
		};

		let Some(cmd) = self.commands.iter().find(|cmd| cmd.get_name() == sub_command.name) else {
			error!("No Exist Command!");
			return Ok(());
		};

		debug!("{} ran /{} {}", format_discord_username(&command.user), ROOT_COMMAND, sub_command.name);
		cmd.execute(ctx, command, args, components).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn subcommand_names_are_unique_and_valid() {
		let commands = Commands::new();
		let mut names: Vec<String> = commands.commands.iter().map(|cmd| cmd.get_name()).collect();
		for name in &names {
			assert!(name.len() <= 32 && name.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{}", name);
		}
		names.sort();
		names.dedup();
		assert_eq!(names.len(), commands.commands.len());
	}
}
