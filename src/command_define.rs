use serenity::{
	all::{
		CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType, Context, CreateCommandOption,
		CreateInteractionResponse, CreateInteractionResponseMessage,
	},
	async_trait,
};

use crate::error::ValidationError;
use crate::menu::view;
use crate::utils::client::Components;
use crate::wizard::NAME_LABEL;

pub trait BaseCommand {
	fn new() -> Self
	where
		Self: Sized;

	fn get_name(&self) -> String;
	fn get_description(&self) -> String;

	fn to_box(self) -> Box<Self>
	where
		Self: Sized, {
		Box::new(self)
	}
}

/*
Params are (name, description, type, required)
*/
const PARAMS: [(&str, &str, CommandOptionType, bool); 0] = [];

#[async_trait]
pub trait Command: BaseCommand {
	fn args_param(&self) -> &'static [(&'static str, &'static str, CommandOptionType, bool)] {
		&PARAMS
	}

	fn build_args(&self, option: CreateCommandOption) -> CreateCommandOption {
		let mut option = option;

		for (name, desc, option_type, req) in self.args_param() {
			option = option.add_sub_option(CreateCommandOption::new(*option_type, *name, *desc).required(*req));
		}

		option
	}

	async fn execute(
		&self,
		ctx: Context,
		command: CommandInteraction,
		args: Vec<CommandDataOption>,
		components: &Components,
	) -> serenity::Result<()>;

	fn command_build(&self) -> CreateCommandOption {
		let res = CreateCommandOption::new(CommandOptionType::SubCommand, self.get_name(), self.get_description());

		self.build_args(res)
	}
}

pub fn string_arg(args: &[CommandDataOption], name: &str) -> Option<String> {
	args.iter().find(|arg| arg.name == name).and_then(|arg| match &arg.value {
		CommandDataOptionValue::String(value) => Some(value.trim().to_string()),
		_ => None,
	})
}

pub fn integer_arg(args: &[CommandDataOption], name: &str) -> Option<i64> {
	args.iter().find(|arg| arg.name == name).and_then(|arg| match arg.value {
		CommandDataOptionValue::Integer(value) => Some(value),
		_ => None,
	})
}

/// Answers a lookup whose name argument came through blank.
pub async fn reply_name_required(ctx: &Context, command: &CommandInteraction) -> serenity::Result<()> {
	let notice = view::notice_embed(ValidationError::MissingField(NAME_LABEL).to_string());
	command
		.create_response(
			&ctx.http,
			CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(notice).ephemeral(true)),
		)
		.await
}
