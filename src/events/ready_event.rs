use std::sync::Arc;

use log::{error, info, warn};
use serenity::all::{ActivityData, Command as ApplicationCommand, GuildId};
use serenity::client::Context;
use serenity::model::gateway::Ready;

use crate::commands::Commands;
use crate::utils::client::Components;
use crate::wizard::spawn_sweeper;

/// Names the guilds once the cache has them; `ready` only carries ids.
pub fn log_guilds(ctx: &Context, guilds: &[GuildId]) {
	for id in guilds {
		match ctx.cache.guild(*id).map(|guild| (guild.name.clone(), guild.member_count)) {
			Some((name, members)) => info!("connected to {} ({}, {} members)", name, id, members),
			None => warn!("guild {} is not cached", id),
		}
	}
}

pub async fn execute(ctx: Context, data_about_bot: Ready, commands: &Commands, components: &Components) {
	ctx.dnd();
	ctx.set_activity(Some(ActivityData::playing("Starting...")));

	info!("Logged in as {}", data_about_bot.user.name);
	if data_about_bot.guilds.is_empty() {
		warn!("Bot is not in any guilds!");
	}
	for guild in &data_about_bot.guilds {
		info!("guild id: {}", guild.id);
	}

	register_commands(&ctx, commands, components).await;
	start_sweeper(components);

	ctx.online();
	ctx.set_activity(Some(ActivityData::playing("/warden")));
}

async fn register_commands(ctx: &Context, commands: &Commands, components: &Components) {
	let root = commands.app_commands_build();
	let res = match components.get_config().get_guild_id() {
		Some(guild_id) => GuildId::new(guild_id).set_commands(&ctx.http, vec![root]).await,
		None => ApplicationCommand::set_global_commands(&ctx.http, vec![root]).await,
	};

	match res {
		Ok(registered) => {
			for command in registered {
				info!("registered /{} ({})", command.name, command.id);
			}
		},
		Err(error) => error!("command registration failed: {}", error),
	}
}

fn start_sweeper(components: &Components) {
	let session = components.get_config().get_session();
	if session.ttl().is_none() || !components.claim_sweeper() {
		return;
	}

	let sessions = Arc::clone(components.get_wizard().sessions());
	spawn_sweeper(sessions, session.sweep_every(), components.get_shutdown().clone());
	info!("session sweeper started, ttl {}s", session.ttl_secs);
}
