use log::info;
use serenity::all::{Context, EventHandler, GuildId, Interaction, Ready};
use serenity::async_trait;

use crate::commands::Commands;
use crate::events::{interaction_event, ready_event};
use crate::utils::client::Components;

pub struct Router {
	commands: Commands,
	components: Components,
}

impl Router {
	pub fn new(components: Components) -> Self {
		Self {
			commands: Commands::new(),
			components,
		}
	}
}

#[async_trait]
impl EventHandler for Router {
	async fn ready(&self, ctx: Context, data_about_bot: Ready) {
		info!("Ready event start");
		ready_event::execute(ctx, data_about_bot, &self.commands, &self.components).await;
		info!("Ready event end");
	}

	async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
		ready_event::log_guilds(&ctx, &guilds);
	}

	async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
		interaction_event::execute(ctx, interaction, &self.commands, &self.components).await;
	}
}
