mod audit;
mod command_define;
mod commands;
mod configs;
mod error;
mod events;
mod menu;
mod roster;
mod sheets;
mod utils;
mod wizard;

use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use serenity::all::GatewayIntents;
use serenity::Client;
use tokio_util::sync::CancellationToken;

use crate::audit::{AliasTable, UpdateLog};
use crate::configs::ConfigData;
use crate::events::route::Router;
use crate::roster::Roster;
use crate::sheets::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::sheets::google::GoogleSheets;
use crate::sheets::RecordStore;
use crate::utils::client::Components;
use crate::utils::logger;
use crate::wizard::{SessionStore, Wizard};

#[tokio::main]
async fn main() {
	let mut is_debug = false;
	for arg in std::env::args() {
		match arg.as_str() {
			"--debug" => {
				is_debug = true;
			},
			_ => {},
		}
	}

	let config_path = if is_debug { "../../configs/config.yaml" } else { "./config.yaml" };

	let config = match ConfigData::load(Path::new(config_path)) {
		Ok(config) => config,
		Err(error) => {
			eprintln!("Config error: {}", error);
			std::process::exit(1);
		},
	};
	if let Err(error) = logger::setup(config.get_log(), is_debug) {
		eprintln!("{}", error);
		std::process::exit(1);
	}

	info!("Starting...");
	if let Err(error) = run(config).await {
		error!("Stop Error: {}", error);
		std::process::exit(1);
	}
}

async fn run(config: ConfigData) -> Result<(), Box<dyn Error>> {
	let http = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;
	let key = ServiceAccountKey::load(config.get_service_account())?;
	info!("using service account {}", key.client_email);

	let store: Arc<dyn RecordStore> = Arc::new(GoogleSheets::new(
		http.clone(),
		ServiceAccountAuth::new(key, http),
		config.get_spreadsheet_id().to_string(),
		config.get_sheets().clone(),
	));
	let log = Arc::new(UpdateLog::new(Arc::clone(&store), AliasTable::new(config.get_aliases().clone())));
	let roster = Arc::new(Roster::new(store, log));
	let sessions = Arc::new(SessionStore::new(config.get_session().ttl()));
	let wizard = Wizard::new(sessions, Arc::clone(&roster));

	let shutdown = CancellationToken::new();
	let token = config.get_token().to_string();
	let components = Components::new(config, roster, wizard, shutdown.clone());

	let mut client = Client::builder(token, GatewayIntents::GUILDS)
		.event_handler(Router::new(components))
		.await?;

	let shard_manager = Arc::clone(&client.shard_manager);
	tokio::spawn(async move {
		if let Err(error) = tokio::signal::ctrl_c().await {
			error!("cannot listen for ctrl-c: {}", error);
			return;
		}
		info!("Shutting down...");
		shutdown.cancel();
		shard_manager.shutdown_all().await;
	});

	client.start().await?;
	Ok(())
}
