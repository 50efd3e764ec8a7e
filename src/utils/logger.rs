use log::LevelFilter;

use crate::configs::LogConfig;
use crate::error::ConfigError;

const NOISY_TARGETS: [&str; 6] = ["serenity", "h2", "hyper", "reqwest", "rustls", "tungstenite"];

/// Sets up the global logger. `debug` forces the debug level regardless of config.
pub fn setup(config: &LogConfig, debug: bool) -> Result<(), ConfigError> {
	let level = if debug {
		LevelFilter::Debug
	} else {
		config.level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info)
	};

	let mut dispatch = fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"[{}][{}][{}] {}",
				chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
				record.target(),
				record.level(),
				message
			))
		})
		.level(level);
	for target in NOISY_TARGETS {
		dispatch = dispatch.level_for(target, LevelFilter::Warn);
	}
	dispatch = dispatch.chain(std::io::stdout());

	if let Some(path) = &config.file {
		let file = fern::log_file(path).map_err(|source| ConfigError::Io {
			path: path.clone(),
			source,
		})?;
		dispatch = dispatch.chain(file);
	}

	dispatch.apply().map_err(|error| ConfigError::Logger(error.to_string()))
}
