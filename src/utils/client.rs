use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::configs::ConfigData;
use crate::roster::Roster;
use crate::wizard::Wizard;

/// Everything the event handlers share, built once in `main`.
pub struct Components {
	config: ConfigData,
	roster: Arc<Roster>,
	wizard: Wizard,
	shutdown: CancellationToken,
	sweeper_started: AtomicBool,
}

impl Components {
	pub fn new(config: ConfigData, roster: Arc<Roster>, wizard: Wizard, shutdown: CancellationToken) -> Components {
		Components {
			config,
			roster,
			wizard,
			shutdown,
			sweeper_started: AtomicBool::new(false),
		}
	}

	pub fn get_config(&self) -> &ConfigData {
		&self.config
	}

	pub fn get_roster(&self) -> &Roster {
		&self.roster
	}

	pub fn get_wizard(&self) -> &Wizard {
		&self.wizard
	}

	pub fn get_shutdown(&self) -> &CancellationToken {
		&self.shutdown
	}

	/// True only for the first caller; `ready` fires again on every reconnect.
	pub fn claim_sweeper(&self) -> bool {
		!self.sweeper_started.swap(true, Ordering::AcqRel)
	}
}
