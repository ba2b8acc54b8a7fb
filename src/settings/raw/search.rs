use std::time::Duration;

use locus::LocatorSettings;
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` table: batching and timing of the coordinator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) batch_size: Option<usize>,
	pub(super) debounce_ms: Option<u64>,
	pub(super) progress_delay_ms: Option<u64>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.batch_size {
			self.batch_size = Some(value);
		}
		if let Some(value) = cli.debounce_ms {
			self.debounce_ms = Some(value);
		}
	}

	pub(super) fn resolve(&self) -> LocatorSettings {
		let defaults = LocatorSettings::default();
		LocatorSettings {
			batch_size: self.batch_size.unwrap_or(defaults.batch_size),
			debounce: self
				.debounce_ms
				.map_or(defaults.debounce, Duration::from_millis),
			progress_delay: self
				.progress_delay_ms
				.map_or(defaults.progress_delay, Duration::from_millis),
		}
	}
}
