use std::collections::BTreeMap;
use std::path::PathBuf;

use locus::{FilterOverrides, LocatorSettings};
use locus_filters_files::FileFilterOptions;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::SettingsError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub root: PathBuf,
	pub files: FileFilterOptions,
	pub search: LocatorSettings,
	/// Routing overrides keyed by filter id.
	pub filters: BTreeMap<String, FilterOverrides>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), SettingsError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		print!("{}", summary::format_summary(self));
	}
}
