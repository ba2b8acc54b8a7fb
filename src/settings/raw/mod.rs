use std::collections::BTreeMap;
use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod files;
mod search;

use files::FilesSection;
use search::SearchSection;

/// Configuration as read from files and the environment, before CLI
/// overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	files: FilesSection,
	filters: BTreeMap<String, FilterSection>,
}

/// Per-filter routing overrides, keyed by filter id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(super) struct FilterSection {
	pub(super) shortcut: Option<String>,
	pub(super) included_by_default: Option<bool>,
}

impl RawConfig {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.files.apply_cli_overrides(cli);
	}

	/// Convert into a [`ResolvedConfig`], filling defaults and validating.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			batch_size: detect_source(
				cli.batch_size.is_some(),
				self.search.batch_size.is_some(),
				"LOCUS__SEARCH__BATCH_SIZE",
				"--batch-size",
				"search.batch_size",
			),
			max_results: detect_source(
				cli.max_results.is_some(),
				self.files.max_results.is_some(),
				"LOCUS__FILES__MAX_RESULTS",
				"--max-results",
				"files.max_results",
			),
			max_depth: detect_source(
				cli.max_depth.is_some(),
				self.files.max_depth.is_some(),
				"LOCUS__FILES__MAX_DEPTH",
				"--max-depth",
				"files.max_depth",
			),
		};

		let search = self.search.resolve();
		let (root, files) = self.files.resolve()?;
		let filters = self
			.filters
			.into_iter()
			.map(|(id, section)| {
				let overrides = locus::FilterOverrides {
					shortcut: section.shortcut,
					included_by_default: section.included_by_default,
				};
				(id, overrides)
			})
			.collect();

		let config = ResolvedConfig {
			root,
			files,
			search,
			filters,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
