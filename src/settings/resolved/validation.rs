use super::{ConfigSources, ResolvedConfig, SettingsError};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), SettingsError> {
	if config.search.batch_size == 0 {
		return Err(SettingsError::invalid(
			"search.batch_size",
			"0",
			sources.source_for_batch_size(),
			"must be greater than zero",
		));
	}

	if config.files.max_results == 0 {
		return Err(SettingsError::invalid(
			"files.max_results",
			"0",
			sources.source_for_max_results(),
			"must be greater than zero",
		));
	}

	if let Some(max_depth) = config.files.max_depth
		&& max_depth == 0
	{
		return Err(SettingsError::invalid(
			"files.max_depth",
			max_depth.to_string(),
			sources.source_for_max_depth(),
			"must be at least 1",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;
	use std::path::PathBuf;

	use locus::LocatorSettings;
	use locus_filters_files::FileFilterOptions;

	use super::super::SettingSource;
	use super::*;

	fn config(files: FileFilterOptions) -> ResolvedConfig {
		ResolvedConfig {
			root: PathBuf::from("/tmp"),
			files,
			search: LocatorSettings::default(),
			filters: BTreeMap::new(),
		}
	}

	#[test]
	fn defaults_are_valid() {
		let config = config(FileFilterOptions::default());
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_max_results() {
		let config = config(FileFilterOptions {
			max_results: 0,
			..FileFilterOptions::default()
		});
		let sources = ConfigSources {
			max_results: Some(SettingSource::ConfigKey("files.max_results")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "files.max_results");
		assert!(err.to_string().contains("configuration key"));
	}

	#[test]
	fn validation_rejects_zero_max_depth() {
		let config = config(FileFilterOptions {
			max_depth: Some(0),
			..FileFilterOptions::default()
		});
		let sources = ConfigSources {
			max_depth: Some(SettingSource::Environment("LOCUS__FILES__MAX_DEPTH")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "files.max_depth");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("environment variable"));
	}
}
