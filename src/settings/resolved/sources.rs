use std::fmt;

/// Where a validated setting came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) batch_size: Option<SettingSource>,
	pub(crate) max_results: Option<SettingSource>,
	pub(crate) max_depth: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_batch_size(&self) -> SettingSource {
		self.batch_size
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.batch_size"))
	}

	pub(crate) fn source_for_max_results(&self) -> SettingSource {
		self.max_results
			.clone()
			.unwrap_or(SettingSource::ConfigKey("files.max_results"))
	}

	pub(crate) fn source_for_max_depth(&self) -> SettingSource {
		self.max_depth
			.clone()
			.unwrap_or(SettingSource::ConfigKey("files.max_depth"))
	}
}
