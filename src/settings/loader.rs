use anyhow::{Result, anyhow};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;

	use super::*;

	#[test]
	fn explicit_config_file_is_merged() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("locus.toml");
		fs::write(
			&path,
			"[search]\nbatch_size = 8\n\n[files]\nmax_results = 5\n\n[filters.files]\nshortcut = \"F\"\n",
		)
		.unwrap();
		let root = dir.path().display().to_string();
		let config = path.display().to_string();
		let cli = CliArgs::parse_from(["locus", "-n", "--root", &root, "--config", &config]);

		let resolved = load(&cli).unwrap();

		assert_eq!(resolved.search.batch_size, 8);
		assert_eq!(resolved.files.max_results, 5);
		assert_eq!(
			resolved.filters["files"].shortcut.as_deref(),
			Some("F")
		);
	}

	#[test]
	fn missing_explicit_config_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("absent.toml").display().to_string();
		let cli = CliArgs::parse_from(["locus", "-n", "--config", &missing]);
		assert!(load(&cli).is_err());
	}
}
