use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use locus_filters_files::FileFilterOptions;
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[files]` table as it is read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FilesSection {
	pub(super) root: Option<PathBuf>,
	pub(super) include_hidden: Option<bool>,
	pub(super) follow_symlinks: Option<bool>,
	pub(super) respect_ignore_files: Option<bool>,
	pub(super) max_depth: Option<usize>,
	pub(super) max_results: Option<usize>,
	pub(super) global_ignores: Option<Vec<String>>,
}

impl FilesSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.root = Some(root);
		}
		if let Some(value) = cli.hidden {
			self.include_hidden = Some(value);
		}
		if let Some(value) = cli.follow_symlinks {
			self.follow_symlinks = Some(value);
		}
		if let Some(value) = cli.respect_ignore_files {
			self.respect_ignore_files = Some(value);
		}
		if let Some(value) = cli.max_depth {
			self.max_depth = Some(value);
		}
		if let Some(value) = cli.max_results {
			self.max_results = Some(value);
		}
	}

	pub(super) fn resolve(self) -> Result<(PathBuf, FileFilterOptions)> {
		let mut root = match self.root {
			Some(path) => path,
			None => env::current_dir().context("failed to determine working directory")?,
		};
		if root.is_relative() {
			root = env::current_dir()
				.context("failed to resolve current directory for root")?
				.join(root);
		}
		root = fs::canonicalize(&root)
			.with_context(|| format!("failed to canonicalize search root {}", root.display()))?;

		let metadata = fs::metadata(&root)
			.with_context(|| format!("failed to inspect search root {}", root.display()))?;
		ensure!(metadata.is_dir(), "search root must be a directory");

		let defaults = FileFilterOptions::default();
		let options = FileFilterOptions {
			include_hidden: self.include_hidden.unwrap_or(defaults.include_hidden),
			follow_symlinks: self.follow_symlinks.unwrap_or(defaults.follow_symlinks),
			respect_ignore_files: self
				.respect_ignore_files
				.unwrap_or(defaults.respect_ignore_files),
			global_ignores: self.global_ignores.unwrap_or(defaults.global_ignores),
			max_depth: self.max_depth,
			max_results: self.max_results.unwrap_or(defaults.max_results),
		};

		Ok((root, options))
	}
}
