use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use ignore::WalkBuilder;

/// Options controlling which files are indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFilterOptions {
	/// Include hidden files and directories.
	pub include_hidden: bool,
	/// Follow symbolic links during traversal.
	pub follow_symlinks: bool,
	/// Respect .ignore and .gitignore files.
	pub respect_ignore_files: bool,
	/// Directory names that are always skipped.
	pub global_ignores: Vec<String>,
	/// Maximum directory traversal depth.
	pub max_depth: Option<usize>,
	/// Maximum number of entries returned per query.
	pub max_results: usize,
}

impl Default for FileFilterOptions {
	fn default() -> Self {
		Self {
			include_hidden: false,
			follow_symlinks: false,
			respect_ignore_files: true,
			global_ignores: vec![
				".git".to_string(),
				"node_modules".to_string(),
				"target".to_string(),
				".venv".to_string(),
			],
			max_depth: None,
			max_results: 200,
		}
	}
}

/// One indexed file, stored relative to the index root with `/` separators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FileRecord {
	pub relative: String,
	name_start: usize,
}

impl FileRecord {
	pub(crate) fn new(relative: String) -> Self {
		let name_start = relative.rfind('/').map_or(0, |slash| slash + 1);
		Self {
			relative,
			name_start,
		}
	}

	pub(crate) fn name(&self) -> &str {
		&self.relative[self.name_start..]
	}

	/// Parent directory relative to the root, empty for top-level files.
	pub(crate) fn directory(&self) -> &str {
		self.relative[..self.name_start].trim_end_matches('/')
	}
}

/// Snapshot of the files below a root directory, sorted by relative path.
#[derive(Debug, Default)]
pub(crate) struct FileIndex {
	pub root: PathBuf,
	pub files: Vec<FileRecord>,
}

impl FileIndex {
	pub(crate) fn build(root: &Path, options: &FileFilterOptions) -> Result<Self> {
		if !root.is_dir() {
			bail!("file filter root {} is not a directory", root.display());
		}

		let mut builder = WalkBuilder::new(root);
		builder
			.hidden(!options.include_hidden)
			.follow_links(options.follow_symlinks)
			.ignore(options.respect_ignore_files)
			.git_ignore(options.respect_ignore_files)
			.git_global(options.respect_ignore_files)
			.git_exclude(options.respect_ignore_files)
			.parents(options.respect_ignore_files)
			.require_git(false)
			.max_depth(options.max_depth);

		let global_ignores = options.global_ignores.clone();
		builder.filter_entry(move |entry| {
			let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());
			!(is_dir
				&& entry
					.file_name()
					.to_str()
					.is_some_and(|name| global_ignores.iter().any(|ignored| ignored == name)))
		});

		let mut files = Vec::new();
		for entry in builder.build() {
			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					log::debug!("skipping unreadable entry: {err}");
					continue;
				}
			};
			if !entry.file_type().is_some_and(|kind| kind.is_file()) {
				continue;
			}
			let path = entry.path();
			let relative = path.strip_prefix(root).unwrap_or(path);
			files.push(FileRecord::new(
				relative.to_string_lossy().replace('\\', "/"),
			));
		}

		files.sort_by(|a, b| a.relative.cmp(&b.relative));
		log::info!("indexed {} files under {}", files.len(), root.display());

		Ok(Self {
			root: root.to_path_buf(),
			files,
		})
	}
}
