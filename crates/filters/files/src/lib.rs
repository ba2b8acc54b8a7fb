//! Built-in locator filter matching file names below a root directory.
//!
//! The index is built lazily on the first search and rebuilt on
//! [`LocatorFilter::refresh`]. Matching runs on the search worker and checks
//! the cancellation token between chunks.

mod index;
mod matcher;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use locus_filter_api::{
	AcceptOutcome, FilterDescriptor, FilterEntry, FilterPriority, FilterQuery, HighlightField,
	HighlightInfo, LocatorFilter,
};

pub use index::FileFilterOptions;
pub use matcher::{MATCH_CHUNK_SIZE, PREFILTER_ENABLE_THRESHOLD, config_for_query};

use index::FileIndex;
use matcher::{highlight_indices, score_files};

pub const FILTER_ID: &str = "files";

pub static DESCRIPTOR: FilterDescriptor = FilterDescriptor {
	id: FILTER_ID,
	display_name: "Files",
	shortcut: "f",
	included_by_default: true,
	priority: FilterPriority::Medium,
};

/// Filter that fuzzy-matches file names below `root`.
pub struct FileFilter {
	root: PathBuf,
	options: FileFilterOptions,
	index: RwLock<Option<Arc<FileIndex>>>,
}

impl FileFilter {
	#[must_use]
	pub fn new(root: impl Into<PathBuf>, options: FileFilterOptions) -> Self {
		Self {
			root: root.into(),
			options,
			index: RwLock::new(None),
		}
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Number of indexed files, or `None` before the first index build.
	#[must_use]
	pub fn indexed_len(&self) -> Option<usize> {
		self.index
			.read()
			.ok()
			.and_then(|guard| guard.as_ref().map(|index| index.files.len()))
	}

	fn current_index(&self) -> Result<Arc<FileIndex>> {
		if let Some(index) = self
			.index
			.read()
			.map_err(|_| anyhow!("file index lock poisoned"))?
			.as_ref()
		{
			return Ok(Arc::clone(index));
		}
		self.rebuild()
	}

	fn rebuild(&self) -> Result<Arc<FileIndex>> {
		let index = Arc::new(FileIndex::build(&self.root, &self.options)?);
		let mut slot = self
			.index
			.write()
			.map_err(|_| anyhow!("file index lock poisoned"))?;
		*slot = Some(Arc::clone(&index));
		Ok(index)
	}

	fn entries_for_empty_query(&self, index: &FileIndex) -> Vec<FilterEntry> {
		index
			.files
			.iter()
			.take(self.options.max_results)
			.map(|record| entry_for(index, record, None))
			.collect()
	}
}

fn entry_for(
	index: &FileIndex,
	record: &index::FileRecord,
	highlight: Option<HighlightInfo>,
) -> FilterEntry {
	let mut entry = FilterEntry::new(record.name())
		.with_file_path(index.root.join(&record.relative))
		.with_data(record.relative.clone());
	let directory = record.directory();
	if !directory.is_empty() {
		entry = entry.with_extra_info(directory);
	}
	if let Some(highlight) = highlight {
		entry = entry.with_highlight(highlight);
	}
	entry
}

impl LocatorFilter for FileFilter {
	fn descriptor(&self) -> &'static FilterDescriptor {
		&DESCRIPTOR
	}

	fn matches_for(&self, query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>> {
		let index = self.current_index()?;
		let needle = query.search_text().trim();
		if needle.is_empty() {
			return Ok(self.entries_for_empty_query(&index));
		}

		let config = config_for_query(needle, index.files.len());
		let Some(scored) = score_files(
			&index.files,
			needle,
			&config,
			query,
			self.options.max_results,
		) else {
			log::debug!("file filter pass for '{needle}' cancelled");
			return Ok(Vec::new());
		};

		Ok(scored
			.iter()
			.map(|hit| {
				let record = &index.files[hit.index];
				let highlight = highlight_indices(needle, &config, record.name()).and_then(
					|indices| HighlightInfo::covering(HighlightField::DisplayName, &indices),
				);
				entry_for(&index, record, highlight)
			})
			.collect())
	}

	fn accept(&self, entry: &FilterEntry) -> AcceptOutcome {
		log::info!(
			"opening {}",
			entry
				.file_path
				.as_deref()
				.map_or_else(|| entry.display_name.clone(), |p| p.display().to_string())
		);
		AcceptOutcome::done()
	}

	fn refresh(&self) -> Result<()> {
		self.rebuild().map(|_| ())
	}
}
