use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use locus_filter_api::{DecorationProvider, FilterEntry, Icon, RegisteredFilter};

/// A filter entry owned by the result model.
///
/// Keeps a weak reference to the filter that produced it, so an entry
/// outliving its filter's registration can never resurrect it.
pub struct ResultEntry {
	entry: FilterEntry,
	filter: Weak<RegisteredFilter>,
	filter_id: &'static str,
	decoration: OnceLock<Option<Icon>>,
}

impl ResultEntry {
	#[must_use]
	pub fn new(entry: FilterEntry, filter: &Arc<RegisteredFilter>) -> Self {
		Self {
			entry,
			filter: Arc::downgrade(filter),
			filter_id: filter.id(),
			decoration: OnceLock::new(),
		}
	}

	#[must_use]
	pub fn filter_entry(&self) -> &FilterEntry {
		&self.entry
	}

	#[must_use]
	pub fn display_name(&self) -> &str {
		&self.entry.display_name
	}

	#[must_use]
	pub fn extra_info(&self) -> Option<&str> {
		self.entry.extra_info.as_deref()
	}

	#[must_use]
	pub fn filter_id(&self) -> &'static str {
		self.filter_id
	}

	/// The producing filter, if it is still registered.
	#[must_use]
	pub fn filter(&self) -> Option<Arc<RegisteredFilter>> {
		self.filter.upgrade()
	}

	/// Resolve the entry's decoration, calling `provider` at most once.
	pub fn decoration(&self, provider: &dyn DecorationProvider) -> Option<Icon> {
		*self.decoration.get_or_init(|| {
			self.entry
				.file_path
				.as_deref()
				.and_then(|path| provider.icon_for(path))
		})
	}

	#[must_use]
	pub fn is_decoration_resolved(&self) -> bool {
		self.decoration.get().is_some()
	}
}

impl fmt::Debug for ResultEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResultEntry")
			.field("display_name", &self.entry.display_name)
			.field("extra_info", &self.entry.extra_info)
			.field("filter", &self.filter_id)
			.finish()
	}
}
