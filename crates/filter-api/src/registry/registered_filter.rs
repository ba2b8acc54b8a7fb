use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use anyhow::Result;

use crate::descriptor::{FilterDescriptor, FilterPriority};
use crate::entry::{AcceptOutcome, FilterEntry};
use crate::filter::{FilterQuery, LocatorFilter};

/// Settings that override a filter's descriptor defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOverrides {
	pub shortcut: Option<String>,
	pub included_by_default: Option<bool>,
}

#[derive(Debug)]
struct Routing {
	shortcut: String,
	included_by_default: bool,
}

/// Registry entry pairing a filter with its effective routing settings.
///
/// Routing is updated in place, so entries already handed out keep a live
/// link to the registration.
pub struct RegisteredFilter {
	filter: Arc<dyn LocatorFilter>,
	routing: RwLock<Routing>,
}

impl RegisteredFilter {
	pub(super) fn new(filter: Arc<dyn LocatorFilter>) -> Self {
		let descriptor = filter.descriptor();
		Self {
			routing: RwLock::new(Routing {
				shortcut: descriptor.shortcut.to_lowercase(),
				included_by_default: descriptor.included_by_default,
			}),
			filter,
		}
	}

	fn routing(&self) -> RwLockReadGuard<'_, Routing> {
		self.routing
			.read()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	pub(super) fn apply_overrides(&self, overrides: &FilterOverrides) {
		let mut routing = self
			.routing
			.write()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		if let Some(shortcut) = &overrides.shortcut {
			routing.shortcut = shortcut.to_lowercase();
		}
		if let Some(included) = overrides.included_by_default {
			routing.included_by_default = included;
		}
	}

	#[must_use]
	pub fn descriptor(&self) -> &'static FilterDescriptor {
		self.filter.descriptor()
	}

	#[must_use]
	pub fn id(&self) -> &'static str {
		self.descriptor().id
	}

	#[must_use]
	pub fn display_name(&self) -> &'static str {
		self.descriptor().display_name
	}

	#[must_use]
	pub fn priority(&self) -> FilterPriority {
		self.descriptor().priority
	}

	/// Effective prefix token, always lower case.
	#[must_use]
	pub fn shortcut(&self) -> String {
		self.routing().shortcut.clone()
	}

	#[must_use]
	pub fn is_included_by_default(&self) -> bool {
		self.routing().included_by_default
	}

	#[must_use]
	pub fn filter(&self) -> &Arc<dyn LocatorFilter> {
		&self.filter
	}

	pub fn prepare_search(&self, search_text: &str) {
		self.filter.prepare_search(search_text);
	}

	pub fn matches_for(&self, query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>> {
		self.filter.matches_for(query)
	}

	#[must_use]
	pub fn accept(&self, entry: &FilterEntry) -> AcceptOutcome {
		self.filter.accept(entry)
	}

	pub fn refresh(&self) -> Result<()> {
		self.filter.refresh()
	}
}

impl fmt::Debug for RegisteredFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let routing = self.routing();
		f.debug_struct("RegisteredFilter")
			.field("id", &self.id())
			.field("shortcut", &routing.shortcut)
			.field("included_by_default", &routing.included_by_default)
			.finish()
	}
}
