mod registered_filter;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::FilterRegistryError;
use crate::filter::LocatorFilter;

pub use registered_filter::{FilterOverrides, RegisteredFilter};

/// Ordered collection of the filters available to the locator.
///
/// The registry owns the filters; result entries only hold weak references
/// back to their [`RegisteredFilter`].
#[derive(Clone, Debug, Default)]
pub struct FilterRegistry {
	filters: IndexMap<&'static str, Arc<RegisteredFilter>>,
}

impl FilterRegistry {
	/// Create a registry without any filters registered.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a filter under its descriptor id.
	pub fn register<F>(&mut self, filter: F) -> Result<(), FilterRegistryError>
	where
		F: LocatorFilter + 'static,
	{
		self.register_shared(Arc::new(filter))
	}

	/// Register a filter that is shared with other owners.
	pub fn register_shared(
		&mut self,
		filter: Arc<dyn LocatorFilter>,
	) -> Result<(), FilterRegistryError> {
		let id = filter.descriptor().id;
		if self.filters.contains_key(id) {
			return Err(FilterRegistryError::DuplicateId { id });
		}
		log::debug!("registered locator filter '{id}'");
		self.filters
			.insert(id, Arc::new(RegisteredFilter::new(filter)));
		Ok(())
	}

	/// Remove the filter registered under `id`.
	pub fn deregister(&mut self, id: &str) -> Option<Arc<RegisteredFilter>> {
		self.filters.shift_remove(id)
	}

	/// Override the routing settings of a registered filter in place.
	pub fn configure(
		&mut self,
		id: &str,
		overrides: &FilterOverrides,
	) -> Result<(), FilterRegistryError> {
		let filter = self
			.filters
			.get(id)
			.ok_or_else(|| FilterRegistryError::UnknownFilter { id: id.to_string() })?;
		filter.apply_overrides(overrides);
		log::debug!("configured locator filter '{id}': {overrides:?}");
		Ok(())
	}

	#[must_use]
	pub fn get(&self, id: &str) -> Option<&Arc<RegisteredFilter>> {
		self.filters.get(id)
	}

	/// Filters ordered by priority, ties broken by registration order.
	#[must_use]
	pub fn filters(&self) -> Vec<Arc<RegisteredFilter>> {
		let mut filters: Vec<_> = self.filters.values().cloned().collect();
		filters.sort_by_key(|filter| filter.priority());
		filters
	}

	/// Ask every filter to rebuild its cached data.
	///
	/// Failures are collected rather than aborting the remaining refreshes.
	pub fn refresh_all(&self) -> Vec<(&'static str, anyhow::Error)> {
		let mut failures = Vec::new();
		for filter in self.filters.values() {
			if let Err(err) = filter.refresh() {
				log::warn!("refreshing filter '{}' failed: {err:#}", filter.id());
				failures.push((filter.id(), err));
			}
		}
		failures
	}

	#[must_use]
	pub fn contains(&self, id: &str) -> bool {
		self.filters.contains_key(id)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.filters.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}
}
