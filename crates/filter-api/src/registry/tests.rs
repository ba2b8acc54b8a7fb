use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};

use super::*;
use crate::descriptor::{FilterDescriptor, FilterPriority};
use crate::entry::{AcceptOutcome, FilterEntry};
use crate::filter::FilterQuery;

static CLASSES: FilterDescriptor = FilterDescriptor {
	id: "classes",
	display_name: "Classes",
	shortcut: "CLS",
	included_by_default: false,
	priority: FilterPriority::Medium,
};

static FILES: FilterDescriptor = FilterDescriptor {
	id: "files",
	display_name: "Files",
	shortcut: "f",
	included_by_default: true,
	priority: FilterPriority::Low,
};

static HELP: FilterDescriptor = FilterDescriptor {
	id: "help",
	display_name: "Help",
	shortcut: "?",
	included_by_default: false,
	priority: FilterPriority::High,
};

struct StaticFilter {
	descriptor: &'static FilterDescriptor,
	refreshes: AtomicUsize,
	fail_refresh: bool,
}

impl StaticFilter {
	fn new(descriptor: &'static FilterDescriptor) -> Self {
		Self {
			descriptor,
			refreshes: AtomicUsize::new(0),
			fail_refresh: false,
		}
	}
}

impl LocatorFilter for StaticFilter {
	fn descriptor(&self) -> &'static FilterDescriptor {
		self.descriptor
	}

	fn matches_for(&self, _query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>> {
		Ok(Vec::new())
	}

	fn accept(&self, _entry: &FilterEntry) -> AcceptOutcome {
		AcceptOutcome::done()
	}

	fn refresh(&self) -> Result<()> {
		self.refreshes.fetch_add(1, Ordering::SeqCst);
		if self.fail_refresh {
			bail!("index unavailable");
		}
		Ok(())
	}
}

#[test]
fn rejects_duplicate_ids() {
	let mut registry = FilterRegistry::new();
	registry.register(StaticFilter::new(&FILES)).unwrap();
	let err = registry.register(StaticFilter::new(&FILES)).unwrap_err();
	assert_eq!(err, FilterRegistryError::DuplicateId { id: "files" });
	assert_eq!(registry.len(), 1);
}

#[test]
fn shortcuts_are_normalised_to_lower_case() {
	let mut registry = FilterRegistry::new();
	registry.register(StaticFilter::new(&CLASSES)).unwrap();
	assert_eq!(registry.get("classes").unwrap().shortcut(), "cls");
}

#[test]
fn filters_are_ordered_by_priority_then_registration() {
	let mut registry = FilterRegistry::new();
	registry.register(StaticFilter::new(&FILES)).unwrap();
	registry.register(StaticFilter::new(&CLASSES)).unwrap();
	registry.register(StaticFilter::new(&HELP)).unwrap();

	let ids: Vec<_> = registry.filters().iter().map(|f| f.id()).collect();
	assert_eq!(ids, vec!["help", "classes", "files"]);
}

#[test]
fn configure_overrides_routing_settings() {
	let mut registry = FilterRegistry::new();
	registry.register(StaticFilter::new(&CLASSES)).unwrap();
	let before = Arc::clone(registry.get("classes").unwrap());

	registry
		.configure(
			"classes",
			&FilterOverrides {
				shortcut: Some("C".into()),
				included_by_default: Some(true),
			},
		)
		.unwrap();

	let filter = registry.get("classes").unwrap();
	assert_eq!(filter.shortcut(), "c");
	assert!(filter.is_included_by_default());
	assert!(Arc::ptr_eq(filter, &before));
	assert_eq!(before.shortcut(), "c");
}

#[test]
fn configure_unknown_filter_fails() {
	let mut registry = FilterRegistry::new();
	let err = registry
		.configure("missing", &FilterOverrides::default())
		.unwrap_err();
	assert_eq!(
		err,
		FilterRegistryError::UnknownFilter {
			id: "missing".into()
		}
	);
}

#[test]
fn refresh_all_collects_failures_and_continues() {
	let mut registry = FilterRegistry::new();
	let failing = Arc::new(StaticFilter {
		fail_refresh: true,
		..StaticFilter::new(&CLASSES)
	});
	let healthy = Arc::new(StaticFilter::new(&FILES));
	registry.register_shared(failing.clone()).unwrap();
	registry.register_shared(healthy.clone()).unwrap();

	let failures = registry.refresh_all();
	assert_eq!(failures.len(), 1);
	assert_eq!(failures[0].0, "classes");
	assert_eq!(failing.refreshes.load(Ordering::SeqCst), 1);
	assert_eq!(healthy.refreshes.load(Ordering::SeqCst), 1);
}

#[test]
fn deregister_removes_filter() {
	let mut registry = FilterRegistry::new();
	registry.register(StaticFilter::new(&FILES)).unwrap();
	assert!(registry.deregister("files").is_some());
	assert!(registry.is_empty());
	assert!(!registry.contains("files"));
}
