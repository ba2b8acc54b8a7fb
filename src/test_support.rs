use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use locus_filter_api::{
	AcceptOutcome, FilterDescriptor, FilterEntry, FilterPriority, FilterQuery, FilterRegistry,
	LocatorFilter, RegisteredFilter,
};

use crate::locator::Locator;
use crate::model::ResultEntry;

pub(crate) fn descriptor(id: &'static str, shortcut: &'static str) -> &'static FilterDescriptor {
	Box::leak(Box::new(FilterDescriptor {
		id,
		display_name: id,
		shortcut,
		included_by_default: true,
		priority: FilterPriority::Medium,
	}))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Behaviour {
	Entries,
	Fail,
	Panic,
}

/// Filter returning a fixed list of entries, or failing on demand.
pub(crate) struct ScriptedFilter {
	descriptor: &'static FilterDescriptor,
	entries: Vec<FilterEntry>,
	behaviour: Behaviour,
	outcome: AcceptOutcome,
	pub accepted: Mutex<Vec<String>>,
	pub prepared: Mutex<Vec<String>>,
}

impl ScriptedFilter {
	pub(crate) fn new(id: &'static str, names: &[&str]) -> Self {
		Self {
			descriptor: descriptor(id, id),
			entries: names.iter().map(|name| FilterEntry::new(*name)).collect(),
			behaviour: Behaviour::Entries,
			outcome: AcceptOutcome::done(),
			accepted: Mutex::new(Vec::new()),
			prepared: Mutex::new(Vec::new()),
		}
	}

	pub(crate) fn with_entries(mut self, entries: Vec<FilterEntry>) -> Self {
		self.entries = entries;
		self
	}

	pub(crate) fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
		self.behaviour = behaviour;
		self
	}

	pub(crate) fn with_outcome(mut self, outcome: AcceptOutcome) -> Self {
		self.outcome = outcome;
		self
	}

	pub(crate) fn accepted(&self) -> Vec<String> {
		self.accepted.lock().unwrap().clone()
	}
}

impl LocatorFilter for ScriptedFilter {
	fn descriptor(&self) -> &'static FilterDescriptor {
		self.descriptor
	}

	fn prepare_search(&self, search_text: &str) {
		self.prepared.lock().unwrap().push(search_text.to_string());
	}

	fn matches_for(&self, _query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>> {
		match self.behaviour {
			Behaviour::Entries => Ok(self.entries.clone()),
			Behaviour::Fail => bail!("scripted failure"),
			Behaviour::Panic => panic!("scripted panic"),
		}
	}

	fn accept(&self, entry: &FilterEntry) -> AcceptOutcome {
		self.accepted
			.lock()
			.unwrap()
			.push(entry.display_name.clone());
		self.outcome.clone()
	}
}

/// Open/closed latch shared between a test and a [`GateFilter`].
#[derive(Default)]
pub(crate) struct Gate {
	open: Mutex<bool>,
	signal: Condvar,
}

impl Gate {
	pub(crate) fn open(&self) {
		*self.open.lock().unwrap() = true;
		self.signal.notify_all();
	}

	fn wait(&self, query: &FilterQuery<'_>) {
		let mut open = self.open.lock().unwrap();
		while !*open && !query.is_cancelled() {
			open = self
				.signal
				.wait_timeout(open, Duration::from_millis(2))
				.unwrap()
				.0;
		}
	}
}

/// Filter that blocks inside `matches_for` until its gate opens or the pass
/// is cancelled, then returns `count` entries named after the query.
pub(crate) struct GateFilter {
	descriptor: &'static FilterDescriptor,
	gate: Arc<Gate>,
	count: usize,
	active: AtomicUsize,
	pub max_active: AtomicUsize,
	pub seen: Mutex<Vec<String>>,
	pub accepted: Mutex<Vec<String>>,
}

impl GateFilter {
	pub(crate) fn new(id: &'static str, gate: Arc<Gate>, count: usize) -> Self {
		Self {
			descriptor: descriptor(id, id),
			gate,
			count,
			active: AtomicUsize::new(0),
			max_active: AtomicUsize::new(0),
			seen: Mutex::new(Vec::new()),
			accepted: Mutex::new(Vec::new()),
		}
	}

	pub(crate) fn seen(&self) -> Vec<String> {
		self.seen.lock().unwrap().clone()
	}

	pub(crate) fn accepted(&self) -> Vec<String> {
		self.accepted.lock().unwrap().clone()
	}
}

impl LocatorFilter for GateFilter {
	fn descriptor(&self) -> &'static FilterDescriptor {
		self.descriptor
	}

	fn matches_for(&self, query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>> {
		let text = query.search_text().to_string();
		self.seen.lock().unwrap().push(text.clone());
		let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
		self.max_active.fetch_max(active, Ordering::SeqCst);

		self.gate.wait(query);

		self.active.fetch_sub(1, Ordering::SeqCst);
		Ok((0..self.count)
			.map(|index| FilterEntry::new(format!("{text}-{index}")))
			.collect())
	}

	fn accept(&self, entry: &FilterEntry) -> AcceptOutcome {
		self.accepted
			.lock()
			.unwrap()
			.push(entry.display_name.clone());
		AcceptOutcome::done()
	}
}

/// Register shared filters and return the registry.
pub(crate) fn registry_with(filters: Vec<Arc<dyn LocatorFilter>>) -> FilterRegistry {
	let mut registry = FilterRegistry::new();
	for filter in filters {
		registry.register_shared(filter).unwrap();
	}
	registry
}

/// Wrap entries for direct insertion into a model.
pub(crate) fn result_entries(
	filter: &Arc<RegisteredFilter>,
	entries: Vec<FilterEntry>,
) -> Vec<ResultEntry> {
	entries
		.into_iter()
		.map(|entry| ResultEntry::new(entry, filter))
		.collect()
}

/// Pump `locator` until `done` holds or two seconds pass.
pub(crate) fn pump_until(locator: &mut Locator, mut done: impl FnMut(&Locator) -> bool) -> bool {
	let deadline = Instant::now() + Duration::from_secs(2);
	loop {
		locator.pump();
		if done(locator) {
			return true;
		}
		if Instant::now() >= deadline {
			return false;
		}
		std::thread::sleep(Duration::from_millis(1));
	}
}

pub(crate) fn display_names(locator: &Locator) -> Vec<String> {
	locator
		.model()
		.entries()
		.iter()
		.map(|entry| entry.display_name().to_string())
		.collect()
}
