//! Request coordinator driving searches from the host thread.
//!
//! A [`Locator`] owns the result model and talks to a single background
//! worker. Only one pass is ever in flight: a newer query or a committed row
//! cancels the running pass and is applied once its completion arrives, so
//! every completion triggers exactly one settling action (restart, accept or
//! idle).

mod events;
mod state;


use std::mem;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use locus_filter_api::FilterRegistry;
use log::{debug, error, info, trace, warn};

pub use events::LocatorEvent;
pub use state::SearchPhase;

use crate::model::ResultModel;
use crate::search::{self, SearchCommand, SearchEnvelope, SearchPayload, resolve_filters};
use state::{InFlight, SearchState};

pub const DEFAULT_BATCH_SIZE: usize = 64;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);
pub const DEFAULT_PROGRESS_DELAY: Duration = Duration::from_millis(50);

/// Timing and batching knobs for a [`Locator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocatorSettings {
	/// Maximum number of entries delivered per batch.
	pub batch_size: usize,
	/// Delay between the last [`Locator::type_text`] call and its submission.
	pub debounce: Duration,
	/// How long a pass must run before the busy indicator is shown.
	pub progress_delay: Duration,
}

impl Default for LocatorSettings {
	fn default() -> Self {
		Self {
			batch_size: DEFAULT_BATCH_SIZE,
			debounce: DEFAULT_DEBOUNCE,
			progress_delay: DEFAULT_PROGRESS_DELAY,
		}
	}
}

struct DebouncedQuery {
	text: String,
	due: Instant,
}

pub struct Locator {
	registry: FilterRegistry,
	settings: LocatorSettings,
	model: ResultModel,
	state: SearchState,
	text: String,
	debounced: Option<DebouncedQuery>,
	next_id: u64,
	commands: Sender<SearchCommand>,
	envelopes: Receiver<SearchEnvelope>,
	events: Vec<LocatorEvent>,
}

impl Locator {
	/// Create a coordinator over `registry` and start its search worker.
	pub fn new(registry: FilterRegistry, settings: LocatorSettings) -> Result<Self> {
		let (commands, envelopes) = search::spawn().context("failed to start search worker")?;
		Ok(Self {
			registry,
			settings,
			model: ResultModel::new(),
			state: SearchState::Idle,
			text: String::new(),
			debounced: None,
			next_id: 1,
			commands,
			envelopes,
			events: Vec::new(),
		})
	}

	/// Submit `text` as the newest query.
	///
	/// Starts a pass when idle. While searching, the running pass is
	/// cancelled and `text` replaces any previously pending restart. While an
	/// accept is pending the query is dropped and the current text is kept.
	pub fn submit_query(&mut self, text: impl Into<String>) {
		let text = text.into();
		self.debounced = None;

		match mem::take(&mut self.state) {
			SearchState::Idle => {
				self.text.clone_from(&text);
				self.start_search(&text);
			}
			SearchState::Searching(task) => {
				task.cancel.cancel();
				debug!("query {text:?} supersedes search {}", task.id);
				self.text.clone_from(&text);
				self.state = SearchState::SearchingWithPendingRestart { task, text };
			}
			SearchState::SearchingWithPendingRestart { task, .. } => {
				self.text.clone_from(&text);
				self.state = SearchState::SearchingWithPendingRestart { task, text };
			}
			SearchState::SearchingWithPendingAccept { task, row } => {
				debug!("query {text:?} dropped, accept of row {row} is pending");
				self.state = SearchState::SearchingWithPendingAccept { task, row };
			}
		}
	}

	/// Record typed text and submit it once the debounce delay passes
	/// without further typing.
	pub fn type_text(&mut self, text: impl Into<String>) {
		let text = text.into();
		self.text.clone_from(&text);
		self.debounced = Some(DebouncedQuery {
			text,
			due: Instant::now() + self.settings.debounce,
		});
	}

	/// Accept `row` now, or once the running pass has settled.
	///
	/// A pass that has not replaced the shown rows yet keeps running until
	/// its first batch arrives; the accept then targets row 0 of the new
	/// results.
	pub fn commit_selection(&mut self, row: usize) {
		if let Some(pending) = self.debounced.take() {
			self.submit_query(pending.text);
		}

		match mem::take(&mut self.state) {
			SearchState::Idle => self.accept_row(row),
			SearchState::Searching(task) | SearchState::SearchingWithPendingRestart { task, .. } => {
				if task.needs_clear {
					debug!("accept of row {row} waits for the first batch of search {}", task.id);
				} else {
					task.cancel.cancel();
					debug!("accept of row {row} deferred until search {} settles", task.id);
				}
				self.state = SearchState::SearchingWithPendingAccept { task, row };
			}
			SearchState::SearchingWithPendingAccept { task, row: previous } => {
				debug!("pending accept moved from row {previous} to {row}");
				self.state = SearchState::SearchingWithPendingAccept { task, row };
			}
		}
	}

	/// Text most recently submitted or typed.
	#[must_use]
	pub fn current_text(&self) -> &str {
		&self.text
	}

	/// Apply everything that is ready without blocking: due debounces,
	/// delivered batches and completions, and the delayed busy indicator.
	pub fn pump(&mut self) {
		let now = Instant::now();
		if let Some(pending) = self.debounced.take_if(|pending| pending.due <= now) {
			self.submit_query(pending.text);
		}

		loop {
			match self.envelopes.try_recv() {
				Ok(envelope) => self.handle_envelope(envelope),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					self.worker_lost();
					break;
				}
			}
		}

		self.update_progress();
	}

	/// Block until no search is running or pending, or `timeout` elapses.
	///
	/// Returns whether the coordinator settled.
	pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
		let deadline = Instant::now() + timeout;
		loop {
			self.pump();
			if self.is_idle() {
				return true;
			}

			let now = Instant::now();
			if now >= deadline {
				return false;
			}
			let mut wake = deadline;
			if let Some(pending) = &self.debounced {
				wake = wake.min(pending.due);
			}
			if let Some(task) = self.state.task()
				&& !task.progress_shown
			{
				wake = wake.min(task.started + self.settings.progress_delay);
			}
			let wait = wake.saturating_duration_since(now);

			if self.state.task().is_none() {
				thread::sleep(wait);
				continue;
			}
			match self.envelopes.recv_timeout(wait) {
				Ok(envelope) => self.handle_envelope(envelope),
				Err(RecvTimeoutError::Timeout) => {}
				Err(RecvTimeoutError::Disconnected) => self.worker_lost(),
			}
		}
	}

	/// Rebuild every filter's cached data and rerun the current query.
	///
	/// Returns the filters whose refresh failed.
	pub fn refresh(&mut self) -> Vec<(&'static str, anyhow::Error)> {
		let failures = self.registry.refresh_all();
		info!(
			"refreshed {} filters ({} failed)",
			self.registry.len(),
			failures.len()
		);
		self.submit_query(self.text.clone());
		failures
	}

	/// Drain pending host notifications.
	pub fn take_events(&mut self) -> Vec<LocatorEvent> {
		mem::take(&mut self.events)
	}

	#[must_use]
	pub fn model(&self) -> &ResultModel {
		&self.model
	}

	pub fn model_mut(&mut self) -> &mut ResultModel {
		&mut self.model
	}

	#[must_use]
	pub fn registry(&self) -> &FilterRegistry {
		&self.registry
	}

	/// Mutable registry access. Changes apply from the next search.
	pub fn registry_mut(&mut self) -> &mut FilterRegistry {
		&mut self.registry
	}

	#[must_use]
	pub fn settings(&self) -> &LocatorSettings {
		&self.settings
	}

	#[must_use]
	pub fn phase(&self) -> SearchPhase {
		self.state.phase()
	}

	/// No pass is running and no debounced query is waiting.
	#[must_use]
	pub fn is_idle(&self) -> bool {
		matches!(self.state, SearchState::Idle) && self.debounced.is_none()
	}

	fn start_search(&mut self, text: &str) {
		let request = resolve_filters(&self.registry.filters(), text);
		for filter in &request.filters {
			filter.prepare_search(&request.search_text);
		}

		let task = InFlight::new(self.next_id);
		self.next_id += 1;
		let command = SearchCommand::Run {
			id: task.id,
			filters: request.filters.clone(),
			search_text: request.search_text.clone(),
			cancel: task.cancel.clone(),
			batch_size: self.settings.batch_size,
		};
		if self.commands.send(command).is_err() {
			error!("search worker is gone, dropping query {text:?}");
			return;
		}

		debug!(
			"search {} started for {:?} with filters {:?}",
			task.id,
			request.search_text,
			request.filter_ids()
		);
		self.events.push(LocatorEvent::SearchStarted {
			id: task.id,
			search_text: request.search_text.clone(),
			filters: request.filter_ids(),
		});
		self.state = SearchState::Searching(task);
	}

	fn handle_envelope(&mut self, envelope: SearchEnvelope) {
		let Some(task) = self.state.task_mut() else {
			trace!("ignoring envelope for search {} while idle", envelope.id);
			return;
		};
		if task.id != envelope.id {
			trace!(
				"ignoring stale envelope for search {} (current {})",
				envelope.id, task.id
			);
			return;
		}

		match envelope.payload {
			SearchPayload::Batch(entries) => {
				let first_after_clear = mem::replace(&mut task.needs_clear, false);
				if first_after_clear {
					self.model.clear();
				}
				self.model.append_batch(entries);
				if first_after_clear
					&& self.model.set_current(0)
					&& let SearchState::SearchingWithPendingAccept { task, row } = &mut self.state
				{
					debug!("pending accept of row {row} retargeted to row 0 of search {}", task.id);
					*row = 0;
					task.cancel.cancel();
				}
			}
			SearchPayload::Finished { cancelled } => self.settle(cancelled),
		}
	}

	/// Perform the single settling action for the in-flight pass.
	fn settle(&mut self, cancelled: bool) {
		match mem::take(&mut self.state) {
			SearchState::Idle => {}
			SearchState::Searching(task) => {
				if task.needs_clear {
					self.model.clear();
				}
				self.finish(&task, cancelled);
			}
			SearchState::SearchingWithPendingRestart { task, text } => {
				self.finish(&task, cancelled);
				self.start_search(&text);
			}
			SearchState::SearchingWithPendingAccept { task, row } => {
				// A pass that ran to completion without a batch found nothing.
				if task.needs_clear && !cancelled {
					self.model.clear();
				}
				self.finish(&task, cancelled);
				self.accept_row(row);
			}
		}
	}

	fn finish(&mut self, task: &InFlight, cancelled: bool) {
		debug!(
			"search {} finished after {:?} (cancelled: {cancelled}, rows: {})",
			task.id,
			task.started.elapsed(),
			self.model.len()
		);
		self.events.push(LocatorEvent::SearchFinished {
			id: task.id,
			cancelled,
			rows: self.model.len(),
		});
		if task.progress_shown {
			self.events
				.push(LocatorEvent::ProgressVisible { visible: false });
		}
	}

	fn accept_row(&mut self, row: usize) {
		let Some(entry) = self.model.entry(row) else {
			debug!("accept of row {row} dropped, model has {} rows", self.model.len());
			return;
		};
		let Some(filter) = entry.filter() else {
			warn!(
				"accept of {:?} dropped, filter {} is no longer registered",
				entry.display_name(),
				entry.filter_id()
			);
			return;
		};
		let filter_entry = entry.filter_entry().clone();
		let outcome = filter.accept(&filter_entry);
		info!("{} accepted {:?}", filter.id(), filter_entry.display_name);

		self.events.push(LocatorEvent::Accepted {
			filter_id: filter.id(),
			display_name: filter_entry.display_name,
			file_path: filter_entry.file_path,
			outcome: outcome.clone(),
		});
		if outcome.dismisses() {
			self.events.push(LocatorEvent::Dismissed);
			return;
		}
		self.events.push(LocatorEvent::TextReplaced {
			text: outcome.new_text.clone(),
			selection_start: outcome.selection_start,
			selection_length: outcome.selection_length,
		});
		self.submit_query(outcome.new_text);
	}

	fn update_progress(&mut self) {
		let delay = self.settings.progress_delay;
		if let Some(task) = self.state.task_mut()
			&& !task.progress_shown
			&& task.started.elapsed() >= delay
		{
			task.progress_shown = true;
			self.events
				.push(LocatorEvent::ProgressVisible { visible: true });
		}
	}

	fn worker_lost(&mut self) {
		if let Some(task) = self.state.task() {
			error!("search worker disconnected during search {}", task.id);
		}
		self.state = SearchState::Idle;
	}
}

impl Drop for Locator {
	fn drop(&mut self) {
		if let Some(task) = self.state.task() {
			task.cancel.cancel();
		}
		let _ = self.commands.send(SearchCommand::Shutdown);
	}
}
