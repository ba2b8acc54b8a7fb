use std::time::Instant;

use locus_filter_api::CancelToken;

/// Bookkeeping for the search pass currently owned by the worker.
#[derive(Debug)]
pub(super) struct InFlight {
	pub id: u64,
	pub cancel: CancelToken,
	/// Results of the previous search are still displayed and must be
	/// replaced when this pass delivers its first batch.
	pub needs_clear: bool,
	pub started: Instant,
	pub progress_shown: bool,
}

impl InFlight {
	pub fn new(id: u64) -> Self {
		Self {
			id,
			cancel: CancelToken::new(),
			needs_clear: true,
			started: Instant::now(),
			progress_shown: false,
		}
	}
}

#[derive(Debug, Default)]
pub(super) enum SearchState {
	#[default]
	Idle,
	Searching(InFlight),
	SearchingWithPendingRestart { task: InFlight, text: String },
	SearchingWithPendingAccept { task: InFlight, row: usize },
}

impl SearchState {
	pub fn task(&self) -> Option<&InFlight> {
		match self {
			Self::Idle => None,
			Self::Searching(task)
			| Self::SearchingWithPendingRestart { task, .. }
			| Self::SearchingWithPendingAccept { task, .. } => Some(task),
		}
	}

	pub fn task_mut(&mut self) -> Option<&mut InFlight> {
		match self {
			Self::Idle => None,
			Self::Searching(task)
			| Self::SearchingWithPendingRestart { task, .. }
			| Self::SearchingWithPendingAccept { task, .. } => Some(task),
		}
	}

	pub fn phase(&self) -> SearchPhase {
		match self {
			Self::Idle => SearchPhase::Idle,
			Self::Searching(_) => SearchPhase::Searching,
			Self::SearchingWithPendingRestart { .. } => SearchPhase::SearchingWithPendingRestart,
			Self::SearchingWithPendingAccept { .. } => SearchPhase::SearchingWithPendingAccept,
		}
	}
}

/// Observable phase of the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
	Idle,
	Searching,
	/// A newer query is waiting for the cancelled pass to finish.
	SearchingWithPendingRestart,
	/// A committed row is waiting for the cancelled pass to finish.
	SearchingWithPendingAccept,
}
