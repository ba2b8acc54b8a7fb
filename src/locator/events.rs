use std::path::PathBuf;

use locus_filter_api::AcceptOutcome;
use serde::Serialize;

/// Notifications for the host, drained with [`Locator::take_events`].
///
/// [`Locator::take_events`]: super::Locator::take_events
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LocatorEvent {
	SearchStarted {
		id: u64,
		search_text: String,
		filters: Vec<&'static str>,
	},
	SearchFinished {
		id: u64,
		cancelled: bool,
		rows: usize,
	},
	/// The busy indicator should be shown or hidden.
	ProgressVisible { visible: bool },
	/// A filter accepted one of its entries.
	Accepted {
		filter_id: &'static str,
		display_name: String,
		file_path: Option<PathBuf>,
		outcome: AcceptOutcome,
	},
	/// The accept left nothing to show; the popup should close.
	Dismissed,
	/// The accept replaced the input text and started a new search.
	TextReplaced {
		text: String,
		selection_start: Option<usize>,
		selection_length: usize,
	},
}
