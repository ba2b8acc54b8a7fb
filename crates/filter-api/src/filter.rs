use anyhow::Result;

use crate::descriptor::FilterDescriptor;
use crate::entry::{AcceptOutcome, FilterEntry};
use locus_stream::CancelToken;

/// Inputs handed to a filter when it is asked for matches.
///
/// Wrapping the arguments keeps the trait signature stable when more
/// per-search state is exposed later.
pub struct FilterQuery<'a> {
	search_text: &'a str,
	cancel: &'a CancelToken,
}

impl<'a> FilterQuery<'a> {
	#[must_use]
	pub fn new(search_text: &'a str, cancel: &'a CancelToken) -> Self {
		Self {
			search_text,
			cancel,
		}
	}

	/// Query text with any filter prefix already stripped.
	#[must_use]
	pub fn search_text(&self) -> &'a str {
		self.search_text
	}

	/// Whether the pass has been cancelled. Filters scanning large data sets
	/// should check this periodically and return early.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	#[must_use]
	pub fn cancel_token(&self) -> &'a CancelToken {
		self.cancel
	}
}

/// A pluggable search provider matching one category of items.
///
/// `prepare_search` and `accept` run on the coordinating thread.
/// `matches_for` runs on the search worker and must not assume otherwise.
pub trait LocatorFilter: Send + Sync {
	/// Static descriptor advertising filter metadata.
	fn descriptor(&self) -> &'static FilterDescriptor;

	/// Called once per search, before the worker pass starts.
	fn prepare_search(&self, _search_text: &str) {}

	/// Produce entries for the query, already ordered by relevance.
	fn matches_for(&self, query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>>;

	/// Act on an entry the user picked.
	fn accept(&self, entry: &FilterEntry) -> AcceptOutcome;

	/// Rebuild any cached data the filter searches over.
	fn refresh(&self) -> Result<()> {
		Ok(())
	}
}
