use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use locus_filter_api::{CancelToken, FilterQuery, RegisteredFilter};
use log::{debug, error, warn};

use super::commands::{SearchPayload, SearchStream};
use crate::model::ResultEntry;

/// How a search pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
	/// Every filter ran and the terminal message was delivered.
	Completed,
	/// Cancellation was observed. The terminal message was still delivered.
	Cancelled,
	/// The consumer went away.
	HungUp,
}

/// Run one pass over `filters` in order, streaming each filter's entries in
/// chunks of at most `batch_size`.
///
/// Filters run strictly one after another. A filter that fails or panics is
/// logged and skipped. Whatever happens, a single [`SearchPayload::Finished`]
/// closes the pass unless the receiver has hung up.
pub fn run_search(
	filters: &[Arc<RegisteredFilter>],
	search_text: &str,
	stream: &SearchStream<'_>,
	cancel: &CancelToken,
	batch_size: usize,
) -> PassOutcome {
	let batch_size = batch_size.max(1);

	for filter in filters {
		if cancel.is_cancelled() {
			break;
		}

		let query = FilterQuery::new(search_text, cancel);
		let entries = match panic::catch_unwind(AssertUnwindSafe(|| filter.matches_for(&query))) {
			Ok(Ok(entries)) => entries,
			Ok(Err(err)) => {
				warn!("filter {} failed for {search_text:?}: {err:#}", filter.id());
				continue;
			}
			Err(payload) => {
				error!(
					"filter {} panicked for {search_text:?}: {}",
					filter.id(),
					panic_message(payload.as_ref())
				);
				continue;
			}
		};
		debug!(
			"filter {} produced {} entries for {search_text:?}",
			filter.id(),
			entries.len()
		);

		let mut entries = entries.into_iter();
		loop {
			if cancel.is_cancelled() {
				break;
			}
			let batch: Vec<_> = entries
				.by_ref()
				.take(batch_size)
				.map(|entry| ResultEntry::new(entry, filter))
				.collect();
			if batch.is_empty() {
				break;
			}
			if !stream.send(SearchPayload::Batch(batch), false) {
				return PassOutcome::HungUp;
			}
		}
	}

	let cancelled = cancel.is_cancelled();
	if !stream.send(SearchPayload::Finished { cancelled }, true) {
		return PassOutcome::HungUp;
	}
	if cancelled {
		PassOutcome::Cancelled
	} else {
		PassOutcome::Completed
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	payload
		.downcast_ref::<&str>()
		.copied()
		.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
		.unwrap_or("non-string panic payload")
}
