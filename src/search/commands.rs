use std::sync::Arc;

use locus_filter_api::{CancelToken, RegisteredFilter};
use locus_stream::{DataStream, StreamEnvelope};

use crate::model::ResultEntry;

/// Commands understood by the background search worker.
#[derive(Debug)]
pub(crate) enum SearchCommand {
	/// Run one aggregator pass over the resolved filters.
	Run {
		/// Identifier that lets the coordinator correlate responses with the request.
		id: u64,
		filters: Vec<Arc<RegisteredFilter>>,
		/// Query text with any filter prefix stripped.
		search_text: String,
		cancel: CancelToken,
		batch_size: usize,
	},
	/// Stop the background worker thread.
	Shutdown,
}

/// Output of a search pass, delivered in production order.
#[derive(Debug)]
pub enum SearchPayload {
	/// Contiguous run of entries from a single filter.
	Batch(Vec<ResultEntry>),
	/// Terminal message for the pass. Always sent last, exactly once.
	Finished { cancelled: bool },
}

/// Envelope delivered from the worker to the coordinating thread.
pub type SearchEnvelope = StreamEnvelope<SearchPayload>;

/// Producer handle used by the aggregator.
pub type SearchStream<'a> = DataStream<'a, SearchPayload>;
