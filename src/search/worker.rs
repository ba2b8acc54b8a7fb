use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::{debug, trace};

use super::aggregator::{PassOutcome, run_search};
use super::commands::{SearchCommand, SearchEnvelope, SearchStream};

/// Launch the background search worker and return its channels.
///
/// The worker runs one pass per [`SearchCommand::Run`] and exits on
/// [`SearchCommand::Shutdown`], when the command sender is dropped, or when
/// the envelope receiver hangs up.
pub(crate) fn spawn() -> io::Result<(Sender<SearchCommand>, Receiver<SearchEnvelope>)> {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();

	thread::Builder::new()
		.name("locus-search".into())
		.spawn(move || worker_loop(&command_rx, &result_tx))?;

	Ok((command_tx, result_rx))
}

fn worker_loop(command_rx: &Receiver<SearchCommand>, result_tx: &Sender<SearchEnvelope>) {
	debug!("search worker started");
	while let Ok(command) = command_rx.recv() {
		if !handle_command(result_tx, command) {
			break;
		}
	}
	debug!("search worker stopped");
}

fn handle_command(result_tx: &Sender<SearchEnvelope>, command: SearchCommand) -> bool {
	match command {
		SearchCommand::Run {
			id,
			filters,
			search_text,
			cancel,
			batch_size,
		} => {
			let stream = SearchStream::new(result_tx, id);
			let outcome = run_search(&filters, &search_text, &stream, &cancel, batch_size);
			trace!("search {id} ended: {outcome:?}");
			outcome != PassOutcome::HungUp
		}
		SearchCommand::Shutdown => false,
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use locus_filter_api::CancelToken;

	use super::*;
	use crate::search::SearchPayload;
	use crate::test_support::{ScriptedFilter, registry_with};

	#[test]
	fn run_command_streams_a_complete_pass() {
		let registry = registry_with(vec![Arc::new(ScriptedFilter::new("a", &["x", "y"]))]);
		let (tx, rx) = spawn().unwrap();

		tx.send(SearchCommand::Run {
			id: 9,
			filters: registry.filters(),
			search_text: "q".into(),
			cancel: CancelToken::new(),
			batch_size: 1,
		})
		.unwrap();

		let mut batches = 0;
		loop {
			let envelope = rx.recv_timeout(Duration::from_secs(2)).unwrap();
			assert_eq!(envelope.id, 9);
			match envelope.payload {
				SearchPayload::Batch(_) => batches += 1,
				SearchPayload::Finished { cancelled } => {
					assert!(!cancelled);
					assert!(envelope.complete);
					break;
				}
			}
		}
		assert_eq!(batches, 2);
		tx.send(SearchCommand::Shutdown).unwrap();
	}

	#[test]
	fn shutdown_command_stops_worker() {
		let (tx, rx) = spawn().unwrap();
		tx.send(SearchCommand::Shutdown).unwrap();
		assert!(rx.recv_timeout(Duration::from_secs(2)).is_err());
	}
}
