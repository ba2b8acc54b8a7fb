//! Streaming primitives for delivering search output across threads.
//!
//! A background worker owns a [`DataStream`] handle and pushes payloads back
//! to the coordinating thread through an [`mpsc`] channel. Every payload is
//! wrapped in a [`StreamEnvelope`] carrying the identifier of the request that
//! produced it, so the consumer can discard output from superseded requests.
//! Long running producers poll a shared [`CancelToken`] to stop early.
//!
//! ```
//! use std::sync::mpsc;
//!
//! use locus_stream::{CancelToken, DataStream, StreamEnvelope};
//!
//! let (tx, rx) = mpsc::channel::<StreamEnvelope<Vec<&str>>>();
//! let token = CancelToken::new();
//! let stream = DataStream::new(&tx, 7);
//! assert!(stream.send(vec!["alpha", "beta"], false));
//! token.cancel();
//! assert!(stream.send(Vec::new(), token.is_cancelled()));
//!
//! let first = rx.recv().unwrap();
//! assert_eq!(first.id, 7);
//! assert_eq!(first.payload, vec!["alpha", "beta"]);
//! assert!(rx.recv().unwrap().complete);
//! ```
//!
//! [`mpsc`]: std::sync::mpsc

mod cancel;

pub use cancel::CancelToken;

use std::sync::mpsc::Sender;

/// Message emitted by a background system and delivered to the coordinating thread.
#[derive(Debug)]
pub struct StreamEnvelope<P> {
	/// Identifier correlating the message with a request.
	pub id: u64,
	/// Payload delivered to the consumer.
	pub payload: P,
	/// Whether the producer finished streaming for this identifier.
	pub complete: bool,
}

/// Handle for producing stream messages backed by an [`mpsc::Sender`].
///
/// [`mpsc::Sender`]: std::sync::mpsc::Sender
pub struct DataStream<'a, P> {
	tx: &'a Sender<StreamEnvelope<P>>,
	id: u64,
}

impl<'a, P: Send + 'static> DataStream<'a, P> {
	/// Create a new handle backed by the provided sender.
	#[must_use]
	pub fn new(tx: &'a Sender<StreamEnvelope<P>>, id: u64) -> Self {
		Self { tx, id }
	}

	/// Emit a payload to the consumer.
	///
	/// Returns `false` once the receiving side has hung up, which producers
	/// treat as a signal to stop working.
	pub fn send(&self, payload: P, complete: bool) -> bool {
		self.tx
			.send(StreamEnvelope {
				id: self.id,
				payload,
				complete,
			})
			.is_ok()
	}
}
