use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag used to request cooperative cancellation of a running pass.
///
/// Cancellation is advisory: producers poll [`CancelToken::is_cancelled`]
/// between units of work and stop emitting once they observe it. Clones share
/// the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
	flag: Arc<AtomicBool>,
}

impl CancelToken {
	/// Create a token that has not been cancelled.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Request cancellation. Idempotent.
	pub fn cancel(&self) {
		self.flag.store(true, Ordering::Release);
	}

	/// Whether cancellation has been requested.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.flag.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clones_observe_cancellation() {
		let token = CancelToken::new();
		let worker_side = token.clone();
		assert!(!worker_side.is_cancelled());
		token.cancel();
		token.cancel();
		assert!(worker_side.is_cancelled());
	}
}
