//! Filter resolution and the background search pass.

mod aggregator;
mod commands;
mod resolve;
mod worker;

pub use aggregator::{PassOutcome, run_search};
pub use commands::{SearchEnvelope, SearchPayload, SearchStream};
pub use resolve::{SearchRequest, resolve_filters};

pub(crate) use commands::SearchCommand;
pub(crate) use worker::spawn;
