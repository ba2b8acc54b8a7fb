//! Logger setup for the `locus` binary.
//!
//! Library code only talks to the `log` facade. `RUST_LOG`, when set, takes
//! precedence over the verbosity passed on the command line.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Map repeated `-v` flags to a log level.
#[must_use]
pub fn level_for(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the global logger. Later calls are ignored.
pub fn initialize(verbosity: u8) {
	let mut builder = Builder::new();
	builder
		.filter_level(level_for(verbosity))
		.parse_env(Env::default())
		.format_timestamp_millis()
		.format_target(true);
	if builder.try_init().is_err() {
		log::debug!("logger already initialised");
	}
}
