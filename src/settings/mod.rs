//! Configuration loading and resolution.
//!
//! `load` layers the default config files, explicit `--config` files and
//! `LOCUS__` environment variables, applies CLI overrides and validates the
//! result into a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
