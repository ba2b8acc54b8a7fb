//! Incremental, cancellable multi-filter search behind a locator popup.
//!
//! A [`Locator`] resolves each query to a set of [`LocatorFilter`]s, runs them
//! one after another on a background worker and streams their entries into a
//! [`ResultModel`] in batches. Newer queries and committed selections cancel
//! the running pass and are applied once it has settled.
//!
//! Filters live in a [`FilterRegistry`]; the file-name filter from
//! `locus-filters-files` and the shortcut listing in [`builtin`] are the
//! filters shipped with the `locus` binary.

pub mod app_dirs;
pub mod builtin;
pub mod locator;
pub mod logging;
pub mod model;
pub mod search;

#[cfg(test)]
mod test_support;

pub use locator::{Locator, LocatorEvent, LocatorSettings, SearchPhase};
pub use model::{ModelChange, ModelObserver, ResultEntry, ResultModel};
pub use search::{SearchRequest, resolve_filters};

pub use locus_filter_api::{
	AcceptOutcome, CancelToken, DecorationProvider, ExtensionIcons, FilterDescriptor,
	FilterEntry, FilterOverrides, FilterPriority, FilterQuery, FilterRegistry,
	FilterRegistryError, HighlightField, HighlightInfo, Icon, LocatorFilter, RegisteredFilter,
	Rgb,
};
