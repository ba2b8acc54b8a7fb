//! Filters shipped with the locator itself.

mod filters;

pub use filters::{FILTER_ID as FILTERS_FILTER_ID, FilterListFilter};
