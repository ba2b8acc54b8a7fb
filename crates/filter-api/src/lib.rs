//! Interfaces shared between the locator pipeline and the filters plugged into it.
//!
//! Filters implement [`LocatorFilter`] and are registered in a
//! [`FilterRegistry`]. The pipeline only ever talks to filters through this
//! trait; concrete filter types live in their own crates.

pub mod decoration;
pub mod descriptor;
pub mod entry;
pub mod error;
pub mod filter;
pub mod registry;

pub use decoration::{DecorationProvider, ExtensionIcons, Icon, Rgb};
pub use descriptor::{FilterDescriptor, FilterPriority};
pub use entry::{AcceptOutcome, FilterEntry, HighlightField, HighlightInfo};
pub use error::FilterRegistryError;
pub use filter::{FilterQuery, LocatorFilter};
pub use locus_stream::CancelToken;
pub use registry::{FilterOverrides, FilterRegistry, RegisteredFilter};
