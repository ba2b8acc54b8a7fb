/// Ordering bucket used when the registry lists its filters.
///
/// Higher priority filters are queried first, so their entries appear first in
/// the aggregated result list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterPriority {
	High,
	#[default]
	Medium,
	Low,
}

/// Static metadata advertised by a filter.
#[derive(Debug)]
pub struct FilterDescriptor {
	/// Stable identifier, unique within a registry.
	pub id: &'static str,
	/// Human readable name shown in filter listings.
	pub display_name: &'static str,
	/// Default prefix token routing a query to this filter. Empty disables
	/// prefix routing.
	pub shortcut: &'static str,
	/// Whether the filter runs for queries without a recognised prefix.
	pub included_by_default: bool,
	pub priority: FilterPriority,
}
