use std::sync::Arc;

use locus_filter_api::RegisteredFilter;

/// Filters and search text derived from one raw input string.
#[derive(Clone, Debug)]
pub struct SearchRequest {
	/// Input exactly as typed.
	pub text: String,
	/// Text handed to the filters, prefix token stripped and trimmed.
	pub search_text: String,
	/// Filters to query, in registry order.
	pub filters: Vec<Arc<RegisteredFilter>>,
	/// Whether the filters were selected by a shortcut prefix.
	pub prefix_matched: bool,
}

impl SearchRequest {
	#[must_use]
	pub fn filter_ids(&self) -> Vec<&'static str> {
		self.filters.iter().map(|filter| filter.id()).collect()
	}
}

/// Pick the filters for `text`.
///
/// A leading token followed by a space routes the query to every filter whose
/// shortcut equals the lower-cased token. Without such a match, the
/// default-included filters receive the whole trimmed input.
#[must_use]
pub fn resolve_filters(filters: &[Arc<RegisteredFilter>], text: &str) -> SearchRequest {
	let first_non_space = text
		.char_indices()
		.find(|(_, ch)| !ch.is_whitespace())
		.map_or(text.len(), |(index, _)| index);

	if let Some(offset) = text[first_non_space..].find(' ') {
		let space = first_non_space + offset;
		let prefix = text[first_non_space..space].to_lowercase();
		let prefixed: Vec<_> = filters
			.iter()
			.filter(|filter| {
				let shortcut = filter.shortcut();
				!shortcut.is_empty() && shortcut == prefix
			})
			.cloned()
			.collect();
		if !prefixed.is_empty() {
			return SearchRequest {
				text: text.to_string(),
				search_text: text[space..].trim().to_string(),
				filters: prefixed,
				prefix_matched: true,
			};
		}
	}

	SearchRequest {
		text: text.to_string(),
		search_text: text.trim().to_string(),
		filters: filters
			.iter()
			.filter(|filter| filter.is_included_by_default())
			.cloned()
			.collect(),
		prefix_matched: false,
	}
}
