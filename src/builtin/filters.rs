use anyhow::Result;
use locus_filter_api::{
	AcceptOutcome, FilterDescriptor, FilterEntry, FilterPriority, FilterQuery, FilterRegistry,
	HighlightField, HighlightInfo, LocatorFilter,
};

pub const FILTER_ID: &str = "filters";

static DESCRIPTOR: FilterDescriptor = FilterDescriptor {
	id: FILTER_ID,
	display_name: "Available filters",
	shortcut: "?",
	included_by_default: false,
	priority: FilterPriority::High,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Shortcut {
	shortcut: String,
	display_name: &'static str,
}

/// Lists the shortcuts of the other registered filters.
///
/// Accepting an entry puts `"<shortcut> "` into the input so the next query
/// is routed to that filter.
#[derive(Debug, Default)]
pub struct FilterListFilter {
	shortcuts: Vec<Shortcut>,
}

impl FilterListFilter {
	/// Snapshot the effective shortcuts of `registry`.
	///
	/// Filters without a shortcut cannot be selected by prefix and are left out.
	#[must_use]
	pub fn from_registry(registry: &FilterRegistry) -> Self {
		let shortcuts = registry
			.filters()
			.iter()
			.filter(|filter| filter.id() != FILTER_ID && !filter.shortcut().is_empty())
			.map(|filter| Shortcut {
				shortcut: filter.shortcut(),
				display_name: filter.display_name(),
			})
			.collect();
		Self { shortcuts }
	}
}

impl LocatorFilter for FilterListFilter {
	fn descriptor(&self) -> &'static FilterDescriptor {
		&DESCRIPTOR
	}

	fn matches_for(&self, query: &FilterQuery<'_>) -> Result<Vec<FilterEntry>> {
		let needle = query.search_text().to_lowercase();
		Ok(self
			.shortcuts
			.iter()
			.filter(|item| item.shortcut.starts_with(&needle))
			.map(|item| {
				let mut entry = FilterEntry::new(item.shortcut.clone())
					.with_extra_info(item.display_name)
					.with_data(item.shortcut.clone());
				if !needle.is_empty() {
					entry = entry.with_highlight(HighlightInfo::new(
						HighlightField::DisplayName,
						0,
						needle.len(),
					));
				}
				entry
			})
			.collect())
	}

	fn accept(&self, entry: &FilterEntry) -> AcceptOutcome {
		let shortcut = entry.data.as_deref().unwrap_or(&entry.display_name);
		let text = format!("{shortcut} ");
		let caret = text.len();
		AcceptOutcome::replace_with(text, caret)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use locus_filter_api::{CancelToken, FilterOverrides};

	use super::*;
	use crate::locator::{Locator, LocatorEvent, LocatorSettings};
	use crate::test_support::{ScriptedFilter, display_names, registry_with};

	fn registry() -> FilterRegistry {
		let mut registry = registry_with(vec![
			Arc::new(ScriptedFilter::new("classes", &["Widget"])),
			Arc::new(ScriptedFilter::new("cmd", &[])),
		]);
		registry
			.configure(
				"cmd",
				&FilterOverrides {
					shortcut: Some(String::new()),
					..FilterOverrides::default()
				},
			)
			.unwrap();
		let list = FilterListFilter::from_registry(&registry);
		registry.register(list).unwrap();
		registry
	}

	fn names(filter: &FilterListFilter, text: &str) -> Vec<String> {
		let cancel = CancelToken::new();
		filter
			.matches_for(&FilterQuery::new(text, &cancel))
			.unwrap()
			.into_iter()
			.map(|entry| entry.display_name)
			.collect()
	}

	#[test]
	fn lists_shortcuts_except_its_own_and_empty_ones() {
		let registry = registry();
		let filter = FilterListFilter::from_registry(&registry);
		assert_eq!(names(&filter, ""), vec!["classes"]);
		assert_eq!(names(&filter, "CL"), vec!["classes"]);
		assert!(names(&filter, "x").is_empty());
	}

	#[test]
	fn entries_describe_the_target_filter() {
		let registry = registry();
		let filter = FilterListFilter::from_registry(&registry);
		let cancel = CancelToken::new();
		let entries = filter
			.matches_for(&FilterQuery::new("cla", &cancel))
			.unwrap();

		assert_eq!(entries[0].extra_info.as_deref(), Some("classes"));
		assert_eq!(
			entries[0].highlight,
			Some(HighlightInfo::new(HighlightField::DisplayName, 0, 3))
		);
	}

	#[test]
	fn accept_inserts_the_shortcut_prefix() {
		let filter = FilterListFilter::default();
		let outcome = filter.accept(&FilterEntry::new("cls").with_data("cls"));
		assert_eq!(outcome, AcceptOutcome::replace_with("cls ", 4));
	}

	#[test]
	fn accepting_a_shortcut_routes_the_next_search() {
		let mut locator = Locator::new(registry(), LocatorSettings::default()).unwrap();

		locator.submit_query("? ");
		assert!(locator.wait_until_idle(Duration::from_secs(5)));
		assert_eq!(display_names(&locator), vec!["classes"]);

		locator.commit_selection(0);
		assert_eq!(locator.current_text(), "classes ");
		assert!(locator.take_events().contains(&LocatorEvent::TextReplaced {
			text: "classes ".into(),
			selection_start: Some(8),
			selection_length: 0,
		}));
		assert!(locator.wait_until_idle(Duration::from_secs(5)));
		assert_eq!(display_names(&locator), vec!["Widget"]);
	}
}
