use std::fmt::Write;

use super::ResolvedConfig;

pub(super) fn format_summary(config: &ResolvedConfig) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "Effective configuration:");
	let _ = writeln!(out, "  Root: {}", config.root.display());
	let _ = writeln!(out, "  Batch size: {}", config.search.batch_size);
	let _ = writeln!(out, "  Debounce: {:?}", config.search.debounce);
	let _ = writeln!(out, "  Progress delay: {:?}", config.search.progress_delay);
	let _ = writeln!(
		out,
		"  Include hidden: {}",
		bool_to_word(config.files.include_hidden)
	);
	let _ = writeln!(
		out,
		"  Follow symlinks: {}",
		bool_to_word(config.files.follow_symlinks)
	);
	let _ = writeln!(
		out,
		"  Respect ignore files: {}",
		bool_to_word(config.files.respect_ignore_files)
	);
	match config.files.max_depth {
		Some(depth) => {
			let _ = writeln!(out, "  Max depth: {depth}");
		}
		None => {
			let _ = writeln!(out, "  Max depth: unlimited");
		}
	}
	let _ = writeln!(out, "  Max results: {}", config.files.max_results);
	if !config.files.global_ignores.is_empty() {
		let _ = writeln!(
			out,
			"  Global ignores: {}",
			config.files.global_ignores.join(", ")
		);
	}
	for (id, overrides) in &config.filters {
		if let Some(shortcut) = &overrides.shortcut {
			let _ = writeln!(out, "  Filter {id} shortcut: {shortcut:?}");
		}
		if let Some(included) = overrides.included_by_default {
			let _ = writeln!(
				out,
				"  Filter {id} included by default: {}",
				bool_to_word(included)
			);
		}
	}
	out
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;
	use std::path::PathBuf;

	use locus::{FilterOverrides, LocatorSettings};
	use locus_filters_files::FileFilterOptions;

	use super::*;

	#[test]
	fn bool_to_word_matches_expectations() {
		assert_eq!(bool_to_word(true), "yes");
		assert_eq!(bool_to_word(false), "no");
	}

	#[test]
	fn summary_lists_filter_overrides() {
		let mut filters = BTreeMap::new();
		filters.insert(
			"files".to_string(),
			FilterOverrides {
				shortcut: Some("file".into()),
				included_by_default: Some(false),
			},
		);
		let config = ResolvedConfig {
			root: PathBuf::from("/tmp"),
			files: FileFilterOptions::default(),
			search: LocatorSettings::default(),
			filters,
		};

		let summary = format_summary(&config);
		assert!(summary.contains("Root: /tmp"));
		assert!(summary.contains("Max results: 200"));
		assert!(summary.contains("Filter files shortcut: \"file\""));
		assert!(summary.contains("Filter files included by default: no"));
	}
}
