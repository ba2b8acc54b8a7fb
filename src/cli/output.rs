use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use locus::{FilterRegistry, HighlightInfo, LocatorEvent, ResultModel};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

const CURRENT_MARKER: &str = "> ";
const ROW_MARKER: &str = "  ";
const COLUMN_GAP: usize = 2;

/// One settled search, as printed by the binary.
#[derive(Debug, Serialize)]
pub(crate) struct Report<'a> {
	pub(crate) query: &'a str,
	/// Whether the search settled before the timeout.
	pub(crate) settled: bool,
	pub(crate) rows: Vec<Row<'a>>,
	pub(crate) events: Vec<LocatorEvent>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Row<'a> {
	display_name: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	extra_info: Option<&'a str>,
	filter: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	file_path: Option<&'a Path>,
	#[serde(skip_serializing_if = "Option::is_none")]
	highlight: Option<HighlightInfo>,
	current: bool,
}

impl<'a> Report<'a> {
	pub(crate) fn new(
		query: &'a str,
		settled: bool,
		model: &'a ResultModel,
		events: Vec<LocatorEvent>,
	) -> Self {
		let rows = model
			.entries()
			.iter()
			.enumerate()
			.map(|(index, entry)| Row {
				display_name: entry.display_name(),
				extra_info: entry.extra_info().filter(|info| !info.is_empty()),
				filter: entry.filter_id(),
				file_path: entry.filter_entry().file_path.as_deref(),
				highlight: entry.filter_entry().highlight,
				current: model.current() == Some(index),
			})
			.collect();
		Self {
			query,
			settled,
			rows,
			events,
		}
	}
}

/// Render a report as aligned plain text.
///
/// Extra info is printed in a second column only when some row has it.
pub(crate) fn format_plain(report: &Report<'_>) -> String {
	let mut out = String::new();
	if !report.settled {
		let _ = writeln!(out, "search for {:?} did not settle", report.query);
	}

	let has_extra_info = report.rows.iter().any(|row| row.extra_info.is_some());
	let name_width = report
		.rows
		.iter()
		.map(|row| row.display_name.width())
		.max()
		.unwrap_or(0);

	for row in &report.rows {
		let marker = if row.current { CURRENT_MARKER } else { ROW_MARKER };
		out.push_str(marker);
		out.push_str(row.display_name);
		if has_extra_info && let Some(info) = row.extra_info {
			let padding = name_width - row.display_name.width() + COLUMN_GAP;
			out.push_str(&" ".repeat(padding));
			out.push_str(info);
		}
		out.push('\n');
	}

	for event in &report.events {
		if let Some(line) = format_event(event) {
			let _ = writeln!(out, "{line}");
		}
	}
	out
}

fn format_event(event: &LocatorEvent) -> Option<String> {
	match event {
		LocatorEvent::Accepted {
			filter_id,
			display_name,
			file_path,
			..
		} => Some(match file_path {
			Some(path) => format!("accepted {filter_id}: {}", path.display()),
			None => format!("accepted {filter_id}: {display_name}"),
		}),
		LocatorEvent::TextReplaced { text, .. } => Some(format!("query replaced with {text:?}")),
		LocatorEvent::SearchStarted { .. }
		| LocatorEvent::SearchFinished { .. }
		| LocatorEvent::ProgressVisible { .. }
		| LocatorEvent::Dismissed => None,
	}
}

pub(crate) fn format_json(report: &Report<'_>) -> Result<String> {
	Ok(serde_json::to_string_pretty(report)?)
}

/// Table of the registered filters with their effective routing.
pub(crate) fn format_filter_list(registry: &FilterRegistry) -> String {
	let filters = registry.filters();
	let id_width = filters
		.iter()
		.map(|filter| filter.id().width())
		.max()
		.unwrap_or(0);
	let shortcut_width = filters
		.iter()
		.map(|filter| filter.shortcut().width())
		.max()
		.unwrap_or(0);

	let mut out = String::new();
	for filter in &filters {
		let default = if filter.is_included_by_default() {
			"default"
		} else {
			"prefix only"
		};
		let _ = writeln!(
			out,
			"{:<id_width$}  {:<shortcut_width$}  {:<11}  {}",
			filter.id(),
			filter.shortcut(),
			default,
			filter.display_name(),
		);
	}
	out
}
