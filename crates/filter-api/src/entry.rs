use std::path::PathBuf;

use serde::Serialize;

/// Field of an entry that a [`HighlightInfo`] span refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightField {
	#[default]
	DisplayName,
	ExtraInfo,
}

/// Character span of a match inside one of the entry's text fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HighlightInfo {
	pub field: HighlightField,
	pub start: usize,
	pub length: usize,
}

impl HighlightInfo {
	#[must_use]
	pub fn new(field: HighlightField, start: usize, length: usize) -> Self {
		Self {
			field,
			start,
			length,
		}
	}

	/// Build a span covering every matched character position.
	///
	/// Returns `None` when `indices` is empty.
	#[must_use]
	pub fn covering(field: HighlightField, indices: &[usize]) -> Option<Self> {
		let start = *indices.iter().min()?;
		let end = *indices.iter().max()?;
		Some(Self::new(field, start, end - start + 1))
	}
}

/// A single search result produced by a filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
	/// Primary text shown for the entry.
	pub display_name: String,
	/// Secondary text, typically a location or signature.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub extra_info: Option<String>,
	/// File backing the entry, used to resolve decorations.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_path: Option<PathBuf>,
	/// Opaque payload the producing filter reads back in `accept`.
	#[serde(skip)]
	pub data: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub highlight: Option<HighlightInfo>,
}

impl FilterEntry {
	#[must_use]
	pub fn new(display_name: impl Into<String>) -> Self {
		Self {
			display_name: display_name.into(),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_extra_info(mut self, extra_info: impl Into<String>) -> Self {
		self.extra_info = Some(extra_info.into());
		self
	}

	#[must_use]
	pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.file_path = Some(path.into());
		self
	}

	#[must_use]
	pub fn with_data(mut self, data: impl Into<String>) -> Self {
		self.data = Some(data.into());
		self
	}

	#[must_use]
	pub fn with_highlight(mut self, highlight: HighlightInfo) -> Self {
		self.highlight = Some(highlight);
		self
	}

	/// Whether the entry carries non-empty secondary text.
	#[must_use]
	pub fn has_extra_info(&self) -> bool {
		self.extra_info.as_deref().is_some_and(|info| !info.is_empty())
	}
}

/// Result of accepting an entry.
///
/// An empty `new_text` means the filter fully handled the entry and the
/// locator can be dismissed. Otherwise the host replaces the input text with
/// `new_text` and places the selection as described.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AcceptOutcome {
	pub new_text: String,
	/// Start of the selection in `new_text`; `None` selects the whole text.
	pub selection_start: Option<usize>,
	pub selection_length: usize,
}

impl AcceptOutcome {
	/// Outcome for filters that acted on the entry and need no follow-up query.
	#[must_use]
	pub fn done() -> Self {
		Self::default()
	}

	/// Replace the input with `text`, placing the caret at `caret`.
	#[must_use]
	pub fn replace_with(text: impl Into<String>, caret: usize) -> Self {
		Self {
			new_text: text.into(),
			selection_start: Some(caret),
			selection_length: 0,
		}
	}

	#[must_use]
	pub fn dismisses(&self) -> bool {
		self.new_text.is_empty()
	}
}
