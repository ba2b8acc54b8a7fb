//! Ordered, append-only result list backing the completion popup.

mod entry;


use locus_filter_api::{DecorationProvider, HighlightField, HighlightInfo, Icon};

pub use entry::ResultEntry;

pub const DISPLAY_NAME_COLUMN: usize = 0;
pub const EXTRA_INFO_COLUMN: usize = 1;

/// Structural change reported to model observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelChange {
	/// Every row was removed.
	Reset,
	/// Rows `first..=last` were appended.
	RowsInserted { first: usize, last: usize },
	/// Columns `first..=last` became visible.
	ColumnsInserted { first: usize, last: usize },
}

/// Receives structural notifications from a [`ResultModel`].
pub trait ModelObserver {
	fn model_changed(&mut self, change: ModelChange);
}

impl<F> ModelObserver for F
where
	F: FnMut(ModelChange),
{
	fn model_changed(&mut self, change: ModelChange) {
		self(change);
	}
}

/// Result sink filled by the coordinator as batches arrive.
#[derive(Default)]
pub struct ResultModel {
	entries: Vec<ResultEntry>,
	has_extra_info: bool,
	current: Option<usize>,
	observers: Vec<Box<dyn ModelObserver>>,
}

impl ResultModel {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an observer for reset, row and column notifications.
	pub fn subscribe(&mut self, observer: impl ModelObserver + 'static) {
		self.observers.push(Box::new(observer));
	}

	fn notify(&mut self, change: ModelChange) {
		for observer in &mut self.observers {
			observer.model_changed(change);
		}
	}

	/// Drop all entries and reset the extra-info column.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.has_extra_info = false;
		self.current = None;
		self.notify(ModelChange::Reset);
	}

	/// Append a batch in arrival order.
	///
	/// The extra-info column appears the first time any entry carries
	/// secondary text and stays until the next [`clear`](Self::clear).
	pub fn append_batch(&mut self, batch: Vec<ResultEntry>) {
		if batch.is_empty() {
			return;
		}
		let first = self.entries.len();
		let reveals_extra_info =
			!self.has_extra_info && batch.iter().any(|entry| entry.filter_entry().has_extra_info());
		self.entries.extend(batch);
		self.notify(ModelChange::RowsInserted {
			first,
			last: self.entries.len() - 1,
		});

		if reveals_extra_info {
			self.has_extra_info = true;
			self.notify(ModelChange::ColumnsInserted {
				first: EXTRA_INFO_COLUMN,
				last: EXTRA_INFO_COLUMN,
			});
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub fn entry(&self, row: usize) -> Option<&ResultEntry> {
		self.entries.get(row)
	}

	#[must_use]
	pub fn entries(&self) -> &[ResultEntry] {
		&self.entries
	}

	#[must_use]
	pub fn has_extra_info(&self) -> bool {
		self.has_extra_info
	}

	#[must_use]
	pub fn column_count(&self) -> usize {
		if self.has_extra_info { 2 } else { 1 }
	}

	/// Text shown in a cell.
	#[must_use]
	pub fn display_text(&self, row: usize, column: usize) -> Option<&str> {
		let entry = self.entries.get(row)?;
		match column {
			DISPLAY_NAME_COLUMN => Some(entry.display_name()),
			EXTRA_INFO_COLUMN if self.has_extra_info => Some(entry.extra_info().unwrap_or("")),
			_ => None,
		}
	}

	/// Tooltip text: the display name, followed by the extra info when present.
	#[must_use]
	pub fn tooltip(&self, row: usize) -> Option<String> {
		let entry = self.entries.get(row)?;
		Some(match entry.extra_info().filter(|info| !info.is_empty()) {
			Some(info) => format!("{}\n\n{info}", entry.display_name()),
			None => entry.display_name().to_string(),
		})
	}

	/// Highlight span for a cell, if the entry highlights that column.
	#[must_use]
	pub fn highlight(&self, row: usize, column: usize) -> Option<HighlightInfo> {
		let highlight = self.entries.get(row)?.filter_entry().highlight?;
		let highlight_column = match highlight.field {
			HighlightField::DisplayName => DISPLAY_NAME_COLUMN,
			HighlightField::ExtraInfo => EXTRA_INFO_COLUMN,
		};
		(highlight_column == column).then_some(highlight)
	}

	/// Decoration for a row, resolved on first read and memoised on the entry.
	pub fn decoration(&self, row: usize, provider: &dyn DecorationProvider) -> Option<Icon> {
		self.entries.get(row)?.decoration(provider)
	}

	#[must_use]
	pub fn current(&self) -> Option<usize> {
		self.current
	}

	/// Make `row` the current row. Returns `false` when it is out of range.
	pub fn set_current(&mut self, row: usize) -> bool {
		if row >= self.entries.len() {
			return false;
		}
		self.current = Some(row);
		true
	}

	/// Move to the next row, wrapping to the first.
	pub fn select_next(&mut self) -> Option<usize> {
		if self.entries.is_empty() {
			return None;
		}
		let next = match self.current {
			Some(row) if row + 1 < self.entries.len() => row + 1,
			_ => 0,
		};
		self.current = Some(next);
		self.current
	}

	/// Move to the previous row, wrapping to the last.
	pub fn select_previous(&mut self) -> Option<usize> {
		if self.entries.is_empty() {
			return None;
		}
		let previous = match self.current {
			Some(row) if row > 0 => row - 1,
			_ => self.entries.len() - 1,
		};
		self.current = Some(previous);
		self.current
	}
}
