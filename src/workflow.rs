use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use locus::builtin::{FILTERS_FILTER_ID, FilterListFilter};
use locus::{FilterRegistry, Locator};
use locus_filters_files::FileFilter;
use log::{debug, warn};

use crate::cli::{OutputFormat, Report, format_json, format_plain};
use crate::settings::ResolvedConfig;

/// Build the registry used by the binary, with configured overrides applied.
///
/// The shortcut listing is registered last so it reflects the overridden
/// shortcuts of the other filters.
pub(crate) fn build_registry(config: &ResolvedConfig) -> Result<FilterRegistry> {
	let mut registry = FilterRegistry::new();
	registry.register(FileFilter::new(config.root.clone(), config.files.clone()))?;

	for (id, overrides) in &config.filters {
		if id != FILTERS_FILTER_ID {
			registry
				.configure(id, overrides)
				.with_context(|| format!("invalid [filters.{id}] configuration"))?;
		}
	}

	let listing = FilterListFilter::from_registry(&registry);
	registry.register(listing)?;
	if let Some(overrides) = config.filters.get(FILTERS_FILTER_ID) {
		registry.configure(FILTERS_FILTER_ID, overrides)?;
	}
	Ok(registry)
}

/// Line read from the interactive script.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ScriptCommand {
	Query(String),
	/// Accept the given row, or the current row when none is given.
	Accept(Option<usize>),
	Next,
	Previous,
	Refresh,
}

impl ScriptCommand {
	fn parse(line: &str) -> Result<Self> {
		let Some(command) = line.strip_prefix(':') else {
			return Ok(Self::Query(line.to_string()));
		};
		let mut parts = command.split_whitespace();
		let name = parts.next().unwrap_or_default();
		let command = match name {
			"accept" => match parts.next() {
				Some(row) => Self::Accept(Some(
					row.parse()
						.with_context(|| format!("invalid row {row:?} for :accept"))?,
				)),
				None => Self::Accept(None),
			},
			"next" => Self::Next,
			"prev" => Self::Previous,
			"refresh" => Self::Refresh,
			other => bail!("unknown command :{other}"),
		};
		if let Some(extra) = parts.next() {
			bail!("unexpected argument {extra:?} for :{name}");
		}
		Ok(command)
	}
}

/// Drives a [`Locator`] from command line queries or a stdin script.
pub(crate) struct LocatorWorkflow {
	locator: Locator,
	format: OutputFormat,
	timeout: Duration,
}

impl LocatorWorkflow {
	pub(crate) fn new(locator: Locator, format: OutputFormat, timeout: Duration) -> Self {
		Self {
			locator,
			format,
			timeout,
		}
	}

	/// Submit every query without waiting in between, print the settled
	/// results, then accept `accept` if requested.
	pub(crate) fn run_queries(
		&mut self,
		queries: &[String],
		accept: Option<usize>,
		out: &mut impl Write,
	) -> Result<()> {
		for query in queries {
			self.locator.submit_query(query.as_str());
		}
		self.settle_and_report(out)?;

		if let Some(row) = accept {
			self.accept(Some(row), out)?;
		}
		Ok(())
	}

	/// Execute one command per input line, reporting after each.
	pub(crate) fn run_script(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
		for line in input.lines() {
			let line = line.context("failed to read query from stdin")?;
			let command = match ScriptCommand::parse(&line) {
				Ok(command) => command,
				Err(err) => {
					warn!("{err:#}");
					continue;
				}
			};
			debug!("script command {command:?}");
			match command {
				ScriptCommand::Query(text) => {
					self.locator.submit_query(text);
					self.settle_and_report(out)?;
				}
				ScriptCommand::Accept(row) => self.accept(row, out)?,
				ScriptCommand::Next => {
					self.locator.model_mut().select_next();
					self.report(true, out)?;
				}
				ScriptCommand::Previous => {
					self.locator.model_mut().select_previous();
					self.report(true, out)?;
				}
				ScriptCommand::Refresh => {
					for (id, err) in self.locator.refresh() {
						writeln!(out, "refreshing {id} failed: {err:#}")?;
					}
					self.settle_and_report(out)?;
				}
			}
		}
		Ok(())
	}

	fn accept(&mut self, row: Option<usize>, out: &mut impl Write) -> Result<()> {
		let Some(row) = row.or_else(|| self.locator.model().current()) else {
			warn!("nothing selected to accept");
			return Ok(());
		};
		self.locator.commit_selection(row);
		self.settle_and_report(out)
	}

	fn settle_and_report(&mut self, out: &mut impl Write) -> Result<()> {
		let settled = self.locator.wait_until_idle(self.timeout);
		if !settled {
			warn!(
				"search for {:?} still running after {:?}",
				self.locator.current_text(),
				self.timeout
			);
		}
		self.report(settled, out)
	}

	fn report(&mut self, settled: bool, out: &mut impl Write) -> Result<()> {
		let events = self.locator.take_events();
		let report = Report::new(self.locator.current_text(), settled, self.locator.model(), events);
		match self.format {
			OutputFormat::Plain => write!(out, "{}", format_plain(&report))?,
			OutputFormat::Json => writeln!(out, "{}", format_json(&report)?)?,
		}
		Ok(())
	}
}
