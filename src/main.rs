mod cli;
mod settings;
mod workflow;

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::Result;
use cli::{CliArgs, format_filter_list, parse_cli};
use locus::{Locator, logging};
use settings::ResolvedConfig;
use workflow::{LocatorWorkflow, build_registry};

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let registry = build_registry(&resolved)?;
	if cli.list_filters {
		print!("{}", format_filter_list(&registry));
		return Ok(());
	}

	run(&cli, &resolved, Locator::new(registry, resolved.search)?)
}

/// Run the command line queries, or the stdin script when none were given.
fn run(cli: &CliArgs, settings: &ResolvedConfig, locator: Locator) -> Result<()> {
	log::debug!("searching below {}", settings.root.display());
	let mut workflow =
		LocatorWorkflow::new(locator, cli.output, Duration::from_millis(cli.timeout_ms));
	let mut stdout = io::stdout().lock();

	if !cli.queries.is_empty() {
		return workflow.run_queries(&cli.queries, cli.accept, &mut stdout);
	}

	let stdin = io::stdin();
	if stdin.is_terminal() {
		eprintln!("reading queries from stdin (:accept N, :next, :prev, :refresh)");
	}
	workflow.run_script(stdin.lock(), &mut stdout)
}
