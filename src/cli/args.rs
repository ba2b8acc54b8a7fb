use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, Parser, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};
use locus::app_dirs;

/// Produce the full version banner including the config and cache directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let cache_dir = match app_dirs::get_cache_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("locus {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "cache directory: {cache_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
	name = "locus",
	version,
	long_version = long_version(),
	about = "Incremental multi-filter locator search",
	long_about = "Incremental multi-filter locator search.\n\n\
		Each QUERY is submitted in order without waiting, as if typed quickly. \
		Without QUERY, queries are read line by line from stdin; the lines \
		`:accept [ROW]`, `:next`, `:prev` and `:refresh` are commands.",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `locus` binary.
pub(crate) struct CliArgs {
	#[arg(value_name = "QUERY", help = "Queries to submit in order (default: read stdin)")]
	pub(crate) queries: Vec<String>,
	#[arg(
		short = 'a',
		long,
		value_name = "ROW",
		help = "Accept this row once the last query has settled (default: none)"
	)]
	pub(crate) accept: Option<usize>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "LOCUS_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Root directory searched by the files filter (default: current directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'H',
		long = "hidden",
		value_parser = BoolishValueParser::new(),
		help = "Include hidden files (default: disabled)"
	)]
	pub(crate) hidden: Option<bool>,
	#[arg(
		short = 's',
		long = "follow-symlinks",
		value_parser = BoolishValueParser::new(),
		help = "Follow symbolic links while indexing (default: disabled)"
	)]
	pub(crate) follow_symlinks: Option<bool>,
	#[arg(
		long = "respect-ignore-files",
		value_parser = BoolishValueParser::new(),
		help = "Respect .ignore and .gitignore files (default: enabled)"
	)]
	pub(crate) respect_ignore_files: Option<bool>,
	#[arg(
		short = 'd',
		long = "max-depth",
		value_name = "NUM",
		help = "Limit directory traversal depth (default: unlimited)"
	)]
	pub(crate) max_depth: Option<usize>,
	#[arg(
		short = 'm',
		long = "max-results",
		value_name = "NUM",
		help = "Maximum entries returned by the files filter (default: 200)"
	)]
	pub(crate) max_results: Option<usize>,
	#[arg(
		short = 'b',
		long = "batch-size",
		value_name = "NUM",
		help = "Maximum entries per streamed batch (default: 64)"
	)]
	pub(crate) batch_size: Option<usize>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Delay before typed text is searched (default: 100)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "timeout-ms",
		value_name = "MS",
		default_value_t = 30_000,
		help = "Give up waiting for a search to settle after this long"
	)]
	pub(crate) timeout_ms: u64,
	#[arg(
		short = 'l',
		long = "list-filters",
		help = "List registered filters and exit (default: disabled)"
	)]
	pub(crate) list_filters: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Increase log verbosity; RUST_LOG takes precedence"
	)]
	pub(crate) verbose: u8,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print results")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
