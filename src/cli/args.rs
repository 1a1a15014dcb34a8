use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Parse command line arguments into the strongly typed [`CliArgs`]
/// structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "homescout",
    version,
    about = "Run a listing search the way the map page would"
)]
/// Command-line arguments accepted by the `homescout` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "HOMESCOUT_CONFIG",
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
        short = 'l',
        long,
        value_name = "FILE",
        help = "JSON file holding the listing snapshot"
    )]
    pub(crate) listings: PathBuf,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Initial query string, as it would appear after '?' in the address (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        long,
        value_name = "W,E,S,N",
        help = "Report a map viewport as west,east,south,north degrees (default: none)"
    )]
    pub(crate) viewport: Option<String>,
    #[arg(
        long = "in-area",
        help = "Restrict the result set itself to the viewport, not just the visible list (default: disabled)"
    )]
    pub(crate) in_area: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Output format (default: plain)"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long = "print-config",
        help = "Print the effective configuration before searching (default: disabled)"
    )]
    pub(crate) print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
