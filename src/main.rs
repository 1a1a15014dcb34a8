mod app_dirs;
mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use tracing_subscriber::EnvFilter;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_cli();
    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_search(cli.output, resolved, &cli)
}

/// Execute the search workflow and print the summary in the chosen format.
fn run_search(
    format: OutputFormat,
    settings: settings::ResolvedConfig,
    cli: &cli::CliArgs,
) -> Result<()> {
    let workflow = SearchWorkflow::from_config(settings, cli)?;
    let summary = workflow.run();

    match format {
        OutputFormat::Plain => print_plain(&summary),
        OutputFormat::Json => print_json(&summary)?,
    }

    Ok(())
}
