//! zipbundle - pack files and directories into zip archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<()> {
    match &cli.command {
        cli::Commands::Create(args) => commands::create::execute(args, formatter, cli.quiet),
        cli::Commands::Headers(args) => commands::headers::execute(args, formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}
