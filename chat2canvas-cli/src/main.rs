use chat2canvas_board::BoardConfig;
use clap::Parser;
use std::process;

mod cli;
mod commands;
mod output;

use cli::Cli;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.quiet);

    let mut config = match BoardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_ERROR);
        }
    };
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    tracing::debug!(storage_dir = %config.storage_dir.display(), "using board storage");

    let code = match commands::run(cli.command, &config).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };
    process::exit(code);
}

fn configure_logging(verbose: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chat2canvas_board={log_level},{log_level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
