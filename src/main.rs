mod cli;
mod engine;
mod loader;
mod metrics;
mod model;
#[cfg(feature = "tui")]
mod orchestrator;
mod plot;
mod storage;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Log to stderr for non-interactive runs; the TUI owns the terminal, so it gets no subscriber.
fn init_logging(args: &cli::Cli) {
    if !args.is_non_tui() {
        return;
    }
    let default_level = if args.silent {
        "off"
    } else if args.json {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_silent = args.silent;
    init_logging(&args);

    match cli::run(args) {
        Ok(()) => Ok(()),
        Err(e) => {
            if is_silent {
                eprintln!("{:#}", e);
                std::process::exit(1);
            } else {
                Err(e)
            }
        }
    }
}
