//! hugo-export - publish blog-tagged vault notes as Hugo page bundles

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_export, handle_list},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load(cli.config.as_deref())?;
    let vault_dir = config.vault_dir(cli.vault.as_ref());

    match &cli.command {
        Command::Export(args) => handle_export(args, &vault_dir, &config),
        Command::List(args) => handle_list(args, &vault_dir, &config),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error when a subscriber is already set (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
