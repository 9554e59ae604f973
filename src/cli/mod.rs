//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// hugo-export - publish blog-tagged vault notes as Hugo page bundles
#[derive(Parser, Debug)]
#[command(name = "hugo-export", version, about, long_about = None)]
pub struct Cli {
    /// Vault directory (overrides config file)
    #[arg(short = 'd', long = "vault", global = true)]
    pub vault: Option<PathBuf>,

    /// Config file (default: <config dir>/hugo-export/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export notes tagged `blog` into the Hugo content directory
    Export(ExportArgs),

    /// List the notes that would be exported
    #[command(name = "ls")]
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Hugo content directory (overrides config file; relative to the
    /// current directory)
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Skip the configured after-export commands
    #[arg(long)]
    pub no_hooks: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
