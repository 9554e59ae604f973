//! Handler for the `export` command.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::{DocumentOutcome, Output, OutputFormat};
use crate::export::{ExportConfig, ExportSummary, Exporter, run_after_export};
use crate::infra::{VaultIndex, normalize_path};

use super::ConsoleReporter;

/// Result of an export run, as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct ExportResult {
    #[serde(flatten)]
    pub summary: ExportSummary,
    pub documents: Vec<DocumentOutcome>,
    /// Error from the after-export commands, if they ran and failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_error: Option<String>,
}

/// Handle the `export` command.
pub fn handle_export(args: &ExportArgs, vault_dir: &Path, config: &Config) -> Result<()> {
    let target = match &args.target {
        Some(path) => normalize_path(path)
            .with_context(|| format!("invalid target directory: {}", path.display()))?
            .to_string_lossy()
            .into_owned(),
        None => config.target_dir().to_string(),
    };
    let export_config = ExportConfig::resolve(vault_dir, &target)?;

    let index = VaultIndex::open_excluding(vault_dir, Some(export_config.target_dir()))
        .with_context(|| format!("failed to open vault at {}", vault_dir.display()))?;

    let mut reporter = ConsoleReporter::new(args.format);
    let summary = Exporter::new(&index, export_config)
        .run(&mut reporter)
        .context("export failed")?;

    let mut hook_error = None;
    if !args.no_hooks && summary.succeeded > 0 {
        if let Err(e) = run_after_export(&config.after_export_commands, &summary.target) {
            warn!("{}", e);
            if let OutputFormat::Human = args.format {
                eprintln!("warning: {}", e);
            }
            hook_error = Some(e.to_string());
        }
    }

    if let OutputFormat::Json = args.format {
        let result = ExportResult {
            summary,
            documents: reporter.into_outcomes(),
            hook_error,
        };
        println!("{}", serde_json::to_string_pretty(&Output::new(result))?);
    }

    Ok(())
}
