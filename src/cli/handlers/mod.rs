//! Command handlers for the CLI.

mod completions;
mod export;
mod list;

use std::path::Path;

use crate::cli::output::{DocumentOutcome, OutputFormat};
use crate::export::{DocumentResult, ExportReporter, ExportSummary};

pub use completions::handle_completions;
pub use export::handle_export;
pub use list::handle_list;

// ===========================================
// Shared Utilities
// ===========================================

/// Export reporter that prints to the terminal.
///
/// In human mode progress is printed as it happens. In JSON mode outcomes
/// are collected for the final result object. In paths mode only the
/// written page paths are printed.
pub(crate) struct ConsoleReporter {
    format: OutputFormat,
    outcomes: Vec<DocumentOutcome>,
}

impl ConsoleReporter {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self {
            format,
            outcomes: Vec::new(),
        }
    }

    /// Per-document outcomes seen so far.
    pub(crate) fn into_outcomes(self) -> Vec<DocumentOutcome> {
        self.outcomes
    }
}

impl ExportReporter for ConsoleReporter {
    fn on_start(&mut self, target: &Path, documents: usize) {
        if let OutputFormat::Human = self.format {
            println!("Exporting {} document(s) to {}", documents, target.display());
        }
    }

    fn on_empty(&mut self) {
        if let OutputFormat::Human = self.format {
            println!("No documents tagged 'blog' found.");
        }
    }

    fn on_document(&mut self, path: &Path, result: &DocumentResult) {
        let outcome = match result {
            DocumentResult::Exported { output, attachments } => {
                match self.format {
                    OutputFormat::Human => {
                        println!("  exported: {} ({} attachment(s))", path.display(), attachments)
                    }
                    OutputFormat::Paths => println!("{}", output.display()),
                    OutputFormat::Json => {}
                }
                DocumentOutcome {
                    path: path.display().to_string(),
                    output: Some(output.display().to_string()),
                    error: None,
                }
            }
            DocumentResult::Failed(msg) => {
                if let OutputFormat::Human = self.format {
                    eprintln!("  error: {}: {}", path.display(), msg);
                }
                DocumentOutcome {
                    path: path.display().to_string(),
                    output: None,
                    error: Some(msg.clone()),
                }
            }
        };
        self.outcomes.push(outcome);
    }

    fn on_attachment_error(&mut self, path: &Path, message: &str) {
        if let OutputFormat::Human = self.format {
            eprintln!("  attachment error: {}: {}", path.display(), message);
        }
    }

    fn on_complete(&mut self, summary: &ExportSummary) {
        if let OutputFormat::Human = self.format {
            if summary.failed > 0 {
                eprintln!(
                    "Exported {} document(s) to {} with {} failure(s)",
                    summary.succeeded,
                    summary.target.display(),
                    summary.failed
                );
            } else {
                println!(
                    "Exported {} document(s) to {}",
                    summary.succeeded,
                    summary.target.display()
                );
            }
        }
    }
}
