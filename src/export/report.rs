//! Progress reporting for export runs.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Outcome of exporting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentResult {
    /// The page was written to `output`; `attachments` files were copied.
    Exported { output: PathBuf, attachments: usize },
    /// The document could not be exported.
    Failed(String),
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Documents written successfully.
    pub succeeded: usize,
    /// Documents that failed.
    pub failed: usize,
    /// Attachment files copied.
    pub attachments: usize,
    /// Attachment copies that failed. Not counted in `failed`.
    pub attachment_errors: usize,
    /// Target directory of the run.
    pub target: PathBuf,
}

/// Receives progress updates during an export run.
pub trait ExportReporter {
    /// Called after selection, before the target is reset.
    fn on_start(&mut self, target: &Path, documents: usize);
    /// Called when no document carries the export tag. Nothing is written.
    fn on_empty(&mut self);
    /// Called after each document is processed.
    fn on_document(&mut self, path: &Path, result: &DocumentResult);
    /// Called when copying an attachment fails.
    fn on_attachment_error(&mut self, path: &Path, message: &str);
    /// Called once with the final totals.
    fn on_complete(&mut self, summary: &ExportSummary);
}

/// A reporter that ignores all updates.
#[derive(Default)]
pub struct NoopReporter;

impl ExportReporter for NoopReporter {
    fn on_start(&mut self, _target: &Path, _documents: usize) {}
    fn on_empty(&mut self) {}
    fn on_document(&mut self, _path: &Path, _result: &DocumentResult) {}
    fn on_attachment_error(&mut self, _path: &Path, _message: &str) {}
    fn on_complete(&mut self, _summary: &ExportSummary) {}
}
