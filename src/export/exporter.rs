//! Blog export: tagged notes to Hugo page bundles.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{Attachment, Document, FrontMatter, format_timestamp};
use crate::export::config::{ConfigError, ExportConfig};
use crate::export::report::{DocumentResult, ExportReporter, ExportSummary};
use crate::export::rewrite::{IMAGES_DIR, output_link, rewrite_embeds};
use crate::infra::{DocumentIndex, FileTimes, FsError, ensure_dir, is_markdown, remove_dir_if_exists, write_atomic};

/// File name of the page inside each bundle.
pub const PAGE_FILE: &str = "index.md";

/// Errors during an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("cannot derive an output folder name for {path}")]
    UnnamedDocument { path: PathBuf },
}

/// Exports documents tagged `blog` from a document index into a Hugo
/// content directory.
///
/// Each exported document becomes a page bundle:
///
/// ```text
/// <target>/<document name>/index.md
/// <target>/<document name>/images/<attachment>
/// ```
///
/// The target directory is deleted and recreated on every run.
pub struct Exporter<'a, I: DocumentIndex> {
    index: &'a I,
    config: ExportConfig,
    offset: Option<FixedOffset>,
}

impl<'a, I: DocumentIndex> Exporter<'a, I> {
    /// Creates an exporter that formats dates in the local time zone.
    pub fn new(index: &'a I, config: ExportConfig) -> Self {
        Self {
            index,
            config,
            offset: None,
        }
    }

    /// Formats dates in a fixed offset instead of the local time zone.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Loads every document and keeps the ones tagged `blog`.
    ///
    /// Documents that cannot be read are skipped with a warning; they cannot
    /// be known to carry the tag.
    pub fn select_documents(&self) -> Vec<Document> {
        self.index
            .documents()
            .iter()
            .filter_map(|path| match self.index.load(path) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("skipping unreadable document {}: {}", path.display(), e);
                    None
                }
            })
            .filter(|doc| doc.metadata().is_blog())
            .collect()
    }

    /// Deletes the target directory tree if it exists.
    pub fn reset_target(&self) -> Result<(), ExportError> {
        let target = self.config.target_dir();
        if remove_dir_if_exists(target)? {
            debug!("removed {}", target.display());
        }
        Ok(())
    }

    /// Renders the Hugo page for a document.
    ///
    /// The source header is replaced by Hugo front matter and embed links to
    /// attachments point into the bundle's `images/` folder.
    pub fn transform(&self, doc: &Document) -> String {
        let times = self.index.stat(doc.path()).unwrap_or_else(|e| {
            warn!("cannot stat {}, using current time: {}", doc.path().display(), e);
            let now = SystemTime::now();
            FileTimes {
                created: now,
                modified: now,
            }
        });

        let front_matter = FrontMatter::new(
            doc.title(),
            self.format_time(times.created),
            self.format_time(times.modified),
            doc.metadata().tags(),
        );

        let targets = self.link_targets(doc);
        let body = rewrite_embeds(doc.body(), doc.embeds(), &targets);

        format!("{}{}", front_matter, body)
    }

    /// Writes the page to `<target_dir>/<name>/index.md`.
    ///
    /// Returns the bundle directory.
    pub fn write_document(
        &self,
        doc: &Document,
        text: &str,
        target_dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        if doc.name().is_empty() {
            return Err(ExportError::UnnamedDocument {
                path: doc.path().to_path_buf(),
            });
        }
        let bundle = target_dir.join(doc.name());
        write_atomic(&bundle.join(PAGE_FILE), text.as_bytes())?;
        Ok(bundle)
    }

    /// Resolves a document's embeds to the non-markdown files they name.
    ///
    /// Unresolvable embeds are skipped. The same file may appear more than
    /// once if it is embedded more than once.
    pub fn collect_attachments(&self, doc: &Document) -> Vec<Attachment> {
        doc.embeds()
            .iter()
            .filter_map(|embed| self.index.resolve(embed.link(), doc.path()))
            .filter(|path| !is_markdown(path))
            .map(Attachment::new)
            .collect()
    }

    /// Copies an attachment into `dest_dir`, creating it if needed.
    pub fn copy_attachment(&self, attachment: &Attachment, dest_dir: &Path) -> Result<(), FsError> {
        let bytes = self.index.read_binary(attachment.path())?;
        ensure_dir(dest_dir)?;
        write_atomic(&dest_dir.join(attachment.name()), &bytes)
    }

    /// Runs a full export.
    ///
    /// Selects tagged documents; if there are none, reports that and stops
    /// without touching the target. Otherwise resets the target and exports
    /// each document in turn. A failing document is counted and reported
    /// and the run continues. An attachment already copied earlier in the
    /// run is not copied again.
    ///
    /// # Errors
    ///
    /// Returns an error only if the target directory cannot be reset.
    pub fn run<R: ExportReporter>(&self, reporter: &mut R) -> Result<ExportSummary, ExportError> {
        let target = self.config.target_dir();
        let mut summary = ExportSummary {
            target: target.to_path_buf(),
            ..ExportSummary::default()
        };

        let documents = self.select_documents();
        if documents.is_empty() {
            info!("no documents tagged for export");
            reporter.on_empty();
            return Ok(summary);
        }

        info!("exporting {} documents to {}", documents.len(), target.display());
        reporter.on_start(target, documents.len());
        self.reset_target()?;

        let mut copied: HashSet<PathBuf> = HashSet::new();
        for doc in &documents {
            let result = match self.export_document(doc, &mut copied, &mut summary, reporter) {
                Ok(result) => {
                    summary.succeeded += 1;
                    result
                }
                Err(e) => {
                    warn!("failed to export {}: {}", doc.path().display(), e);
                    summary.failed += 1;
                    DocumentResult::Failed(e.to_string())
                }
            };
            reporter.on_document(doc.path(), &result);
        }

        info!(
            "export finished: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        reporter.on_complete(&summary);
        Ok(summary)
    }

    fn export_document<R: ExportReporter>(
        &self,
        doc: &Document,
        copied: &mut HashSet<PathBuf>,
        summary: &mut ExportSummary,
        reporter: &mut R,
    ) -> Result<DocumentResult, ExportError> {
        let text = self.transform(doc);
        let bundle = self.write_document(doc, &text, self.config.target_dir())?;
        let output = bundle.join(PAGE_FILE);
        debug!("wrote {}", output.display());

        let images = bundle.join(IMAGES_DIR);
        ensure_dir(&images)?;

        let mut attachments = 0;
        for attachment in self.collect_attachments(doc) {
            if copied.contains(attachment.path()) {
                continue;
            }
            match self.copy_attachment(&attachment, &images) {
                Ok(()) => {
                    copied.insert(attachment.path().to_path_buf());
                    attachments += 1;
                    summary.attachments += 1;
                }
                Err(e) => {
                    warn!("failed to copy attachment {}: {}", attachment.path().display(), e);
                    summary.attachment_errors += 1;
                    reporter.on_attachment_error(attachment.path(), &e.to_string());
                }
            }
        }

        Ok(DocumentResult::Exported {
            output,
            attachments,
        })
    }

    /// Maps each attachment embed link to its output path.
    ///
    /// Embeds of other notes are left out so transclusions keep their links.
    fn link_targets(&self, doc: &Document) -> HashMap<String, String> {
        let mut targets = HashMap::new();
        for embed in doc.embeds() {
            if targets.contains_key(embed.link()) {
                continue;
            }
            let is_note = match self.index.resolve(embed.link(), doc.path()) {
                Some(resolved) => is_markdown(&resolved),
                None => {
                    let link = Path::new(embed.link());
                    link.extension().is_none() || is_markdown(link)
                }
            };
            if !is_note {
                targets.insert(embed.link().to_string(), output_link(embed));
            }
        }
        targets
    }

    fn format_time(&self, time: SystemTime) -> String {
        let utc: DateTime<Utc> = time.into();
        match self.offset {
            Some(offset) => format_timestamp(&utc.with_timezone(&offset)),
            None => format_timestamp(&utc.with_timezone(&Local)),
        }
    }
}
