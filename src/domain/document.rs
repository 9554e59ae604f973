//! Documents and attachments as seen by the exporter.

use std::path::{Path, PathBuf};

use crate::domain::{DocumentMetadata, Embed};

/// A markdown note loaded from the vault.
///
/// `body` is the text after the source front matter has been removed, and
/// `embeds` are the embed spans found in that body, with ranges relative to
/// `body`.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    name: String,
    metadata: DocumentMetadata,
    body: String,
    embeds: Vec<Embed>,
}

impl Document {
    /// Creates a document. The display name is the file stem of `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        metadata: DocumentMetadata,
        body: impl Into<String>,
        embeds: Vec<Embed>,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            metadata,
            body: body.into(),
            embeds,
        }
    }

    /// Vault-relative path to the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without the `.md` extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Title for the exported page: the front matter title, else the name.
    pub fn title(&self) -> &str {
        self.metadata.title().unwrap_or(&self.name)
    }
}

/// A non-markdown vault file referenced by an embed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attachment {
    path: PathBuf,
    name: String,
}

impl Attachment {
    /// Creates an attachment for a vault-relative path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including extension.
    pub fn name(&self) -> &str {
        &self.name
    }
}
