//! Embed references found in a document body.

use std::ops::Range;
use std::path::Path;

/// Syntax an embed was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    /// `![[target]]`, optionally with `|alias` or `#subpath`.
    Wiki,
    /// `![alt](target)` with a local target.
    Markdown,
}

/// One recognized embed span in a body.
///
/// `link` is the target with any alias and subpath removed, which is the
/// form used for resolution. `link_range` is the byte range in the body that
/// holds the raw target text, so rewriting can replace exactly that slice and
/// leave the surrounding syntax alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    kind: EmbedKind,
    link: String,
    link_range: Range<usize>,
}

impl Embed {
    pub fn new(kind: EmbedKind, link: impl Into<String>, link_range: Range<usize>) -> Self {
        Self {
            kind,
            link: link.into(),
            link_range,
        }
    }

    pub fn kind(&self) -> EmbedKind {
        self.kind
    }

    /// Link target used for resolution (`photo.png`, `assets/diagram.svg`).
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn link_range(&self) -> Range<usize> {
        self.link_range.clone()
    }

    /// Final path component of the link, which names the file in `images/`.
    pub fn file_name(&self) -> &str {
        Path::new(&self.link)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.link)
    }
}
