//! Filesystem-backed document index over a vault directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{Document, DocumentMetadata};
use crate::infra::embeds::scan_embeds;
use crate::infra::frontmatter::split;
use crate::infra::fs::{self, FileTimes, FsError, is_markdown};

/// Read access to a collection of documents and the files they embed.
///
/// All paths are relative to the collection root.
pub trait DocumentIndex {
    /// All markdown documents, in collection order.
    fn documents(&self) -> Vec<PathBuf>;

    /// Reads a document and parses its metadata and embeds.
    fn load(&self, path: &Path) -> Result<Document, FsError>;

    /// Resolves an embed link written in `source` to a collection file.
    fn resolve(&self, link: &str, source: &Path) -> Option<PathBuf>;

    /// Raw bytes of a collection file.
    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Creation and modification times of a collection file.
    fn stat(&self, path: &Path) -> Result<FileTimes, FsError>;
}

/// Index of every non-hidden file under a vault root.
///
/// The file list is captured once when the index is opened; files added
/// afterwards are not seen.
#[derive(Debug)]
pub struct VaultIndex {
    root: PathBuf,
    files: Vec<PathBuf>,
    /// Lowercased slash-separated path -> index into `files`.
    by_path: HashMap<String, usize>,
    /// Lowercased file name -> indices into `files`.
    by_name: HashMap<String, Vec<usize>>,
}

impl VaultIndex {
    /// Scans `root` and builds the index.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` or `FsError::NotADirectory` if `root` is
    /// not a directory.
    pub fn open(root: &Path) -> Result<Self, FsError> {
        Self::open_excluding(root, None)
    }

    /// Scans `root`, skipping the `exclude` subtree.
    ///
    /// `exclude` may be absolute or relative to the current directory; it is
    /// ignored when it does not lie inside `root`.
    pub fn open_excluding(root: &Path, exclude: Option<&Path>) -> Result<Self, FsError> {
        let exclude = match exclude {
            Some(path) => {
                let root_abs = fs::normalize_path(root)?;
                let path_abs = fs::normalize_path(path)?;
                path_abs
                    .strip_prefix(&root_abs)
                    .ok()
                    .filter(|rel| !rel.as_os_str().is_empty())
                    .map(|rel| root.join(rel))
            }
            None => None,
        };

        let files = fs::scan_vault(root, exclude.as_deref())?;
        debug!("indexed {} files under {}", files.len(), root.display());

        let mut by_path = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, file) in files.iter().enumerate() {
            by_path.insert(path_key(file), i);
            if let Some(name) = file.file_name() {
                by_name
                    .entry(name.to_string_lossy().to_lowercase())
                    .or_default()
                    .push(i);
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            files,
            by_path,
            by_name,
        })
    }

    /// Returns the vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lookup_path(&self, key: &str) -> Option<&PathBuf> {
        self.by_path.get(key).map(|&i| &self.files[i])
    }
}

impl DocumentIndex for VaultIndex {
    fn documents(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|f| is_markdown(f))
            .cloned()
            .collect()
    }

    fn load(&self, path: &Path) -> Result<Document, FsError> {
        let content = fs::read_text(&self.root.join(path))?;
        let split = split(&content);

        let metadata = match split.yaml {
            Some(yaml) => DocumentMetadata::from_yaml(yaml).unwrap_or_else(|e| {
                warn!("ignoring invalid frontmatter in {}: {}", path.display(), e);
                DocumentMetadata::default()
            }),
            None => DocumentMetadata::default(),
        };
        let embeds = scan_embeds(split.body);

        Ok(Document::new(path, metadata, split.body, embeds))
    }

    /// Resolution order:
    /// 1. exact vault-relative path
    /// 2. path relative to the source document's folder
    /// 3. any file with the same name, preferring the source folder, then
    ///    the shortest path
    ///
    /// Matching ignores case. A link without an extension refers to a
    /// markdown note.
    fn resolve(&self, link: &str, source: &Path) -> Option<PathBuf> {
        let link = link.trim().replace('\\', "/");
        let link = link.trim_start_matches('/');
        if link.is_empty() {
            return None;
        }

        let link = if Path::new(link).extension().is_none() {
            format!("{}.md", link)
        } else {
            link.to_string()
        };
        let key = link.to_lowercase();

        if let Some(found) = self.lookup_path(&key) {
            return Some(found.clone());
        }

        let source_dir = source.parent().unwrap_or(Path::new(""));
        if let Some(found) = relative_key(source_dir, &key).and_then(|k| self.lookup_path(&k)) {
            return Some(found.clone());
        }

        let name = key.rsplit('/').next().unwrap_or(&key);
        let suffix = format!("/{}", key);
        let candidates = self.by_name.get(name)?;
        candidates
            .iter()
            .map(|&i| &self.files[i])
            .filter(|f| {
                let file_key = path_key(f);
                !key.contains('/') || file_key == key || file_key.ends_with(&suffix)
            })
            .min_by_key(|f| {
                let same_dir = f.parent().unwrap_or(Path::new("")) == source_dir;
                (!same_dir, f.components().count(), path_key(f))
            })
            .cloned()
    }

    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read_binary(&self.root.join(path))
    }

    fn stat(&self, path: &Path) -> Result<FileTimes, FsError> {
        fs::file_times(&self.root.join(path))
    }
}

/// Lowercased, slash-separated form of a relative path.
fn path_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .to_lowercase()
}

/// Joins a link onto a folder, resolving `.` and `..`. Returns `None` when
/// the link climbs above the vault root.
fn relative_key(dir: &Path, link: &str) -> Option<String> {
    let base = path_key(dir);
    let mut parts: Vec<&str> = base.split('/').filter(|p| !p.is_empty()).collect();
    for part in link.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}
