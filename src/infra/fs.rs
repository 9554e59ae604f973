//! File I/O for vault scanning and export output.

use std::io::{self, Write as IoWrite};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use tempfile::NamedTempFile;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    pub(crate) fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Creation and modification times of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub created: SystemTime,
    pub modified: SystemTime,
}

/// Reads a text file as UTF-8.
///
/// # Errors
///
/// Returns `FsError::NotFound` / `PermissionDenied` / `Io` on read failure.
/// Returns `FsError::InvalidEncoding` for UTF-16 files or invalid UTF-8.
pub fn read_text(path: &Path) -> Result<String, FsError> {
    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;

    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 LE detected (byte order mark FF FE); convert to UTF-8".into(),
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(FsError::InvalidEncoding {
            path: path.into(),
            encoding: "UTF-16 BE detected (byte order mark FE FF); convert to UTF-8".into(),
        });
    }

    String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.into(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })
}

/// Reads a file's raw bytes.
pub fn read_binary(path: &Path) -> Result<Vec<u8>, FsError> {
    std::fs::read(path).map_err(|e| FsError::from_io(path, e))
}

/// Returns a file's creation and modification times.
///
/// Filesystems that do not record a birth time report the modification
/// time for both.
pub fn file_times(path: &Path) -> Result<FileTimes, FsError> {
    let meta = std::fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
    let modified = meta.modified().map_err(|e| FsError::from_io(path, e))?;
    let created = meta.created().unwrap_or(modified);
    Ok(FileTimes { created, modified })
}

/// Creates a directory and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
}

/// Recursively deletes a directory if it exists.
///
/// Returns `true` if something was removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool, FsError> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            std::fs::remove_dir_all(path).map_err(|e| FsError::from_io(path, e))?;
            Ok(true)
        }
        Ok(_) => Err(FsError::NotADirectory { path: path.into() }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::from_io(path, e)),
    }
}

/// Writes bytes to a file atomically, creating parent directories.
///
/// Uses a temporary file in the destination directory and an atomic rename
/// so readers never see a partial file.
///
/// # Errors
///
/// Returns `FsError::AtomicWrite` if the rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(contents).map_err(|e| FsError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Scans a vault recursively for files of any type.
///
/// Skips hidden files and directories (starting with `.`), such as
/// `.obsidian/` and `.trash/`, and the `exclude` subtree if given. Entries
/// are visited in file-name order.
///
/// Returns paths relative to the input directory.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn scan_vault(dir: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let files = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || (!is_hidden(e) && Some(e.path()) != exclude))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();

    Ok(files)
}

/// Makes a path absolute and removes `.` and `..` components lexically.
///
/// Symlinks are not resolved, so this works for paths that don't exist yet.
pub fn normalize_path(path: &Path) -> Result<PathBuf, FsError> {
    let absolute = std::path::absolute(path).map_err(|e| FsError::from_io(path, e))?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Whether a path has the markdown extension.
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("md"))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    // ===========================================
    // FsError
    // ===========================================

    #[test]
    fn fs_error_not_found_displays_path() {
        let error = FsError::NotFound {
            path: PathBuf::from("/some/path.md"),
        };
        assert!(error.to_string().contains("/some/path.md"));
    }

    #[test]
    fn fs_error_from_io_maps_kinds() {
        let path = Path::new("/test/path.md");
        let not_found = io::Error::new(io::ErrorKind::NotFound, "x");
        assert!(matches!(FsError::from_io(path, not_found), FsError::NotFound { .. }));
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "x");
        assert!(matches!(FsError::from_io(path, denied), FsError::PermissionDenied { .. }));
        let other = io::Error::other("x");
        assert!(matches!(FsError::from_io(path, other), FsError::Io { .. }));
    }

    // ===========================================
    // Reading
    // ===========================================

    #[test]
    fn read_text_returns_content() {
        let dir = TempDir::new().unwrap();
        let path = touch(dir.path(), "note.md", "hello");
        assert_eq!(read_text(&path).unwrap(), "hello");
    }

    #[test]
    fn read_text_missing_file_is_not_found() {
        let result = read_text(Path::new("/nonexistent/path/note.md"));
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn read_text_rejects_utf16() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("utf16.md");
        fs::write(&path, [0xFF, 0xFE, b'a', 0]).unwrap();
        assert!(matches!(read_text(&path), Err(FsError::InvalidEncoding { .. })));
    }

    #[test]
    fn read_text_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.md");
        fs::write(&path, [b'o', b'k', 0xC3, 0x28]).unwrap();
        match read_text(&path) {
            Err(FsError::InvalidEncoding { encoding, .. }) => {
                assert!(encoding.contains("byte 2"));
            }
            other => panic!("expected InvalidEncoding, got {:?}", other),
        }
    }

    #[test]
    fn read_binary_returns_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("img.png");
        fs::write(&path, [0u8, 159, 146, 150]).unwrap();
        assert_eq!(read_binary(&path).unwrap(), vec![0u8, 159, 146, 150]);
    }

    #[test]
    fn file_times_reports_modified() {
        let dir = TempDir::new().unwrap();
        let path = touch(dir.path(), "a.md", "a");
        let times = file_times(&path).unwrap();
        assert_eq!(times.modified, fs::metadata(&path).unwrap().modified().unwrap());
    }

    // ===========================================
    // Writing and removal
    // ===========================================

    #[test]
    fn write_atomic_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("index.md");
        write_atomic(&path, b"content").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn write_atomic_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = touch(dir.path(), "index.md", "old");
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_atomic_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        write_atomic(&dir.path().join("index.md"), b"x").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn remove_dir_if_exists_removes_tree() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("blog");
        touch(&target, "post/index.md", "x");
        assert!(remove_dir_if_exists(&target).unwrap());
        assert!(!target.exists());
    }

    #[test]
    fn remove_dir_if_exists_is_noop_when_missing() {
        let dir = TempDir::new().unwrap();
        assert!(!remove_dir_if_exists(&dir.path().join("missing")).unwrap());
    }

    #[test]
    fn remove_dir_if_exists_refuses_files() {
        let dir = TempDir::new().unwrap();
        let path = touch(dir.path(), "file.txt", "x");
        assert!(matches!(
            remove_dir_if_exists(&path),
            Err(FsError::NotADirectory { .. })
        ));
        assert!(path.exists());
    }

    // ===========================================
    // Scanning
    // ===========================================

    #[test]
    fn scan_vault_finds_all_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.md", "");
        touch(dir.path(), "a.md", "");
        touch(dir.path(), "assets/photo.png", "");

        let files = scan_vault(dir.path(), None).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("a.md"),
                PathBuf::from("assets/photo.png"),
                PathBuf::from("b.md"),
            ]
        );
    }

    #[test]
    fn scan_vault_skips_hidden() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".obsidian/app.json", "");
        touch(dir.path(), ".hidden.md", "");
        touch(dir.path(), "visible.md", "");

        let files = scan_vault(dir.path(), None).unwrap();
        assert_eq!(files, vec![PathBuf::from("visible.md")]);
    }

    #[test]
    fn scan_vault_skips_excluded_subtree() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "blog/Trip/index.md", "");
        touch(dir.path(), "Trip.md", "");

        let exclude = dir.path().join("blog");
        let files = scan_vault(dir.path(), Some(&exclude)).unwrap();
        assert_eq!(files, vec![PathBuf::from("Trip.md")]);
    }

    #[test]
    fn scan_vault_missing_dir() {
        let result = scan_vault(Path::new("/nonexistent/vault"), None);
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn normalize_path_removes_dot_components() {
        let normalized = normalize_path(Path::new("/vault/./notes/../blog")).unwrap();
        assert_eq!(normalized, PathBuf::from("/vault/blog"));
    }

    #[test]
    fn normalize_path_makes_relative_absolute() {
        let normalized = normalize_path(Path::new("blog")).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("blog"));
    }

    #[test]
    fn is_markdown_checks_extension() {
        assert!(is_markdown(Path::new("a/b.md")));
        assert!(is_markdown(Path::new("B.MD")));
        assert!(!is_markdown(Path::new("photo.png")));
        assert!(!is_markdown(Path::new("README")));
    }
}
