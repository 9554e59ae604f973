//! Export settings resolved for a single run.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::infra::{FsError, normalize_path};

/// Errors in export settings. Raised before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no target directory configured; set `target_dir` in the config file or pass --target")]
    MissingTarget,

    #[error("refusing to export into {target}: it would delete the vault at {vault}")]
    TargetContainsVault { target: PathBuf, vault: PathBuf },

    #[error(transparent)]
    Fs(#[from] FsError),
}

/// Settings for one export run.
///
/// Built fresh for every invocation and handed to the exporter by value, so
/// nothing outside the run can change them while it is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    target_dir: PathBuf,
}

impl ExportConfig {
    /// Resolves the target directory against the vault root.
    ///
    /// `target` may be absolute or relative to `vault_root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingTarget` if `target` is blank.
    /// Returns `ConfigError::TargetContainsVault` if the target is the vault
    /// root or one of its ancestors, since the run deletes the target.
    pub fn resolve(vault_root: &Path, target: &str) -> Result<Self, ConfigError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ConfigError::MissingTarget);
        }

        let target = Path::new(target);
        let joined = if target.is_absolute() {
            target.to_path_buf()
        } else {
            vault_root.join(target)
        };

        let target_dir = normalize_path(&joined)?;
        let vault = normalize_path(vault_root)?;
        if vault.starts_with(&target_dir) {
            return Err(ConfigError::TargetContainsVault {
                target: target_dir,
                vault,
            });
        }

        Ok(Self { target_dir })
    }

    /// Absolute path of the Hugo content directory.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}
