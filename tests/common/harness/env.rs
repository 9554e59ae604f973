//! Isolated vault and site directories for CLI tests.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use super::{ExportCommand, TestNote};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary vault and Hugo site.
///
/// Layout inside the temp directory:
///
/// ```text
/// vault/         notes and attachments
/// site/content/  default export target
/// config.toml    config file passed with --config
/// ```
///
/// Everything is removed when the value is dropped.
pub struct TestVault {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    vault_dir: PathBuf,
    target_dir: PathBuf,
    config_path: PathBuf,
}

impl TestVault {
    /// Creates a vault whose config targets `site/content`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let vault_dir = temp_dir.path().join("vault");
        let target_dir = temp_dir.path().join("site").join("content");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::create_dir_all(&vault_dir).expect("Failed to create vault directory");

        let env = Self {
            _temp_dir: temp_dir,
            vault_dir,
            target_dir,
            config_path,
        };
        env.set_config("");
        env
    }

    /// Returns the vault root.
    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    /// Returns the configured export target.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Returns the config file path.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Writes the config file. `target_dir` is set to the site directory
    /// unless `extra` sets it.
    pub fn set_config(&self, extra: &str) {
        let mut contents = String::new();
        if !extra.contains("target_dir") {
            contents.push_str(&format!(
                "target_dir = {:?}\n",
                self.target_dir.to_string_lossy()
            ));
        }
        contents.push_str(extra);
        std::fs::write(&self.config_path, contents).expect("Failed to write config");
    }

    /// Adds a note to the vault and returns its path.
    pub fn add_note(&self, note: &TestNote) -> PathBuf {
        self.write_file(&note.relative_path(), note.render().as_bytes())
    }

    /// Writes a file into the vault and returns its path.
    pub fn write_file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.vault_dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Path of an exported page.
    pub fn page_path(&self, name: &str) -> PathBuf {
        self.target_dir.join(name).join("index.md")
    }

    /// Reads an exported page.
    pub fn read_page(&self, name: &str) -> String {
        let path = self.page_path(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read page {}: {}", path.display(), e))
    }

    /// Creates a command configured for this vault.
    pub fn cmd(&self) -> ExportCommand {
        ExportCommand::new()
            .vault(&self.vault_dir)
            .config(&self.config_path)
    }
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_creates_directories() {
        let env = TestVault::new();
        assert!(env.vault_dir().is_dir());
        assert!(env.config_path().is_file());
        assert!(!env.target_dir().exists());
    }

    #[test]
    fn test_vault_cleanup_on_drop() {
        let path = {
            let env = TestVault::new();
            env.vault_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_vault_cmd_sets_vault_and_config() {
        let env = TestVault::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--vault");
        assert_eq!(args[1], env.vault_dir().to_string_lossy());
        assert_eq!(args[2], "--config");
    }
}
