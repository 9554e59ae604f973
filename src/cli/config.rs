//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default Hugo content directory, relative to the vault root.
pub const DEFAULT_TARGET_DIR: &str = "./blog";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default vault directory
    pub vault_dir: Option<PathBuf>,

    /// Hugo content directory, absolute or relative to the vault
    pub target_dir: Option<String>,

    /// Shell command lines run in the target directory after an export
    #[serde(default)]
    pub after_export_commands: Vec<String>,
}

impl Config {
    /// Load configuration from `path`, or the default location if `None`.
    ///
    /// A missing default config file yields the default config. A missing
    /// file given explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !explicit && !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/hugo-export/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hugo-export")
            .join("config.toml")
    }

    /// Resolve the vault directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--vault` argument
    /// 2. Config file `vault_dir` setting
    /// 3. Current working directory
    pub fn vault_dir(&self, cli_vault: Option<&PathBuf>) -> PathBuf {
        cli_vault
            .cloned()
            .or_else(|| self.vault_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve the target directory as written in the config.
    ///
    /// An absent `target_dir` means [`DEFAULT_TARGET_DIR`]. A present but
    /// blank value stays blank so the export can reject it.
    pub fn target_dir(&self) -> &str {
        self.target_dir.as_deref().unwrap_or(DEFAULT_TARGET_DIR)
    }
}
