//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `hugo-export` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ExportCommand {
    args: Vec<String>,
}

impl ExportCommand {
    /// Creates a new command for the `hugo-export` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--vault` option.
    pub fn vault(mut self, path: &Path) -> Self {
        self.args.push("--vault".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd =
            Command::cargo_bin("hugo-export").expect("Failed to find hugo-export binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `export` command.
    pub fn export(self) -> Self {
        self.args(["export"])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Adds `--target <path>`.
    pub fn target(self, path: &Path) -> Self {
        let path = path.to_string_lossy().to_string();
        self.args(["--target".to_string(), path])
    }

    /// Adds `--no-hooks`.
    pub fn no_hooks(self) -> Self {
        self.args(["--no-hooks"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for ExportCommand {
    fn default() -> Self {
        Self::new()
    }
}
