//! Shell commands run after a successful export.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Placeholder replaced with the target directory in hook commands.
pub const TARGET_PLACEHOLDER: &str = "{hugoDir}";

/// Errors from running after-export commands.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to launch shell for after-export commands in {dir}: {source}")]
    Spawn {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("after-export commands exited with {status}")]
    Failed { status: String },
}

/// Builds the script for a set of command lines.
///
/// Blank lines are dropped and every placeholder is replaced with `target`
/// verbatim, without quoting. Targets containing spaces need the placeholder
/// quoted in the command itself, as in `cd "{hugoDir}"`.
/// Returns `None` when there is nothing to run.
pub fn build_script(commands: &[String], target: &Path) -> Option<String> {
    let target = target.display().to_string();
    let lines: Vec<String> = commands
        .iter()
        .flat_map(|c| c.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace(TARGET_PLACEHOLDER, &target))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Runs the after-export commands as one shell script inside `target`.
///
/// Lines run in order in a single shell, so `cd {hugoDir}` on one line
/// affects the lines after it. The first failing line stops the script on
/// every platform. Does nothing when there are no commands.
///
/// # Errors
///
/// Returns `HookError::Spawn` if the shell cannot be started and
/// `HookError::Failed` if the script exits unsuccessfully.
pub fn run_after_export(commands: &[String], target: &Path) -> Result<(), HookError> {
    let Some(script) = build_script(commands, target) else {
        return Ok(());
    };

    info!("running after-export commands in {}", target.display());
    debug!("after-export script:\n{}", script);

    let status = shell(&script)
        .current_dir(target)
        .status()
        .map_err(|source| HookError::Spawn {
            dir: target.to_path_buf(),
            source,
        })?;

    if !status.success() {
        return Err(HookError::Failed {
            status: status.to_string(),
        });
    }

    Ok(())
}

#[cfg(windows)]
fn shell(script: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(script.replace('\n', " && "));
    cmd
}

#[cfg(not(windows))]
fn shell(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(format!("set -e\n{}", script));
    cmd
}
