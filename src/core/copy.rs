use crate::core::extract::locate_tool;
use crate::error::{InstallerError, Result};
use crate::utils::fs;
use std::path::Path;
use std::process::Command;

/// Range of exit codes, starting at 0, that a copy tool uses to report
/// success. Anything above it, or death by signal, is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessBand {
    max: i32,
}

impl SuccessBand {
    /// robocopy returns 0-7 for success variants (files copied, extra files,
    /// mismatches) and 8 or above when at least one copy failed.
    pub const ROBOCOPY: SuccessBand = SuccessBand { max: 7 };

    pub const ZERO_ONLY: SuccessBand = SuccessBand { max: 0 };

    pub fn accepts(&self, code: Option<i32>) -> bool {
        matches!(code, Some(code) if (0..=self.max).contains(&code))
    }

    pub fn check(&self, source: &Path, destination: &Path, code: Option<i32>) -> Result<()> {
        if self.accepts(code) {
            return Ok(());
        }
        Err(InstallerError::Copy {
            source_dir: source.to_path_buf(),
            destination: destination.to_path_buf(),
            code,
        })
    }
}

/// Recursively copies a directory by handing it to an external tool.
pub trait CopyTool {
    fn name(&self) -> &str;

    fn copy_tree(&self, source: &Path, destination: &Path) -> Result<()>;
}

/// Creates `destination` and copies the contents of `source` into it.
pub fn copy_tree(tool: &dyn CopyTool, source: &Path, destination: &Path) -> Result<()> {
    log::info!(
        "Copying from {} to {} with {}",
        source.display(),
        destination.display(),
        tool.name()
    );
    fs::ensure_dir_exists(destination)?;

    match tool.copy_tree(source, destination) {
        Ok(()) => {
            log::info!("Copy successful");
            Ok(())
        }
        Err(e) => {
            log::error!("{} failed: {e}", tool.name());
            Err(e)
        }
    }
}

pub struct Robocopy;

impl CopyTool for Robocopy {
    fn name(&self) -> &str {
        "robocopy"
    }

    fn copy_tree(&self, source: &Path, destination: &Path) -> Result<()> {
        let robocopy = locate_tool("robocopy")?;
        let status = Command::new(robocopy)
            .arg(source)
            .arg(destination)
            .args(["/E", "/NFL", "/NDL", "/NJH", "/NJS", "/NC", "/NS", "/NP"])
            .status()?;

        SuccessBand::ROBOCOPY.check(source, destination, status.code())
    }
}

/// POSIX `cp -R`.
pub struct ShellCopy;

impl CopyTool for ShellCopy {
    fn name(&self) -> &str {
        "cp"
    }

    fn copy_tree(&self, source: &Path, destination: &Path) -> Result<()> {
        let cp = locate_tool("cp")?;
        // `src/.` copies the directory's contents rather than the directory.
        let status = Command::new(cp)
            .arg("-R")
            .arg(source.join("."))
            .arg(destination)
            .status()?;

        SuccessBand::ZERO_ONLY.check(source, destination, status.code())
    }
}

pub fn default_copy_tool() -> Box<dyn CopyTool> {
    if cfg!(windows) {
        Box::new(Robocopy)
    } else {
        Box::new(ShellCopy)
    }
}
