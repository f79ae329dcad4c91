//! Temporary files owned by a single install run.
//!
//! Both guards remove their artifact when dropped, so every exit path out of
//! the pipeline (success, cancellation, or a failed stage) cleans up.

use crate::error::Result;
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// The downloaded zip archive.
#[derive(Debug)]
pub struct TempArchive {
    path: PathBuf,
}

impl TempArchive {
    /// Claims `path` for this run, discarding anything left behind by an
    /// earlier interrupted run.
    pub fn claim(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::remove_file_if_exists(&path)?;
        fs::ensure_parent_dir(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArchive {
    fn drop(&mut self) {
        match fs::remove_file_if_exists(&self.path) {
            Ok(()) => log::info!("Removed temporary archive {}", self.path.display()),
            Err(e) => log::warn!(
                "Failed to remove temporary archive {}: {e}",
                self.path.display()
            ),
        }
    }
}

/// The directory the archive is unpacked into.
#[derive(Debug)]
pub struct ExtractedTree {
    root: PathBuf,
}

impl ExtractedTree {
    pub fn claim(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::remove_dir_recursive(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for ExtractedTree {
    fn drop(&mut self) {
        match fs::remove_dir_recursive(&self.root) {
            Ok(()) => log::info!("Removed temporary directory {}", self.root.display()),
            Err(e) => log::warn!(
                "Failed to remove temporary directory {}: {e}",
                self.root.display()
            ),
        }
    }
}
