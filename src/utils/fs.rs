use crate::error::{InstallerError, Result};
use std::path::Path;

fn map_io_error(path: &Path, e: std::io::Error) -> InstallerError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => InstallerError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => InstallerError::from(e),
    }
}

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}

pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e))?;
    }
    Ok(())
}
