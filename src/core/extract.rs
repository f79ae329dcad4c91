use crate::core::artifacts::{ExtractedTree, TempArchive};
use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Unpacks a zip archive by handing it to an external tool.
pub trait Extractor {
    fn name(&self) -> &str;

    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}

/// Unpacks `archive` into `destination`. The returned guard owns the
/// directory, which is removed again if the tool fails.
pub fn extract_archive(
    extractor: &dyn Extractor,
    archive: &TempArchive,
    destination: &Path,
) -> Result<ExtractedTree> {
    log::info!(
        "Extracting {} to {} with {}",
        archive.path().display(),
        destination.display(),
        extractor.name()
    );
    let tree = ExtractedTree::claim(destination)?;
    extractor.extract(archive.path(), tree.root())?;
    log::info!("Extraction successful");
    Ok(tree)
}

/// PowerShell's `Expand-Archive` cmdlet.
pub struct ExpandArchive;

impl Extractor for ExpandArchive {
    fn name(&self) -> &str {
        "Expand-Archive"
    }

    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let powershell = locate_tool("powershell")?;
        let script = format!(
            "Expand-Archive -Path {} -DestinationPath {} -Force",
            powershell_quote(archive),
            powershell_quote(destination)
        );

        let status = Command::new(powershell)
            .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"])
            .arg(script)
            .status()?;

        check_status(archive, status)
    }
}

/// Info-ZIP `unzip`.
pub struct Unzip;

impl Extractor for Unzip {
    fn name(&self) -> &str {
        "unzip"
    }

    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        let unzip = locate_tool("unzip")?;
        let status = Command::new(unzip)
            .args(["-o", "-q"])
            .arg(archive)
            .arg("-d")
            .arg(destination)
            .status()?;

        check_status(archive, status)
    }
}

pub fn default_extractor() -> Box<dyn Extractor> {
    if cfg!(windows) {
        Box::new(ExpandArchive)
    } else {
        Box::new(Unzip)
    }
}

pub(crate) fn locate_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| {
        log::error!("{name} was not found on PATH");
        InstallerError::ToolNotFound {
            name: name.to_string(),
        }
    })
}

fn check_status(archive: &Path, status: std::process::ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    let message = match status.code() {
        Some(code) => format!("extraction tool failed with code: {code}"),
        None => "extraction tool was terminated by a signal".to_string(),
    };
    log::error!("{message}");
    Err(InstallerError::extraction_error(archive, message))
}

fn powershell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "''"))
}
