//! The install run: download, extract, confirm, choose a destination, copy.
//!
//! Temporary artifacts are held by guards scoped to [`Installer::execute`],
//! so they are gone by the time [`Installer::run`] records `Cleaned`.

use crate::core::config::InstallerConfig;
use crate::core::copy::{copy_tree, default_copy_tool, CopyTool};
use crate::core::download::Downloader;
use crate::core::extract::{default_extractor, extract_archive, Extractor};
use crate::core::prompt::{DestinationPresets, Prompter};
use crate::error::{InstallerError, Result};
use crate::utils::console::{print_error, print_info, print_success};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Downloaded,
    Extracted,
    Cancelled,
    Copied,
    Cleaned,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Downloaded => "downloaded",
            Stage::Extracted => "extracted",
            Stage::Cancelled => "cancelled",
            Stage::Copied => "copied",
            Stage::Cleaned => "cleaned",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    /// Files were copied to `location`.
    Installed { location: PathBuf },
    /// The user declined the install.
    Cancelled,
}

/// Process exit status for a finished run: cancelling is not a failure.
pub fn exit_code(result: &Result<InstallOutcome>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

pub struct Installer<'a, P> {
    config: &'a InstallerConfig,
    presets: DestinationPresets,
    prompter: P,
    extractor: Box<dyn Extractor>,
    copy_tool: Box<dyn CopyTool>,
    history: Vec<Stage>,
}

impl<'a, P: Prompter> Installer<'a, P> {
    pub fn new(config: &'a InstallerConfig, presets: DestinationPresets, prompter: P) -> Self {
        Self {
            config,
            presets,
            prompter,
            extractor: default_extractor(),
            copy_tool: default_copy_tool(),
            history: Vec::new(),
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_copy_tool(mut self, copy_tool: Box<dyn CopyTool>) -> Self {
        self.copy_tool = copy_tool;
        self
    }

    /// Stages the last run passed through, in order.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    pub fn run(&mut self) -> Result<InstallOutcome> {
        self.history.clear();
        self.enter(Stage::Start);

        let result = self.execute();
        let reached = self.current_stage();
        self.enter(Stage::Cleaned);

        match &result {
            Ok(_) => self.enter(Stage::Done),
            Err(e) => {
                let failed_after = e.stage().unwrap_or(reached);
                print_error(&failure_summary(e, reached, &self.config.folder));
                log::error!("Install failed after stage '{failed_after}': {e}");
                self.enter(Stage::Failed);
            }
        }

        result
    }

    fn execute(&mut self) -> Result<InstallOutcome> {
        let folder = self.config.folder.clone();

        print_info(&format!("Downloading {folder} from GitHub..."));
        let downloader = Downloader::new(self.config.download_timeout())?;
        let archive = downloader.download(&self.config.download_url(), &self.config.archive_path)?;
        print_success("Download complete!");
        log::info!("Download successful");
        self.enter(Stage::Downloaded);

        print_info("Extracting archive...");
        let tree = extract_archive(self.extractor.as_ref(), &archive, &self.config.extract_dir)?;
        print_success("Extraction complete!");
        self.enter(Stage::Extracted);

        println!();
        if !self
            .prompter
            .confirm(&format!("Do you want to install {folder}?"))?
        {
            print_info("Installation cancelled by user");
            log::info!("Installation cancelled");
            self.enter(Stage::Cancelled);
            return Ok(InstallOutcome::Cancelled);
        }

        let install_dir = self.prompter.choose_destination(&self.presets)?;
        print_info(&format!("Installing to: {}", install_dir.display()));
        log::info!("Installation path: {}", install_dir.display());

        let source = self.config.source_dir();
        let location = self.config.install_target(&install_dir);

        print_info("Copying files...");
        copy_tree(self.copy_tool.as_ref(), &source, &location)?;
        print_success("Installation complete!");
        log::info!("Installation successful to: {}", install_dir.display());
        self.enter(Stage::Copied);

        print_info("Cleaning up temporary files...");
        drop(tree);
        drop(archive);

        Ok(InstallOutcome::Installed { location })
    }

    fn enter(&mut self, stage: Stage) {
        log::debug!("Entering stage '{stage}'");
        self.history.push(stage);
    }

    fn current_stage(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Start)
    }
}

/// Console line for a failed run. Stage-specific errors name their stage;
/// anything else is attributed to the last stage the run completed.
fn failure_summary(error: &InstallerError, reached: Stage, folder: &str) -> String {
    match error {
        InstallerError::Download { .. } | InstallerError::EmptyDownload { .. } => {
            format!("Failed to download {folder} from GitHub")
        }
        InstallerError::Extraction { .. } => "Failed to extract archive".to_string(),
        InstallerError::Copy { .. } => "Failed to copy files".to_string(),
        InstallerError::PromptError { .. } => "Failed to read your answer".to_string(),
        _ => match reached {
            Stage::Start => format!("Failed to download {folder} from GitHub"),
            Stage::Downloaded => "Failed to extract archive".to_string(),
            _ => format!("Failed to install {folder}"),
        },
    }
}
