use crate::core::pipeline::Stage;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InstallerError>;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Download failed: {url} ({message})")]
    Download { url: String, message: String },

    #[error("Download from {url} received no data")]
    EmptyDownload { url: String },

    #[error("Extraction failed: {path} ({message})")]
    Extraction { path: PathBuf, message: String },

    #[error("Copy from {source_dir} to {destination} failed with exit code {}", describe_code(.code))]
    Copy {
        source_dir: PathBuf,
        destination: PathBuf,
        code: Option<i32>,
    },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Required tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Prompt error: {message}")]
    PromptError { message: String },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl InstallerError {
    pub fn download_error<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        InstallerError::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn extraction_error<P: Into<PathBuf>, M: Into<String>>(path: P, message: M) -> Self {
        InstallerError::Extraction {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config_error<S: Into<String>>(message: S) -> Self {
        InstallerError::ConfigError {
            message: message.into(),
        }
    }

    pub fn prompt_error<S: Into<String>>(message: S) -> Self {
        InstallerError::PromptError {
            message: message.into(),
        }
    }

    /// The last stage a run had completed when this error ended it, for
    /// errors that only one stage can raise. `None` for errors such as I/O
    /// failures or a missing tool that can come from several stages.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            InstallerError::Download { .. } | InstallerError::EmptyDownload { .. } => {
                Some(Stage::Start)
            }
            InstallerError::Extraction { .. } => Some(Stage::Downloaded),
            InstallerError::Copy { .. } | InstallerError::PromptError { .. } => {
                Some(Stage::Extracted)
            }
            _ => None,
        }
    }
}
