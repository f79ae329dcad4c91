use crate::error::{InstallerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// GitHub repository in `owner/name` form.
    pub repository: String,
    pub branch: String,
    /// Folder inside the repository that gets installed.
    pub folder: String,
    /// Overrides the GitHub archive URL, e.g. for a mirror.
    pub download_url: Option<String>,
    pub archive_path: PathBuf,
    pub extract_dir: PathBuf,
    pub log_file: PathBuf,
    pub system_install_dir: PathBuf,
    /// No timeout when unset; the download blocks until it completes or fails.
    pub download_timeout_secs: Option<u64>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        InstallerConfig {
            repository: "SanitysHelper/cmd".to_string(),
            branch: "main".to_string(),
            folder: "termUI".to_string(),
            download_url: None,
            archive_path: PathBuf::from("termUI_download.zip"),
            extract_dir: PathBuf::from("termUI_temp"),
            log_file: Path::new("_debug").join("logs").join("installer.log"),
            system_install_dir: default_system_install_dir(),
            download_timeout_secs: None,
        }
    }
}

impl InstallerConfig {
    /// Loads the configuration from `path`, or returns the defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            InstallerError::config_error(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: InstallerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.download_url.is_none() && self.repository_name().is_none() {
            return Err(InstallerError::config_error(format!(
                "repository must look like 'owner/name', got '{}'",
                self.repository
            )));
        }
        if self.branch.trim().is_empty() {
            return Err(InstallerError::config_error("branch must not be empty"));
        }
        if self.folder.trim().is_empty() {
            return Err(InstallerError::config_error("folder must not be empty"));
        }
        Ok(())
    }

    pub fn download_url(&self) -> String {
        match &self.download_url {
            Some(url) => url.clone(),
            None => format!(
                "https://github.com/{}/archive/refs/heads/{}.zip",
                self.repository, self.branch
            ),
        }
    }

    fn repository_name(&self) -> Option<&str> {
        match self.repository.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Some(name),
            _ => None,
        }
    }

    /// Directory a GitHub branch archive unpacks its top level into.
    pub fn archive_root(&self) -> PathBuf {
        let name = self
            .repository_name()
            .unwrap_or(self.repository.as_str());
        self.extract_dir.join(format!("{name}-{}", self.branch))
    }

    /// The folder that gets copied out of the extracted tree.
    pub fn source_dir(&self) -> PathBuf {
        self.archive_root().join(&self.folder)
    }

    pub fn install_target(&self, install_dir: &Path) -> PathBuf {
        install_dir.join(&self.folder)
    }

    pub fn download_timeout(&self) -> Option<Duration> {
        self.download_timeout_secs.map(Duration::from_secs)
    }
}

fn default_system_install_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Program Files\termUI")
    } else {
        PathBuf::from("/opt/termUI")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_download_url() {
        let config = InstallerConfig::default();
        assert_eq!(
            config.download_url(),
            "https://github.com/SanitysHelper/cmd/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn test_download_url_override() {
        let config = InstallerConfig {
            download_url: Some("http://localhost:8080/main.zip".to_string()),
            ..InstallerConfig::default()
        };
        assert_eq!(config.download_url(), "http://localhost:8080/main.zip");
    }

    #[test]
    fn test_source_dir_layout() {
        let config = InstallerConfig::default();
        assert_eq!(
            config.source_dir(),
            PathBuf::from("termUI_temp").join("cmd-main").join("termUI")
        );
        assert_eq!(
            config.install_target(Path::new("dest")),
            PathBuf::from("dest").join("termUI")
        );
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = InstallerConfig::load(None).unwrap();
        assert_eq!(config, InstallerConfig::default());
        assert_eq!(config.download_timeout(), None);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.json");
        std::fs::write(
            &path,
            r#"{ "branch": "dev", "download_timeout_secs": 30 }"#,
        )
        .unwrap();

        let config = InstallerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.branch, "dev");
        assert_eq!(config.repository, "SanitysHelper/cmd");
        assert_eq!(config.download_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.archive_root(), PathBuf::from("termUI_temp").join("cmd-dev"));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.json");
        std::fs::write(&path, r#"{ "brnach": "dev" }"#).unwrap();

        assert!(matches!(
            InstallerConfig::load(Some(&path)),
            Err(InstallerError::Json(_))
        ));
    }

    #[test]
    fn test_load_rejects_bad_repository() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.json");
        std::fs::write(&path, r#"{ "repository": "cmd" }"#).unwrap();

        assert!(matches!(
            InstallerConfig::load(Some(&path)),
            Err(InstallerError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = InstallerConfig::load(Some(Path::new("/nonexistent/installer.json")));
        assert!(matches!(result, Err(InstallerError::ConfigError { .. })));
    }
}
