use crate::core::config::InstallerConfig;
use crate::core::pipeline::{InstallOutcome, Installer};
use crate::core::prompt::{ConsolePrompter, DestinationPresets};
use crate::error::Result;
use crate::utils::console::{print_completion, print_header};
use crate::utils::logging;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct InstallOptions {
    pub config_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

pub fn run_install(options: &InstallOptions) -> Result<InstallOutcome> {
    let config = resolve_config(options)?;

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!("⚠️  Warning: Could not open log file {:?}: {e}", config.log_file);
    }

    print_header();
    log::info!("termUI Installer started");

    let presets = DestinationPresets::detect(config.system_install_dir.clone(), &config.folder)?;
    let mut installer = Installer::new(&config, presets, ConsolePrompter::stdio());
    let result = installer.run();

    if let Ok(InstallOutcome::Installed { location }) = &result {
        print_completion(location);
        log::info!("Installation completed successfully");
    }

    result
}

fn resolve_config(options: &InstallOptions) -> Result<InstallerConfig> {
    let mut config = InstallerConfig::load(options.config_path.as_deref())?;
    if let Some(log_file) = &options.log_file {
        config.log_file = log_file.clone();
    }
    Ok(config)
}

/// Keeps the console window open until the user presses Enter.
pub fn wait_for_enter() -> Result<()> {
    print!("Press Enter to exit...");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_file_flag_overrides_config() {
        let options = InstallOptions {
            config_path: None,
            log_file: Some(PathBuf::from("custom.log")),
        };
        let config = resolve_config(&options).unwrap();
        assert_eq!(config.log_file, PathBuf::from("custom.log"));
    }

    #[test]
    fn test_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.json");
        std::fs::write(&path, r#"{ "folder": "termCalc" }"#).unwrap();

        let options = InstallOptions {
            config_path: Some(path),
            log_file: None,
        };
        let config = resolve_config(&options).unwrap();
        assert_eq!(config.folder, "termCalc");
        assert_eq!(config.log_file, InstallerConfig::default().log_file);
    }
}
