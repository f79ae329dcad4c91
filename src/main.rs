use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use termui_installer::commands::install::{self, InstallOptions};
use termui_installer::core::pipeline::exit_code;

#[derive(Parser)]
#[clap(name = "termui-installer")]
#[clap(about = "Download termUI from GitHub and install it")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// JSON file overriding the repository, branch, paths or timeout
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Append log records to this file instead of _debug/logs/installer.log
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Wait for Enter before exiting
    #[clap(long)]
    pause: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = InstallOptions {
        config_path: cli.config,
        log_file: cli.log_file,
    };
    let result = install::run_install(&options);
    let code = exit_code(&result);

    if let Err(e) = result.map_err(|e| anyhow::anyhow!(e)) {
        eprintln!("Error: {e}");
    }

    if cli.pause {
        install::wait_for_enter().map_err(|e| anyhow::anyhow!(e))?;
    }

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
