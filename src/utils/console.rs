//! Console messages shown while the installer runs.

use std::path::Path;

pub fn print_header() {
    println!();
    println!("=============================================");
    println!("       termUI Installer v{}", env!("CARGO_PKG_VERSION"));
    println!("=============================================");
    println!();
}

pub fn print_info(message: &str) {
    println!("ℹ️  {message}");
}

pub fn print_success(message: &str) {
    println!("✅ {message}");
}

pub fn print_error(message: &str) {
    eprintln!("❌ {message}");
}

pub fn print_completion(location: &Path) {
    let launcher = if cfg!(windows) { r".\run.bat" } else { "./run.sh" };

    println!();
    println!("=============================================");
    println!("  termUI has been installed successfully!");
    println!("=============================================");
    println!();
    println!("Installation location: {}", location.display());
    println!();
    println!("To run termUI, navigate to the installation directory and run:");
    println!("   cd \"{}\"", location.display());
    println!("   {launcher}");
    println!();
}
