//! Version command implementation.

use anyhow::Result;
use ocicheck::whitelist::SUPPORTED_VERSION;

/// Executes the version command.
pub fn execute() -> Result<()> {
    println!("ocicheck version {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Runtime spec: {SUPPORTED_VERSION}");
    println!("Platform: {} / {}", std::env::consts::OS, std::env::consts::ARCH);

    Ok(())
}
