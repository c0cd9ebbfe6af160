//! Validate command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ocicheck::Bundle;
use tracing::{debug, info};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the bundle directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Also run checks that inspect the host (mount types, hook executables)
    #[arg(long)]
    pub host_specific: bool,
}

/// Executes the validate command.
pub fn execute(args: &ValidateArgs) -> Result<()> {
    let bundle = Bundle::load(&args.path)?;
    debug!(
        "Validating {} (host-specific: {})",
        bundle.config_path().display(),
        args.host_specific
    );

    let report = bundle.validate(args.host_specific)?;
    if !report.advisories.is_empty() {
        debug!("{} advisories raised", report.advisories.len());
    }

    info!("Bundle validation succeeded.");
    Ok(())
}
