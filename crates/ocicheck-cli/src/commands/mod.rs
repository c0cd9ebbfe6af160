//! CLI command implementations.

use clap::{Parser, Subcommand};

pub mod validate;
pub mod version;

/// ocicheck - Validate OCI runtime bundles before launching them
#[derive(Parser)]
#[command(name = "ocicheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a bundle's config.json
    Validate(validate::ValidateArgs),

    /// Show version information
    Version,
}
