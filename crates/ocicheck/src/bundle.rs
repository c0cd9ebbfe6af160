//! OCI bundle loading.
//!
//! A bundle is a directory containing:
//! - `config.json`: the runtime configuration
//! - the root filesystem directory named by `root.path`
//!
//! Reference: <https://github.com/opencontainers/runtime-spec/blob/v1.0.0/bundle.md>

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Spec;
use crate::error::{CheckError, Result};
use crate::validate::{Report, Validator};

/// OCI bundle path constants.
pub mod paths {
    /// Standard config file name.
    pub const CONFIG_FILE: &str = "config.json";
}

/// A loaded bundle: its directory and parsed configuration.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Bundle directory as given to [`Bundle::load`].
    path: PathBuf,
    /// Parsed configuration.
    spec: Spec,
}

impl Bundle {
    /// Load a bundle from a directory.
    ///
    /// Reads and decodes `config.json`, then checks that the root
    /// filesystem it names exists and is a directory. The configuration
    /// itself is not validated here; see [`Bundle::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(CheckError::BundlePathEmpty);
        }

        if !path.exists() {
            return Err(CheckError::BundleNotFound(path.to_path_buf()));
        }

        let config_path = path.join(paths::CONFIG_FILE);
        let bytes = std::fs::read(&config_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CheckError::ConfigNotFound(path.to_path_buf()),
            _ => CheckError::Io(e),
        })?;

        let content =
            std::str::from_utf8(&bytes).map_err(|_| CheckError::NotUtf8(config_path.clone()))?;
        let spec = Spec::from_json(content)?;
        debug!("Loaded OCI spec from {}", config_path.display());

        let bundle = Self {
            path: path.to_path_buf(),
            spec,
        };

        let rootfs = bundle.rootfs_path();
        if !rootfs.exists() {
            return Err(CheckError::RootNotFound(rootfs));
        }
        if !rootfs.is_dir() {
            return Err(CheckError::RootNotDirectory(rootfs));
        }

        Ok(bundle)
    }

    /// Get the bundle directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed configuration.
    #[must_use]
    pub const fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Get the config.json path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path.join(paths::CONFIG_FILE)
    }

    /// Get the root filesystem path.
    ///
    /// `root.path` is always resolved inside the bundle directory, even
    /// when it is written as an absolute path.
    #[must_use]
    pub fn rootfs_path(&self) -> PathBuf {
        self.path.join(self.spec.root.path.trim_start_matches('/'))
    }

    /// Validate the configuration against this bundle's rootfs and the
    /// local host.
    pub fn validate(&self, host_specific: bool) -> Result<Report> {
        Validator::new(self.rootfs_path(), host_specific).validate(&self.spec)
    }
}
