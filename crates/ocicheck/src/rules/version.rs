//! `ociVersion` check.

use semver::Version;

use super::Violation;
use crate::whitelist::SUPPORTED_VERSION;

/// The version must parse as `SemVer` and equal [`SUPPORTED_VERSION`] exactly.
pub fn check(version: &str) -> Result<(), Violation> {
    Version::parse(version).map_err(|e| Violation::InvalidVersion {
        version: version.to_string(),
        reason: e.to_string(),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Violation::UnsupportedVersion(version.to_string()));
    }

    Ok(())
}
