//! OS / architecture compatibility check.

use super::Violation;
use crate::config::Platform;
use crate::whitelist::platform_arches;

/// `(os, arch)` must be listed in the platform table.
pub fn check(platform: &Platform) -> Result<(), Violation> {
    let arches =
        platform_arches(&platform.os).ok_or_else(|| Violation::UnsupportedOs(platform.os.clone()))?;

    if !arches.contains(&platform.arch.as_str()) {
        return Err(Violation::InvalidPlatform {
            os: platform.os.clone(),
            arch: platform.arch.clone(),
        });
    }

    Ok(())
}
