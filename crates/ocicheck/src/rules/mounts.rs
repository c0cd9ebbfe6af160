//! Mount type checks.

use std::collections::HashSet;

use super::{Advisories, Advisory, Context, Violation};
use crate::config::Spec;
use crate::whitelist::{BIND_MOUNT_TYPE, WINDOWS_MOUNT_TYPE};

/// Mount types the target accepts, or `None` when they cannot be determined.
///
/// Windows targets accept a fixed set. Linux targets are only determinable in
/// host-specific mode, from the host's filesystem registry plus `bind`. Any
/// other OS is not checked.
pub fn supported_types(
    os: &str,
    ctx: Context<'_>,
    advisories: &mut Advisories,
) -> Result<Option<HashSet<String>>, Violation> {
    match os {
        "windows" => Ok(Some(HashSet::from([WINDOWS_MOUNT_TYPE.to_string()]))),
        "linux" if ctx.host_specific => {
            let mut types: HashSet<String> = ctx
                .probe
                .filesystems()
                .map_err(|e| Violation::FilesystemRegistry(e.to_string()))?
                .into_iter()
                .collect();
            types.insert(BIND_MOUNT_TYPE.to_string());
            Ok(Some(types))
        }
        "linux" => {
            advisories.push(Advisory::MountTypesNeedHost);
            Ok(None)
        }
        _ => {
            advisories.push(Advisory::MountTypesUncheckedOs(os.to_string()));
            Ok(None)
        }
    }
}

/// Every mount type must be supported by the target, when that is known.
pub fn check(spec: &Spec, ctx: Context<'_>, advisories: &mut Advisories) -> Result<(), Violation> {
    let Some(types) = supported_types(&spec.platform.os, ctx, advisories)? else {
        return Ok(());
    };

    match spec.mounts.iter().find(|m| !types.contains(&m.mount_type)) {
        Some(mount) => Err(Violation::UnsupportedMountType(mount.mount_type.clone())),
        None => Ok(()),
    }
}
