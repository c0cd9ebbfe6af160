//! Process section checks.

use super::{env_valid, Advisories, Context, Violation};
use crate::config::Process;
use crate::whitelist::{is_capability, is_rlimit};

/// Directory under the rootfs that holds `AppArmor` profiles.
pub const APPARMOR_PROFILE_DIR: &str = "etc/apparmor.d";

/// Check cwd, environment, capabilities, rlimits and the `AppArmor` profile.
pub fn check(
    process: &Process,
    ctx: Context<'_>,
    advisories: &mut Advisories,
) -> Result<(), Violation> {
    if !process.cwd.starts_with('/') {
        return Err(Violation::RelativeCwd(process.cwd.clone()));
    }

    if let Some(env) = process.env.iter().find(|env| !env_valid(env, advisories)) {
        return Err(Violation::InvalidEnv(env.clone()));
    }

    if let Some(cap) = process.capabilities.iter().find(|cap| !is_capability(cap)) {
        return Err(Violation::InvalidCapability(cap.clone()));
    }

    if let Some(rlimit) = process
        .rlimits
        .iter()
        .find(|rlimit| !is_rlimit(&rlimit.rlimit_type))
    {
        return Err(Violation::InvalidRlimit(rlimit.rlimit_type.clone()));
    }

    if !process.apparmor_profile.is_empty() {
        let profile = ctx
            .rootfs
            .join(APPARMOR_PROFILE_DIR)
            .join(process.apparmor_profile.trim_start_matches('/'));
        if !ctx.probe.exists(&profile) {
            return Err(Violation::MissingApparmorProfile(profile));
        }
    }

    Ok(())
}
