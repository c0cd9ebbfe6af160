//! Semantic rules over a parsed configuration.
//!
//! The checks run in a fixed order and stop at the first violation:
//!
//! 1. version
//! 2. platform
//! 3. process
//! 4. mounts
//! 5. linux (namespaces, sysctl, devices, propagation, seccomp)
//! 6. hooks
//!
//! Non-fatal findings are collected as [`Advisory`] values and logged.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Spec;
use crate::probe::HostProbe;

pub mod hooks;
pub mod linux;
pub mod mounts;
pub mod platform;
pub mod process;
pub mod seccomp;
pub mod version;

pub use hooks::HookPhase;

/// Maximum number of UID or GID mappings the kernel accepts.
pub const MAX_ID_MAPPINGS: usize = 5;

/// A violated semantic rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Version is not valid semantic versioning.
    #[error("{version:?} is not valid SemVer: {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Version is valid but not the supported one.
    #[error(
        "validate currently only handles version {supported}, but the supplied configuration targets {0}",
        supported = crate::whitelist::SUPPORTED_VERSION
    )]
    UnsupportedVersion(String),

    /// Operating system is not in the platform table.
    #[error("operating system {0:?} of the bundle is not supported yet")]
    UnsupportedOs(String),

    /// Architecture is not listed for the operating system.
    #[error("combination of {os:?} and {arch:?} is invalid")]
    InvalidPlatform { os: String, arch: String },

    /// Process working directory is relative.
    #[error("cwd {0:?} is not an absolute path")]
    RelativeCwd(String),

    /// Process environment entry is malformed.
    #[error(
        "env {0:?} should be in the form of 'key=value'. The left hand side must consist solely of letters, digits, and underscores '_'"
    )]
    InvalidEnv(String),

    /// Capability is not a known Linux capability.
    #[error("capability {0:?} is not valid, man capabilities(7)")]
    InvalidCapability(String),

    /// Rlimit type is unknown.
    #[error("rlimit type {0:?} is invalid")]
    InvalidRlimit(String),

    /// `AppArmor` profile is missing from the rootfs.
    #[error("apparmor profile {0:?} does not exist")]
    MissingApparmorProfile(PathBuf),

    /// Host filesystem-type registry could not be read.
    #[error("cannot read host filesystem types: {0}")]
    FilesystemRegistry(String),

    /// Mount type is not supported on the target.
    #[error("unsupported mount type {0:?}")]
    UnsupportedMountType(String),

    /// Too many user namespace ID mappings.
    #[error(
        "only {max} {kind} mappings are allowed (linux kernel restriction), got {count}",
        max = MAX_ID_MAPPINGS
    )]
    TooManyIdMappings { kind: &'static str, count: usize },

    /// Namespace type is unknown.
    #[error("namespace type {0:?} is invalid")]
    InvalidNamespace(String),

    /// `net.*` sysctl without a new network namespace.
    #[error("sysctl {0} requires a new Network namespace to be specified as well")]
    SysctlNeedsNetwork(String),

    /// `fs.mqueue.*` sysctl without new IPC and mount namespaces.
    #[error("sysctl {0} requires a new IPC namespace and Mount namespace to be specified as well")]
    SysctlNeedsIpcAndMount(String),

    /// Hostname set on Linux without a new UTS namespace.
    #[error("on Linux, hostname requires a new UTS namespace to be specified as well")]
    HostnameNeedsUts,

    /// Device type or numbers are invalid.
    #[error("device {path:?} of type {device_type:?} ({major}:{minor}) is invalid")]
    InvalidDevice {
        path: String,
        device_type: String,
        major: i64,
        minor: i64,
    },

    /// Root filesystem propagation mode is unknown.
    #[error(
        "rootfsPropagation must be empty or one of \"private|rprivate|slave|rslave|shared|rshared\", got {0:?}"
    )]
    InvalidRootfsPropagation(String),

    /// Seccomp default action is unknown.
    #[error("seccomp defaultAction {0:?} is invalid")]
    InvalidSeccompDefaultAction(String),

    /// Seccomp syscall action is unknown.
    #[error("seccomp action {action:?} for syscall {name:?} is invalid")]
    InvalidSyscallAction { name: String, action: String },

    /// Seccomp argument operator is unknown.
    #[error("seccomp operator {op:?} for syscall {name:?} is invalid")]
    InvalidSyscallOperator { name: String, op: String },

    /// Seccomp architecture is unknown.
    #[error("seccomp architecture {0:?} is invalid")]
    InvalidSeccompArch(String),

    /// Hook path is relative.
    #[error("the {phase} hook {path:?} is not an absolute path")]
    RelativeHookPath { phase: HookPhase, path: String },

    /// Hook executable does not exist on the host.
    #[error("cannot find {phase} hook {path:?}")]
    HookNotFound { phase: HookPhase, path: String },

    /// Hook executable has no executable permission bit.
    #[error("the {phase} hook {path:?} is not executable")]
    HookNotExecutable { phase: HookPhase, path: String },

    /// Hook environment entry is malformed.
    #[error("env {env:?} for hook {path:?} is in the invalid form")]
    InvalidHookEnv { path: String, env: String },
}

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Environment variable name starts with a digit.
    DigitLeadingEnvKey(String),
    /// Mount types are not checked for this operating system.
    MountTypesUncheckedOs(String),
    /// Linux mount types are only checked in host-specific mode.
    MountTypesNeedHost,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigitLeadingEnvKey(env) => {
                write!(f, "env {env}: variable name beginning with digit is not recommended")
            }
            Self::MountTypesUncheckedOs(os) => {
                write!(f, "{os} is not supported to check mount type")
            }
            Self::MountTypesNeedHost => f.write_str(
                "checking linux mount types without --host-specific is not supported yet",
            ),
        }
    }
}

/// Sink for advisories raised while checking.
#[derive(Debug, Default)]
pub struct Advisories(Vec<Advisory>);

impl Advisories {
    /// Record and log an advisory.
    pub fn push(&mut self, advisory: Advisory) {
        warn!("{advisory}");
        self.0.push(advisory);
    }

    /// Take the collected advisories.
    #[must_use]
    pub fn into_vec(self) -> Vec<Advisory> {
        self.0
    }

}

/// Inputs the rules need besides the configuration itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Resolved root filesystem of the bundle.
    pub rootfs: &'a Path,
    /// Whether host-inspection checks are enabled.
    pub host_specific: bool,
    /// Host filesystem access.
    pub probe: &'a dyn HostProbe,
}

/// Run every rule in order, stopping at the first violation.
pub fn run(spec: &Spec, ctx: Context<'_>, advisories: &mut Advisories) -> Result<(), Violation> {
    debug!("checking version");
    version::check(&spec.oci_version)?;
    debug!("checking platform");
    platform::check(&spec.platform)?;
    debug!("checking process");
    process::check(&spec.process, ctx, advisories)?;
    debug!("checking mounts");
    mounts::check(spec, ctx, advisories)?;
    debug!("checking linux");
    linux::check(spec)?;
    debug!("checking hooks");
    hooks::check(&spec.hooks, ctx, advisories)
}

/// Validate a `KEY=VALUE` environment entry.
///
/// The key is trimmed and must be non-empty and consist of letters, digits
/// and underscores. A key that starts with a digit is accepted with an
/// advisory.
pub fn env_valid(entry: &str, advisories: &mut Advisories) -> bool {
    let Some((key, _)) = entry.split_once('=') else {
        return false;
    };
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|ch| ch.is_alphabetic() || ch.is_ascii_digit() || ch == '_')
    {
        return false;
    }
    if key.starts_with(|ch: char| ch.is_ascii_digit()) {
        advisories.push(Advisory::DigitLeadingEnvKey(entry.to_string()));
    }
    true
}


#[cfg(test)]
mod tests {
    use super::testing::FakeHost;
    use super::*;

    #[test]
    fn test_env_valid() {
        let mut advisories = Advisories::default();
        assert!(env_valid("PATH=/usr/bin", &mut advisories));
        assert!(env_valid("EMPTY=", &mut advisories));
        assert!(env_valid("A_B_1=x=y", &mut advisories));
        assert!(env_valid(" PADDED =1", &mut advisories));
        assert!(advisories.into_vec().is_empty());
    }

    #[test]
    fn test_env_invalid() {
        let mut advisories = Advisories::default();
        assert!(!env_valid("NOVALUE", &mut advisories));
        assert!(!env_valid("=value", &mut advisories));
        assert!(!env_valid("BAD-KEY=1", &mut advisories));
        assert!(!env_valid("BAD.KEY=1", &mut advisories));
        assert!(!env_valid("X\u{b2}=1", &mut advisories));
        assert!(!env_valid("\u{bd}K=1", &mut advisories));
        assert!(advisories.into_vec().is_empty());
    }

    #[test]
    fn test_env_accepts_unicode_letters() {
        let mut advisories = Advisories::default();
        assert!(env_valid("CAFÉ_1=x", &mut advisories));
        assert!(advisories.into_vec().is_empty());
    }

    #[test]
    fn test_unsupported_version_message() {
        assert_eq!(
            Violation::UnsupportedVersion("9.9.9".to_string()).to_string(),
            "validate currently only handles version 1.0.0, but the supplied configuration targets 9.9.9"
        );
    }

    #[test]
    fn test_env_digit_leading_key_is_advisory() {
        let mut advisories = Advisories::default();
        assert!(env_valid("1KEY=v", &mut advisories));
        assert_eq!(
            advisories.into_vec(),
            vec![Advisory::DigitLeadingEnvKey("1KEY=v".to_string())]
        );
    }

    #[test]
    fn test_run_stops_at_first_violation() {
        // Both the version and the platform are wrong; only the version is reported.
        let spec = Spec {
            oci_version: "9.9.9".to_string(),
            ..Spec::default()
        };
        let host = FakeHost::default();
        let ctx = Context {
            rootfs: Path::new("/bundle/rootfs"),
            host_specific: false,
            probe: &host,
        };
        let mut advisories = Advisories::default();
        let err = run(&spec, ctx, &mut advisories).unwrap_err();
        assert_eq!(err, Violation::UnsupportedVersion("9.9.9".to_string()));
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::InvalidPlatform {
                os: "linux".to_string(),
                arch: "sparc".to_string()
            }
            .to_string(),
            "combination of \"linux\" and \"sparc\" is invalid"
        );
        assert_eq!(
            Violation::TooManyIdMappings {
                kind: "UID",
                count: 6
            }
            .to_string(),
            "only 5 UID mappings are allowed (linux kernel restriction), got 6"
        );
        assert_eq!(
            Violation::HookNotExecutable {
                phase: HookPhase::Poststop,
                path: "/bin/x".to_string()
            }
            .to_string(),
            "the post-stop hook \"/bin/x\" is not executable"
        );
    }
}
