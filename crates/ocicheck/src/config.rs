//! OCI runtime configuration model.
//!
//! This module mirrors the `config.json` document of the OCI Runtime
//! Specification 1.0.0 closely enough to validate it.
//! Reference: <https://github.com/opencontainers/runtime-spec/blob/v1.0.0/config.md>
//!
//! Every member decodes with a default, and `null` decodes as empty, so that
//! a missing required member is reported by the presence check instead of
//! failing JSON decoding. Enumerated members (namespace types, seccomp
//! actions, ...) are kept as text; the rule engine parses them against the
//! whitelist tables.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Decode `null` as the member's empty value, the same as an absent member.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// OCI runtime configuration (config.json).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spec {
    /// OCI specification version (`SemVer` 2.0.0 format).
    /// REQUIRED field.
    #[serde(deserialize_with = "nullable")]
    pub oci_version: String,

    /// Target platform of the bundle.
    #[serde(deserialize_with = "nullable")]
    pub platform: Platform,

    /// Container process to run.
    #[serde(deserialize_with = "nullable")]
    pub process: Process,

    /// Container's root filesystem.
    #[serde(deserialize_with = "nullable")]
    pub root: Root,

    /// Container hostname.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub hostname: String,

    /// Additional mounts beyond the root filesystem.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub mounts: Vec<Mount>,

    /// Lifecycle hooks.
    #[serde(deserialize_with = "nullable")]
    pub hooks: Hooks,

    /// Arbitrary metadata annotations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "nullable")]
    pub annotations: BTreeMap<String, String>,

    /// Linux-specific configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<Linux>,
}

impl Spec {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Target platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    /// Operating system (Go `GOOS` naming, e.g. `linux`).
    #[serde(deserialize_with = "nullable")]
    pub os: String,
    /// CPU architecture (Go `GOARCH` naming, e.g. `amd64`).
    #[serde(deserialize_with = "nullable")]
    pub arch: String,
}

/// Container process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Process {
    /// Whether to allocate a terminal.
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "nullable")]
    pub terminal: bool,

    /// Console size (only used if terminal is true).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_size: Option<ConsoleSize>,

    /// User identity the process runs as.
    #[serde(deserialize_with = "nullable")]
    pub user: User,

    /// Command arguments.
    #[serde(deserialize_with = "nullable")]
    pub args: Vec<String>,

    /// Environment variables in `KEY=VALUE` form.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub env: Vec<String>,

    /// Current working directory (must be absolute path).
    #[serde(deserialize_with = "nullable")]
    pub cwd: String,

    /// Linux capabilities.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub capabilities: Vec<String>,

    /// Resource limits (rlimits).
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub rlimits: Vec<Rlimit>,

    /// Prevent gaining new privileges.
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "nullable")]
    pub no_new_privileges: bool,

    /// `AppArmor` profile, looked up under `<rootfs>/etc/apparmor.d`.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub apparmor_profile: String,

    /// `SELinux` label.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub selinux_label: String,
}

/// Console size configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSize {
    /// Height in characters.
    #[serde(deserialize_with = "nullable")]
    pub height: u32,
    /// Width in characters.
    #[serde(deserialize_with = "nullable")]
    pub width: u32,
}

/// User identity configuration (POSIX).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// User ID.
    #[serde(deserialize_with = "nullable")]
    pub uid: u32,
    /// Group ID.
    #[serde(deserialize_with = "nullable")]
    pub gid: u32,
    /// Additional group IDs.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub additional_gids: Vec<u32>,
}

/// Resource limit (rlimit) configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rlimit {
    /// Limit type (e.g., `RLIMIT_NOFILE`).
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub rlimit_type: String,
    /// Hard limit.
    #[serde(deserialize_with = "nullable")]
    pub hard: u64,
    /// Soft limit.
    #[serde(deserialize_with = "nullable")]
    pub soft: u64,
}

/// Root filesystem configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Root {
    /// Path to the root filesystem (relative to bundle path).
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    /// Whether the root filesystem is read-only.
    #[serde(skip_serializing_if = "std::ops::Not::not", deserialize_with = "nullable")]
    pub readonly: bool,
}

/// Mount configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mount {
    /// Mount destination (absolute path in container).
    #[serde(deserialize_with = "nullable")]
    pub destination: String,
    /// Filesystem type.
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub mount_type: String,
    /// Mount source (path or device).
    #[serde(deserialize_with = "nullable")]
    pub source: String,
    /// Mount options.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub options: Vec<String>,
}

/// Container lifecycle hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hooks {
    /// Hooks run after the container is created, before the user process.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub prestart: Vec<Hook>,
    /// Hooks run after the user process starts.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub poststart: Vec<Hook>,
    /// Hooks run after the container process exits.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub poststop: Vec<Hook>,
}

impl Hooks {
    /// Check if any hooks are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prestart.is_empty() && self.poststart.is_empty() && self.poststop.is_empty()
    }
}

/// A single hook entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hook {
    /// Absolute path to the hook executable.
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    /// Arguments passed to the hook (including argv[0]).
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub args: Vec<String>,
    /// Environment variables for the hook.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub env: Vec<String>,
    /// Timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

impl Hook {
    /// Create a new hook with the given path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set hook environment.
    #[must_use]
    pub fn with_env(mut self, env: Vec<String>) -> Self {
        self.env = env;
        self
    }
}

/// Linux-specific container configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Linux {
    /// UID mappings for user namespace.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub uid_mappings: Vec<IdMapping>,

    /// GID mappings for user namespace.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub gid_mappings: Vec<IdMapping>,

    /// Kernel parameters (sysctl).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "nullable")]
    pub sysctl: BTreeMap<String, String>,

    /// Cgroups path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgroups_path: Option<String>,

    /// Namespaces to join or create.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub namespaces: Vec<Namespace>,

    /// Devices to create in container.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub devices: Vec<Device>,

    /// Seccomp configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seccomp: Option<Seccomp>,

    /// Root filesystem propagation mode.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub rootfs_propagation: String,

    /// Paths to mask (make inaccessible).
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub masked_paths: Vec<String>,

    /// Paths to make read-only.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub readonly_paths: Vec<String>,

    /// `SELinux` mount label.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub mount_label: String,
}

/// ID mapping for user namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdMapping {
    /// Starting ID on host.
    #[serde(rename = "hostID", deserialize_with = "nullable")]
    pub host_id: u32,
    /// Starting ID in container.
    #[serde(rename = "containerID", deserialize_with = "nullable")]
    pub container_id: u32,
    /// Number of IDs to map.
    #[serde(deserialize_with = "nullable")]
    pub size: u32,
}

/// Linux namespace configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespace {
    /// Namespace type (`pid`, `network`, ...).
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub ns_type: String,
    /// Path to join existing namespace. Empty means a new namespace.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub path: String,
}

impl Namespace {
    /// Create a namespace entry that asks for a fresh namespace.
    #[must_use]
    pub fn new(ns_type: impl Into<String>) -> Self {
        Self {
            ns_type: ns_type.into(),
            path: String::new(),
        }
    }

    /// Create a namespace entry that joins an existing namespace.
    #[must_use]
    pub fn join(ns_type: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            ns_type: ns_type.into(),
            path: path.into(),
        }
    }

    /// Whether the runtime must create this namespace rather than join one.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.path.is_empty()
    }
}

/// Device configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    /// Device path in container.
    #[serde(deserialize_with = "nullable")]
    pub path: String,
    /// Device type (c, b, u, p).
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub device_type: String,
    /// Major device number.
    #[serde(deserialize_with = "nullable")]
    pub major: i64,
    /// Minor device number.
    #[serde(deserialize_with = "nullable")]
    pub minor: i64,
    /// File mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_mode: Option<u32>,
    /// Owner UID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,
    /// Owner GID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,
}

/// Seccomp configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seccomp {
    /// Default action.
    #[serde(deserialize_with = "nullable")]
    pub default_action: String,
    /// Architectures.
    #[serde(deserialize_with = "nullable")]
    pub architectures: Vec<String>,
    /// Syscall rules.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub syscalls: Vec<Syscall>,
}

/// Seccomp syscall rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Syscall {
    /// Syscall name.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Action to take.
    #[serde(deserialize_with = "nullable")]
    pub action: String,
    /// Argument filters.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable")]
    pub args: Vec<SyscallArg>,
}

/// Seccomp syscall argument filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyscallArg {
    /// Argument index.
    #[serde(deserialize_with = "nullable")]
    pub index: u32,
    /// Value to compare.
    #[serde(deserialize_with = "nullable")]
    pub value: u64,
    /// Secondary value (for masked equality).
    #[serde(deserialize_with = "nullable")]
    pub value_two: u64,
    /// Comparison operator.
    #[serde(deserialize_with = "nullable")]
    pub op: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_spec() {
        let json = r#"{
            "ociVersion": "1.0.0"
        }"#;

        let spec = Spec::from_json(json).unwrap();
        assert_eq!(spec.oci_version, "1.0.0");
        assert!(spec.process.cwd.is_empty());
        assert!(spec.linux.is_none());
        assert!(spec.hooks.is_empty());
    }

    #[test]
    fn test_parse_platform_and_process() {
        let json = r#"{
            "ociVersion": "1.0.0",
            "platform": {"os": "linux", "arch": "amd64"},
            "process": {
                "terminal": true,
                "user": {"uid": 1000, "gid": 1000, "additionalGids": [5, 6]},
                "args": ["sh"],
                "env": ["PATH=/usr/bin", "HOME=/root"],
                "cwd": "/",
                "capabilities": ["CAP_KILL"],
                "rlimits": [{"type": "RLIMIT_NOFILE", "hard": 1024, "soft": 1024}],
                "apparmorProfile": "docker-default"
            }
        }"#;

        let spec = Spec::from_json(json).unwrap();
        assert_eq!(spec.platform.os, "linux");
        assert_eq!(spec.platform.arch, "amd64");
        assert!(spec.process.terminal);
        assert_eq!(spec.process.user.additional_gids, vec![5, 6]);
        assert_eq!(spec.process.env.len(), 2);
        assert_eq!(spec.process.rlimits[0].rlimit_type, "RLIMIT_NOFILE");
        assert_eq!(spec.process.apparmor_profile, "docker-default");
    }

    #[test]
    fn test_parse_linux_section() {
        let json = r#"{
            "ociVersion": "1.0.0",
            "linux": {
                "uidMappings": [{"hostID": 1000, "containerID": 0, "size": 10}],
                "sysctl": {"net.ipv4.ip_forward": "1"},
                "namespaces": [{"type": "network"}, {"type": "ipc", "path": "/proc/1/ns/ipc"}],
                "devices": [{"path": "/dev/null", "type": "c", "major": 1, "minor": 3}],
                "rootfsPropagation": "rslave",
                "seccomp": {
                    "defaultAction": "SCMP_ACT_ERRNO",
                    "architectures": ["SCMP_ARCH_X86_64"],
                    "syscalls": [
                        {"name": "read", "action": "SCMP_ACT_ALLOW",
                         "args": [{"index": 0, "value": 1, "valueTwo": 0, "op": "SCMP_CMP_EQ"}]}
                    ]
                }
            }
        }"#;

        let spec = Spec::from_json(json).unwrap();
        let linux = spec.linux.unwrap();
        assert_eq!(linux.uid_mappings[0].host_id, 1000);
        assert_eq!(linux.uid_mappings[0].size, 10);
        assert_eq!(linux.sysctl.get("net.ipv4.ip_forward"), Some(&"1".to_string()));
        assert!(linux.namespaces[0].is_new());
        assert!(!linux.namespaces[1].is_new());
        assert_eq!(linux.devices[0].major, 1);
        assert_eq!(linux.rootfs_propagation, "rslave");

        let seccomp = linux.seccomp.unwrap();
        assert_eq!(seccomp.default_action, "SCMP_ACT_ERRNO");
        assert_eq!(seccomp.syscalls[0].args[0].op, "SCMP_CMP_EQ");
    }

    #[test]
    fn test_parse_hooks() {
        let json = r#"{
            "hooks": {
                "prestart": [{"path": "/usr/bin/setup", "args": ["setup"], "timeout": 5}],
                "poststop": [{"path": "/usr/bin/cleanup", "env": ["A=b"]}]
            }
        }"#;

        let spec = Spec::from_json(json).unwrap();
        assert_eq!(spec.hooks.prestart.len(), 1);
        assert_eq!(spec.hooks.prestart[0].timeout, Some(5));
        assert!(spec.hooks.poststart.is_empty());
        assert_eq!(spec.hooks.poststop[0].env, vec!["A=b"]);
    }

    #[test]
    fn test_null_members_decode_as_empty() {
        let json = r#"{
            "ociVersion": "1.0.0",
            "hostname": null,
            "mounts": null,
            "hooks": null,
            "process": {"args": null, "cwd": "/", "user": null, "terminal": null},
            "linux": {
                "sysctl": null,
                "seccomp": {"defaultAction": "SCMP_ACT_ALLOW", "architectures": null}
            }
        }"#;

        let spec = Spec::from_json(json).unwrap();
        assert!(spec.hostname.is_empty());
        assert!(spec.mounts.is_empty());
        assert!(spec.hooks.is_empty());
        assert!(spec.process.args.is_empty());
        assert!(!spec.process.terminal);
        assert_eq!(spec.process.cwd, "/");
        let linux = spec.linux.unwrap();
        assert!(linux.sysctl.is_empty());
        assert!(linux.seccomp.unwrap().architectures.is_empty());
    }

    #[test]
    fn test_unknown_enum_values_survive_decoding() {
        let json = r#"{
            "linux": {
                "namespaces": [{"type": "bogus"}],
                "seccomp": {"defaultAction": "SCMP_ACT_NOPE", "architectures": []}
            }
        }"#;

        let spec = Spec::from_json(json).unwrap();
        let linux = spec.linux.unwrap();
        assert_eq!(linux.namespaces[0].ns_type, "bogus");
        assert_eq!(linux.seccomp.unwrap().default_action, "SCMP_ACT_NOPE");
    }

    #[test]
    fn test_serialize_skips_empty_members() {
        let spec = Spec {
            oci_version: "1.0.0".to_string(),
            ..Spec::default()
        };
        let json = serde_json::to_string_pretty(&spec).unwrap();
        assert!(!json.contains("hostname"));
        assert!(!json.contains("linux"));
        assert!(json.contains("ociVersion"));
    }
}
