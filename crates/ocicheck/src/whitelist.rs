//! Static whitelist tables.
//!
//! Everything here is immutable process-lifetime data: the supported spec
//! version, OS/architecture combinations, capability and rlimit names, and
//! the closed enumerations used by namespaces, seccomp and mount propagation.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// The one runtime-spec version this validator understands.
pub const SUPPORTED_VERSION: &str = "1.0.0";

/// Supported operating systems and the architectures valid for each.
pub const PLATFORMS: &[(&str, &[&str])] = &[
    ("darwin", &["386", "amd64", "arm", "arm64"]),
    ("dragonfly", &["amd64"]),
    ("freebsd", &["386", "amd64", "arm"]),
    (
        "linux",
        &["386", "amd64", "arm", "arm64", "ppc64", "ppc64le", "mips64", "mips64le"],
    ),
    ("netbsd", &["386", "amd64", "arm"]),
    ("openbsd", &["386", "amd64", "arm"]),
    ("plan9", &["386", "amd64"]),
    ("solaris", &["amd64"]),
    ("windows", &["386", "amd64"]),
];

/// Architectures valid for `os`, or `None` if the OS is not supported.
#[must_use]
pub fn platform_arches(os: &str) -> Option<&'static [&'static str]> {
    PLATFORMS
        .iter()
        .find(|(name, _)| *name == os)
        .map(|(_, arches)| *arches)
}

/// Linux capability names, see capabilities(7).
pub const CAPABILITIES: &[&str] = &[
    "CAP_CHOWN",
    "CAP_DAC_OVERRIDE",
    "CAP_DAC_READ_SEARCH",
    "CAP_FOWNER",
    "CAP_FSETID",
    "CAP_KILL",
    "CAP_SETGID",
    "CAP_SETUID",
    "CAP_SETPCAP",
    "CAP_LINUX_IMMUTABLE",
    "CAP_NET_BIND_SERVICE",
    "CAP_NET_BROADCAST",
    "CAP_NET_ADMIN",
    "CAP_NET_RAW",
    "CAP_IPC_LOCK",
    "CAP_IPC_OWNER",
    "CAP_SYS_MODULE",
    "CAP_SYS_RAWIO",
    "CAP_SYS_CHROOT",
    "CAP_SYS_PTRACE",
    "CAP_SYS_PACCT",
    "CAP_SYS_ADMIN",
    "CAP_SYS_BOOT",
    "CAP_SYS_NICE",
    "CAP_SYS_RESOURCE",
    "CAP_SYS_TIME",
    "CAP_SYS_TTY_CONFIG",
    "CAP_MKNOD",
    "CAP_LEASE",
    "CAP_AUDIT_WRITE",
    "CAP_AUDIT_CONTROL",
    "CAP_SETFCAP",
    "CAP_MAC_OVERRIDE",
    "CAP_MAC_ADMIN",
    "CAP_SYSLOG",
    "CAP_WAKE_ALARM",
    "CAP_BLOCK_SUSPEND",
    "CAP_AUDIT_READ",
    "CAP_PERFMON",
    "CAP_BPF",
    "CAP_CHECKPOINT_RESTORE",
];

static CAPABILITY_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CAPABILITIES.iter().copied().collect());

/// Whether `name` is a known capability.
#[must_use]
pub fn is_capability(name: &str) -> bool {
    CAPABILITY_SET.contains(name)
}

/// POSIX rlimit type names.
pub const RLIMITS: &[&str] = &[
    "RLIMIT_CPU",
    "RLIMIT_FSIZE",
    "RLIMIT_DATA",
    "RLIMIT_STACK",
    "RLIMIT_CORE",
    "RLIMIT_RSS",
    "RLIMIT_NPROC",
    "RLIMIT_NOFILE",
    "RLIMIT_MEMLOCK",
    "RLIMIT_AS",
    "RLIMIT_LOCKS",
    "RLIMIT_SIGPENDING",
    "RLIMIT_MSGQUEUE",
    "RLIMIT_NICE",
    "RLIMIT_RTPRIO",
    "RLIMIT_RTTIME",
];

/// Whether `name` is a known rlimit type.
#[must_use]
pub fn is_rlimit(name: &str) -> bool {
    RLIMITS.contains(&name)
}

/// Mount type accepted for Windows targets.
pub const WINDOWS_MOUNT_TYPE: &str = "ntfs";

/// Synthetic mount type always accepted on Linux.
pub const BIND_MOUNT_TYPE: &str = "bind";

/// Defines a closed enumeration with its wire names.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Parse a wire name.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Wire name of this member.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Linux namespace types.
    pub enum NamespaceType {
        /// PID namespace.
        Pid => "pid",
        /// Network namespace.
        Network => "network",
        /// Mount namespace.
        Mount => "mount",
        /// IPC namespace.
        Ipc => "ipc",
        /// UTS namespace.
        Uts => "uts",
        /// User namespace.
        User => "user",
        /// Cgroup namespace.
        Cgroup => "cgroup",
    }
}

wire_enum! {
    /// Seccomp filter actions.
    pub enum SeccompAction {
        Kill => "SCMP_ACT_KILL",
        Trap => "SCMP_ACT_TRAP",
        Errno => "SCMP_ACT_ERRNO",
        Trace => "SCMP_ACT_TRACE",
        Allow => "SCMP_ACT_ALLOW",
    }
}

wire_enum! {
    /// Seccomp filter architectures.
    pub enum SeccompArch {
        X86 => "SCMP_ARCH_X86",
        Amd64 => "SCMP_ARCH_X86_64",
        X32 => "SCMP_ARCH_X32",
        Arm => "SCMP_ARCH_ARM",
        Aarch64 => "SCMP_ARCH_AARCH64",
        Mips => "SCMP_ARCH_MIPS",
        Mips64 => "SCMP_ARCH_MIPS64",
        Mips64N32 => "SCMP_ARCH_MIPS64N32",
        Mipsel => "SCMP_ARCH_MIPSEL",
        Mipsel64 => "SCMP_ARCH_MIPSEL64",
        Mipsel64N32 => "SCMP_ARCH_MIPSEL64N32",
        Ppc => "SCMP_ARCH_PPC",
        Ppc64 => "SCMP_ARCH_PPC64",
        Ppc64Le => "SCMP_ARCH_PPC64LE",
        S390 => "SCMP_ARCH_S390",
        S390X => "SCMP_ARCH_S390X",
    }
}

wire_enum! {
    /// Seccomp argument comparison operators.
    pub enum SeccompOperator {
        NotEqual => "SCMP_CMP_NE",
        LessThan => "SCMP_CMP_LT",
        LessEqual => "SCMP_CMP_LE",
        EqualTo => "SCMP_CMP_EQ",
        GreaterEqual => "SCMP_CMP_GE",
        GreaterThan => "SCMP_CMP_GT",
        MaskedEqual => "SCMP_CMP_MASKED_EQ",
    }
}

wire_enum! {
    /// Root filesystem mount propagation modes.
    pub enum Propagation {
        Private => "private",
        Rprivate => "rprivate",
        Slave => "slave",
        Rslave => "rslave",
        Shared => "shared",
        Rshared => "rshared",
    }
}
