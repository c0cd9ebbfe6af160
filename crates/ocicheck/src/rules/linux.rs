//! Linux section checks: ID mappings, namespaces, sysctl, hostname,
//! devices and rootfs propagation.

use std::collections::HashSet;

use super::{seccomp, Violation, MAX_ID_MAPPINGS};
use crate::config::{Device, Linux, Namespace, Spec};
use crate::whitelist::{NamespaceType, Propagation};

const NET_SYSCTL_PREFIX: &str = "net.";
const MQUEUE_SYSCTL_PREFIX: &str = "fs.mqueue.";

/// Namespace kinds the container creates rather than joins.
#[derive(Debug, Default)]
struct NewNamespaces(HashSet<NamespaceType>);

impl NewNamespaces {
    fn collect(namespaces: &[Namespace]) -> Result<Self, Violation> {
        let mut created = HashSet::new();
        for namespace in namespaces {
            let kind = NamespaceType::parse(&namespace.ns_type)
                .ok_or_else(|| Violation::InvalidNamespace(namespace.ns_type.clone()))?;
            if namespace.is_new() {
                created.insert(kind);
            }
        }
        Ok(Self(created))
    }

    fn has(&self, kind: NamespaceType) -> bool {
        self.0.contains(&kind)
    }
}

/// Check the Linux section. An absent section is checked as an empty one so
/// that the hostname rule still applies.
pub fn check(spec: &Spec) -> Result<(), Violation> {
    let default = Linux::default();
    let linux = spec.linux.as_ref().unwrap_or(&default);

    if linux.uid_mappings.len() > MAX_ID_MAPPINGS {
        return Err(Violation::TooManyIdMappings {
            kind: "UID",
            count: linux.uid_mappings.len(),
        });
    }
    if linux.gid_mappings.len() > MAX_ID_MAPPINGS {
        return Err(Violation::TooManyIdMappings {
            kind: "GID",
            count: linux.gid_mappings.len(),
        });
    }

    let created = NewNamespaces::collect(&linux.namespaces)?;

    for key in linux.sysctl.keys() {
        if key.starts_with(NET_SYSCTL_PREFIX) && !created.has(NamespaceType::Network) {
            return Err(Violation::SysctlNeedsNetwork(key.clone()));
        }
        if key.starts_with(MQUEUE_SYSCTL_PREFIX)
            && !(created.has(NamespaceType::Ipc) && created.has(NamespaceType::Mount))
        {
            return Err(Violation::SysctlNeedsIpcAndMount(key.clone()));
        }
    }

    if spec.platform.os == "linux" && !spec.hostname.is_empty() && !created.has(NamespaceType::Uts)
    {
        return Err(Violation::HostnameNeedsUts);
    }

    if let Some(device) = linux.devices.iter().find(|d| !device_valid(d)) {
        return Err(Violation::InvalidDevice {
            path: device.path.clone(),
            device_type: device.device_type.clone(),
            major: device.major,
            minor: device.minor,
        });
    }

    if !linux.rootfs_propagation.is_empty()
        && Propagation::parse(&linux.rootfs_propagation).is_none()
    {
        return Err(Violation::InvalidRootfsPropagation(
            linux.rootfs_propagation.clone(),
        ));
    }

    if let Some(filter) = &linux.seccomp {
        seccomp::check(filter)?;
    }

    Ok(())
}

/// Whether the device type and numbers are consistent.
///
/// Block and character devices accept any numbers, unbuffered character
/// devices need positive numbers and FIFOs need `0:0`.
#[must_use]
pub fn device_valid(device: &Device) -> bool {
    match device.device_type.as_str() {
        "b" | "c" => true,
        "u" => device.major > 0 && device.minor > 0,
        "p" => device.major == 0 && device.minor == 0,
        _ => false,
    }
}
