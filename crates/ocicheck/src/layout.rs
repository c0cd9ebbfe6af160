//! Declared member layout of every configuration entity.
//!
//! Members without `.optional()` are mandatory in the runtime-spec 1.0.0
//! document; everything else may be omitted.

use crate::config::{
    ConsoleSize, Device, Hook, Hooks, IdMapping, Linux, Mount, Namespace, Platform, Process,
    Rlimit, Root, Seccomp, Spec, Syscall, SyscallArg, User,
};
use crate::schema::{Field, Schema};

impl Schema for Spec {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("ociVersion", &self.oci_version),
            Field::record("platform", &self.platform),
            Field::record("process", &self.process),
            Field::record("root", &self.root),
            Field::text("hostname", &self.hostname).optional(),
            Field::records("mounts", &self.mounts).optional(),
            Field::record("hooks", &self.hooks),
            Field::map("annotations", &self.annotations).optional(),
            Field::handle("linux", self.linux.as_ref()).optional(),
        ]
    }
}

impl Schema for Platform {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::text("os", &self.os), Field::text("arch", &self.arch)]
    }
}

impl Schema for Process {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("terminal"),
            Field::handle("consoleSize", self.console_size.as_ref()).optional(),
            Field::record("user", &self.user),
            Field::list("args", &self.args),
            Field::list("env", &self.env).optional(),
            Field::text("cwd", &self.cwd),
            Field::list("capabilities", &self.capabilities).optional(),
            Field::records("rlimits", &self.rlimits).optional(),
            Field::scalar("noNewPrivileges"),
            Field::text("apparmorProfile", &self.apparmor_profile).optional(),
            Field::text("selinuxLabel", &self.selinux_label).optional(),
        ]
    }
}

impl Schema for ConsoleSize {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::scalar("height"), Field::scalar("width")]
    }
}

impl Schema for User {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("uid"),
            Field::scalar("gid"),
            Field::list("additionalGids", &self.additional_gids).optional(),
        ]
    }
}

impl Schema for Rlimit {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("type", &self.rlimit_type),
            Field::scalar("hard"),
            Field::scalar("soft"),
        ]
    }
}

impl Schema for Root {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::text("path", &self.path), Field::scalar("readonly")]
    }
}

impl Schema for Mount {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("destination", &self.destination),
            Field::text("type", &self.mount_type),
            Field::text("source", &self.source),
            Field::list("options", &self.options).optional(),
        ]
    }
}

impl Schema for Hooks {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::records("prestart", &self.prestart).optional(),
            Field::records("poststart", &self.poststart).optional(),
            Field::records("poststop", &self.poststop).optional(),
        ]
    }
}

impl Schema for Hook {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("path", &self.path),
            Field::list("args", &self.args).optional(),
            Field::list("env", &self.env).optional(),
            Field::scalar("timeout"),
        ]
    }
}

impl Schema for Linux {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::records("uidMappings", &self.uid_mappings).optional(),
            Field::records("gidMappings", &self.gid_mappings).optional(),
            Field::map("sysctl", &self.sysctl).optional(),
            Field::text("cgroupsPath", self.cgroups_path.as_deref().unwrap_or_default())
                .optional(),
            Field::records("namespaces", &self.namespaces).optional(),
            Field::records("devices", &self.devices).optional(),
            Field::handle("seccomp", self.seccomp.as_ref()).optional(),
            Field::text("rootfsPropagation", &self.rootfs_propagation).optional(),
            Field::list("maskedPaths", &self.masked_paths).optional(),
            Field::list("readonlyPaths", &self.readonly_paths).optional(),
            Field::text("mountLabel", &self.mount_label).optional(),
        ]
    }
}

impl Schema for IdMapping {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("hostID"),
            Field::scalar("containerID"),
            Field::scalar("size"),
        ]
    }
}

impl Schema for Namespace {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("type", &self.ns_type),
            Field::text("path", &self.path).optional(),
        ]
    }
}

impl Schema for Device {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("path", &self.path),
            Field::text("type", &self.device_type),
            Field::scalar("major"),
            Field::scalar("minor"),
            Field::scalar("fileMode"),
            Field::scalar("uid"),
            Field::scalar("gid"),
        ]
    }
}

impl Schema for Seccomp {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("defaultAction", &self.default_action),
            Field::list("architectures", &self.architectures),
            Field::records("syscalls", &self.syscalls).optional(),
        ]
    }
}

impl Schema for Syscall {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("name", &self.name),
            Field::text("action", &self.action),
            Field::records("args", &self.args).optional(),
        ]
    }
}

impl Schema for SyscallArg {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::scalar("index"),
            Field::scalar("value"),
            Field::scalar("valueTwo"),
            Field::text("op", &self.op),
        ]
    }
}
