//! Host filesystem probes used by the rule engine.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Registry of filesystem types known to the running kernel.
pub const PROC_FILESYSTEMS: &str = "/proc/filesystems";

/// Read-only view of the host consulted by filesystem-backed checks.
pub trait HostProbe {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` exists and has at least one executable permission bit.
    fn is_executable(&self, path: &Path) -> io::Result<bool>;

    /// Filesystem types registered with the host kernel.
    fn filesystems(&self) -> io::Result<Vec<String>>;
}

/// Probes the local machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHost;

impl HostProbe for LocalHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> io::Result<bool> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = std::fs::metadata(path)?;
        Ok(metadata.permissions().mode() & 0o111 != 0)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> io::Result<bool> {
        std::fs::metadata(path).map(|_| true)
    }

    fn filesystems(&self) -> io::Result<Vec<String>> {
        let file = File::open(PROC_FILESYSTEMS)?;
        parse_filesystems(BufReader::new(file))
    }
}

/// Parse the `/proc/filesystems` format.
///
/// Each line is `[nodev]\t<type>`; the type is the second TAB-separated
/// column when there is one and the whole line otherwise.
pub fn parse_filesystems<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut types = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split('\t');
        let first = parts.next().unwrap_or_default();
        let fs_type = parts.next().unwrap_or(first);
        types.push(fs_type.to_string());
    }
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filesystems() {
        let registry = "nodev\tsysfs\nnodev\ttmpfs\n\text4\nbtrfs\n";
        let types = parse_filesystems(registry.as_bytes()).unwrap();
        assert_eq!(types, vec!["sysfs", "tmpfs", "ext4", "btrfs"]);
    }

    #[test]
    fn test_parse_filesystems_empty() {
        let types = parse_filesystems(&b""[..]).unwrap();
        assert!(types.is_empty());
    }

    #[test]
    fn test_local_host_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LocalHost.exists(dir.path()));
        assert!(!LocalHost.exists(&dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_local_host_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("hook.sh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!LocalHost.is_executable(&script).unwrap());

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o744)).unwrap();
        assert!(LocalHost.is_executable(&script).unwrap());

        assert!(LocalHost.is_executable(&dir.path().join("missing")).is_err());
    }
}
