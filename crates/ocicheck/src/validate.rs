//! Validation driver.
//!
//! Runs the presence check over the whole configuration first. Any missing
//! member fails the run with the complete list of messages and the semantic
//! rules are skipped. Otherwise the rules run in order and the first
//! violation fails the run.

use std::path::PathBuf;

use tracing::debug;

use crate::config::Spec;
use crate::error::{CheckError, Result};
use crate::probe::{HostProbe, LocalHost};
use crate::rules::{self, Advisories, Advisory, Context};
use crate::schema;

/// Label of the configuration root in presence messages.
pub const ROOT_LABEL: &str = "spec";

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Non-fatal findings raised while checking.
    pub advisories: Vec<Advisory>,
}

/// Validates configurations against a root filesystem and host.
#[derive(Debug)]
pub struct Validator<P = LocalHost> {
    rootfs: PathBuf,
    host_specific: bool,
    probe: P,
}

impl Validator {
    /// Create a validator that probes the local machine.
    pub fn new(rootfs: impl Into<PathBuf>, host_specific: bool) -> Self {
        Self::with_probe(rootfs, host_specific, LocalHost)
    }
}

impl<P: HostProbe> Validator<P> {
    /// Create a validator with a custom host probe.
    pub fn with_probe(rootfs: impl Into<PathBuf>, host_specific: bool, probe: P) -> Self {
        Self {
            rootfs: rootfs.into(),
            host_specific,
            probe,
        }
    }

    /// Validate `spec`.
    ///
    /// Returns [`CheckError::MissingFields`] with every presence message, or
    /// [`CheckError::Violation`] with the first violated rule.
    pub fn validate(&self, spec: &Spec) -> Result<Report> {
        debug!("checking mandatory fields");
        let presence = schema::check(spec, ROOT_LABEL);
        if !presence.is_valid() {
            return Err(CheckError::MissingFields(presence.messages));
        }

        let ctx = Context {
            rootfs: &self.rootfs,
            host_specific: self.host_specific,
            probe: &self.probe,
        };
        let mut advisories = Advisories::default();
        rules::run(spec, ctx, &mut advisories)?;

        Ok(Report {
            advisories: advisories.into_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::{Linux, Namespace};
    use crate::rules::testing::FakeHost;
    use crate::rules::Violation;

    fn spec() -> Spec {
        Spec::from_json(
            r#"{
                "ociVersion": "1.0.0",
                "platform": {"os": "linux", "arch": "amd64"},
                "process": {"args": ["sh"], "cwd": "/", "env": ["PATH=/bin"]},
                "root": {"path": "rootfs"},
                "mounts": [{"destination": "/proc", "type": "proc", "source": "proc"}]
            }"#,
        )
        .unwrap()
    }

    fn validator(host_specific: bool) -> Validator<FakeHost> {
        let host = FakeHost::default().with_filesystems(&["proc", "tmpfs"]);
        Validator::with_probe("/bundle/rootfs", host_specific, host)
    }

    #[test]
    fn test_valid_spec() {
        let report = validator(true).validate(&spec()).unwrap();
        assert!(report.advisories.is_empty());
    }

    #[test]
    fn test_skipped_mount_check_is_reported() {
        let report = validator(false).validate(&spec()).unwrap();
        assert_eq!(report.advisories, vec![Advisory::MountTypesNeedHost]);
    }

    #[test]
    fn test_presence_failure_skips_rules() {
        let mut spec = spec();
        spec.process.cwd.clear();
        // Would also violate the version rule if rules ran.
        spec.oci_version = "9.9.9".to_string();

        let err = validator(false).validate(&spec).unwrap_err();
        assert_eq!(
            err.missing_fields().unwrap(),
            ["spec.process.cwd should not be empty."]
        );
        assert_eq!(
            err.to_string(),
            "mandatory information missing: spec.process.cwd should not be empty."
        );
    }

    #[test]
    fn test_presence_failures_are_aggregated() {
        let mut spec = spec();
        spec.platform.arch.clear();
        spec.root.path.clear();
        let err = validator(false).validate(&spec).unwrap_err();
        assert_eq!(err.missing_fields().unwrap().len(), 2);
    }

    #[test]
    fn test_first_violation_is_reported() {
        let mut spec = spec();
        spec.hostname = "myhost".to_string();
        spec.process.capabilities = vec!["CAP_NOPE".to_string()];

        let err = validator(false).validate(&spec).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&Violation::InvalidCapability("CAP_NOPE".to_string()))
        );
    }

    #[test]
    fn test_hostname_needs_uts() {
        let mut spec = spec();
        spec.hostname = "myhost".to_string();
        let err = validator(false).validate(&spec).unwrap_err();
        assert_eq!(err.violation(), Some(&Violation::HostnameNeedsUts));

        spec.linux = Some(Linux {
            namespaces: vec![Namespace::new("uts")],
            ..Linux::default()
        });
        assert!(validator(false).validate(&spec).is_ok());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut config = spec();
        let mut linux = Linux::default();
        linux.sysctl.insert("net.core.somaxconn".to_string(), "1024".to_string());
        linux.sysctl.insert("net.ipv4.ip_forward".to_string(), "1".to_string());
        config.linux = Some(linux);

        let v = validator(true);
        let first = v.validate(&config).unwrap_err().to_string();
        let second = v.validate(&config).unwrap_err().to_string();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "sysctl net.core.somaxconn requires a new Network namespace to be specified as well"
        );

        let v = validator(false);
        assert_eq!(v.validate(&spec()).unwrap(), v.validate(&spec()).unwrap());
    }

    #[test]
    fn test_new_validator() {
        let v = Validator::new("/srv/rootfs", true);
        assert_eq!(v.rootfs, Path::new("/srv/rootfs"));
        assert!(v.host_specific);
    }
}
