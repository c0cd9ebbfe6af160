//! Seccomp filter checks.

use super::Violation;
use crate::config::Seccomp;
use crate::whitelist::{SeccompAction, SeccompArch, SeccompOperator};

fn action_valid(action: &str) -> bool {
    action.is_empty() || SeccompAction::parse(action).is_some()
}

/// Check actions, argument operators and architectures.
///
/// Empty actions are accepted here; whether they are mandatory is decided by
/// the presence check.
pub fn check(filter: &Seccomp) -> Result<(), Violation> {
    if !action_valid(&filter.default_action) {
        return Err(Violation::InvalidSeccompDefaultAction(
            filter.default_action.clone(),
        ));
    }

    for syscall in &filter.syscalls {
        if !action_valid(&syscall.action) {
            return Err(Violation::InvalidSyscallAction {
                name: syscall.name.clone(),
                action: syscall.action.clone(),
            });
        }
        if let Some(arg) = syscall
            .args
            .iter()
            .find(|arg| SeccompOperator::parse(&arg.op).is_none())
        {
            return Err(Violation::InvalidSyscallOperator {
                name: syscall.name.clone(),
                op: arg.op.clone(),
            });
        }
    }

    match filter
        .architectures
        .iter()
        .find(|arch| SeccompArch::parse(arch).is_none())
    {
        Some(arch) => Err(Violation::InvalidSeccompArch(arch.clone())),
        None => Ok(()),
    }
}
