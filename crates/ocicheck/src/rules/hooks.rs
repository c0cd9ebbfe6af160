//! Lifecycle hook checks.

use std::fmt;
use std::path::Path;

use super::{env_valid, Advisories, Context, Violation};
use crate::config::{Hook, Hooks};

/// Lifecycle phase a hook runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    /// After the container is created, before the user process starts.
    Prestart,
    /// After the user process starts.
    Poststart,
    /// After the container is deleted.
    Poststop,
}

impl HookPhase {
    /// Every phase, in execution order.
    pub const ALL: [Self; 3] = [Self::Prestart, Self::Poststart, Self::Poststop];

    /// Returns the phase name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prestart => "pre-start",
            Self::Poststart => "post-start",
            Self::Poststop => "post-stop",
        }
    }

    /// Hooks configured for this phase.
    #[must_use]
    pub fn hooks<'a>(&self, hooks: &'a Hooks) -> &'a [Hook] {
        match self {
            Self::Prestart => &hooks.prestart,
            Self::Poststart => &hooks.poststart,
            Self::Poststop => &hooks.poststop,
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check every hook of every phase in execution order.
pub fn check(
    hooks: &Hooks,
    ctx: Context<'_>,
    advisories: &mut Advisories,
) -> Result<(), Violation> {
    for phase in HookPhase::ALL {
        for hook in phase.hooks(hooks) {
            check_hook(phase, hook, ctx, advisories)?;
        }
    }
    Ok(())
}

fn check_hook(
    phase: HookPhase,
    hook: &Hook,
    ctx: Context<'_>,
    advisories: &mut Advisories,
) -> Result<(), Violation> {
    let path = Path::new(&hook.path);
    if !path.is_absolute() {
        return Err(Violation::RelativeHookPath {
            phase,
            path: hook.path.clone(),
        });
    }

    if ctx.host_specific {
        match ctx.probe.is_executable(path) {
            Err(_) => {
                return Err(Violation::HookNotFound {
                    phase,
                    path: hook.path.clone(),
                })
            }
            Ok(false) => {
                return Err(Violation::HookNotExecutable {
                    phase,
                    path: hook.path.clone(),
                })
            }
            Ok(true) => {}
        }
    }

    match hook.env.iter().find(|env| !env_valid(env, advisories)) {
        Some(env) => Err(Violation::InvalidHookEnv {
            path: hook.path.clone(),
            env: env.clone(),
        }),
        None => Ok(()),
    }
}
