//! # ocicheck
//!
//! Pre-flight validation of OCI runtime bundles.
//!
//! This crate checks a runtime-spec 1.0.0 `config.json` before a runtime
//! tries to launch a container from it:
//!
//! - Mandatory members are present (every missing member is reported)
//! - Platform, capabilities, rlimits and seccomp values are whitelisted
//! - Namespace prerequisites for sysctl and hostname hold
//! - Devices, mounts and hooks are consistent with the target
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Bundle                      │
//! │        config.json + root filesystem          │
//! └──────────────────────────────────────────────┘
//!                        │ Spec
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │                  Validator                    │
//! │  ┌──────────────────┐  ┌──────────────────┐  │
//! │  │  schema::check   │─▶│    rules::run    │  │
//! │  │  (aggregating)   │  │   (fail-fast)    │  │
//! │  └──────────────────┘  └──────────────────┘  │
//! │                                 │             │
//! │                                 ▼             │
//! │                           HostProbe           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use ocicheck::Bundle;
//!
//! let bundle = Bundle::load("/path/to/bundle")?;
//! let report = bundle.validate(false)?;
//! for advisory in &report.advisories {
//!     println!("{advisory}");
//! }
//! ```

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod bundle;
pub mod config;
pub mod error;
pub mod layout;
pub mod probe;
pub mod rules;
pub mod schema;
pub mod validate;
pub mod whitelist;

pub use bundle::Bundle;
pub use config::Spec;
pub use error::{CheckError, Result};
pub use probe::{HostProbe, LocalHost};
pub use rules::{Advisory, HookPhase, Violation};
pub use validate::{Report, Validator};
