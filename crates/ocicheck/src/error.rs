//! Error types for bundle validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::rules::Violation;

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that can occur while loading or validating a bundle.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Bundle path was empty.
    #[error("bundle path shouldn't be empty")]
    BundlePathEmpty,

    /// Bundle not found.
    #[error("bundle not found: {0}")]
    BundleNotFound(PathBuf),

    /// Config file not found in bundle.
    #[error("config.json not found in bundle: {0}")]
    ConfigNotFound(PathBuf),

    /// Config file is not valid UTF-8.
    #[error("{0:?} is not encoded in UTF-8")]
    NotUtf8(PathBuf),

    /// Root filesystem referenced by the config does not exist.
    #[error("cannot find the root path {0:?}")]
    RootNotFound(PathBuf),

    /// Root filesystem referenced by the config is not a directory.
    #[error("the root path {0:?} is not a directory")]
    RootNotDirectory(PathBuf),

    /// One or more mandatory fields are absent or empty.
    #[error("mandatory information missing: {}", .0.join(" "))]
    MissingFields(Vec<String>),

    /// A semantic rule was violated.
    #[error(transparent)]
    Violation(#[from] Violation),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Returns the missing field messages for a presence failure.
    #[must_use]
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            Self::MissingFields(messages) => Some(messages),
            _ => None,
        }
    }

    /// Returns the violated rule for a semantic failure.
    #[must_use]
    pub const fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Violation(violation) => Some(violation),
            _ => None,
        }
    }
}
