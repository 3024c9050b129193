//! Error types for configuration validation.
//!
//! Every error carries a [`ConfigPath`] pointing at the offending node of the
//! configuration document, plus a human-readable message. The taxonomy is
//! deliberately small:
//!
//! - [`ConfigError::MutualExclusion`]: two options that exclude each other are
//!   both set (`adapter_timeout`/`adapter_service`, `plugin_class`/`plugin_service`)
//! - [`ConfigError::EmptyCollection`]: a collection that must not be empty is
//!   empty (load balancer enabled without endpoints)
//! - [`ConfigError::IncompatibleVersion`]: a legacy option used against a
//!   library version that no longer supports it
//! - [`ConfigError::MalformedValue`]: a value fails its basic type or shape
//!   expectation
//!
//! Deprecated-but-still-working options are reported out of band as
//! [`DeprecationNotice`] values; they never abort validation.

use std::fmt;
use thiserror::Error;

/// Path to a node in the configuration document.
///
/// Rendered dot-separated, e.g. `clients.default.load_balancer`. An empty
/// path refers to the document root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended with one segment.
    pub fn key(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

impl From<&str> for ConfigPath {
    fn from(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }
}

/// Severity of a reported condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Fatal to the configuration; validation fails.
    #[default]
    Error,
    /// Advisory only; validation still succeeds.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// A validation failure, carrying the offending path and a precise reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two mutually exclusive options are both set.
    #[error("Mutually exclusive options at '{path}': {message}")]
    MutualExclusion {
        /// The option that was set first in schema order.
        first: String,
        /// The conflicting option.
        second: String,
        message: String,
        path: ConfigPath,
    },

    /// A collection that must contain at least one entry is empty.
    #[error("Empty collection at '{path}': {message}")]
    EmptyCollection { message: String, path: ConfigPath },

    /// A legacy option was used against a library version that dropped it.
    #[error("Incompatible option at '{path}': {message}")]
    IncompatibleVersion {
        /// Name of the legacy option.
        option: String,
        /// Major library version that removed the option.
        since_major: u64,
        message: String,
        path: ConfigPath,
    },

    /// A value fails its basic type or shape expectation.
    #[error("Malformed value at '{path}': {message}")]
    MalformedValue { message: String, path: ConfigPath },
}

impl ConfigError {
    /// Creates a new MutualExclusion error.
    pub fn mutual_exclusion(
        path: ConfigPath,
        first: impl Into<String>,
        second: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MutualExclusion {
            first: first.into(),
            second: second.into(),
            message: message.into(),
            path,
        }
    }

    /// Creates a new EmptyCollection error.
    pub fn empty_collection(path: ConfigPath, message: impl Into<String>) -> Self {
        Self::EmptyCollection {
            message: message.into(),
            path,
        }
    }

    /// Creates a new IncompatibleVersion error.
    pub fn incompatible_version(
        path: ConfigPath,
        option: impl Into<String>,
        since_major: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::IncompatibleVersion {
            option: option.into(),
            since_major,
            message: message.into(),
            path,
        }
    }

    /// Creates a new MalformedValue error with a free-form message.
    pub fn malformed_value(path: ConfigPath, message: impl Into<String>) -> Self {
        Self::MalformedValue {
            message: message.into(),
            path,
        }
    }

    /// Creates a MalformedValue error for a type mismatch.
    pub fn invalid_type(
        path: ConfigPath,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::MalformedValue {
            message: format!("expected {}, found {}", expected, actual),
            path,
        }
    }

    /// Creates a MalformedValue error for an unrecognized option.
    pub fn unrecognized_option(path: ConfigPath, option: impl fmt::Display) -> Self {
        Self::MalformedValue {
            message: format!("unrecognized option '{}'", option),
            path,
        }
    }

    /// The path of the offending configuration node.
    pub fn path(&self) -> &ConfigPath {
        match self {
            Self::MutualExclusion { path, .. }
            | Self::EmptyCollection { path, .. }
            | Self::IncompatibleVersion { path, .. }
            | Self::MalformedValue { path, .. } => path,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Stable code for this error, usable in operator-facing output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MutualExclusion { .. } => "CONFIG_0001",
            Self::EmptyCollection { .. } => "CONFIG_0002",
            Self::IncompatibleVersion { .. } => "CONFIG_0003",
            Self::MalformedValue { .. } => "CONFIG_0004",
        }
    }
}

/// A non-fatal advisory that a configuration option will be removed.
///
/// Notices are collected during validation and surfaced to the operator; they
/// never affect the validation outcome on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    /// Package that declared the deprecation.
    pub package: &'static str,
    /// Package version that introduced the deprecation.
    pub since: &'static str,
    pub message: String,
    pub path: ConfigPath,
}

impl DeprecationNotice {
    pub fn new(path: ConfigPath, since: &'static str, message: impl Into<String>) -> Self {
        Self {
            package: env!("CARGO_PKG_NAME"),
            since,
            message: message.into(),
            path,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Warning
    }
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Since {} {}: {} (at '{}')",
            self.package, self.since, self.message, self.path
        )
    }
}
