//! Version descriptor for the wrapped Solr client library.
//!
//! The validator does not probe the installed library at validation time.
//! Instead the caller resolves the library version once and injects a
//! [`SolrVersion`] into the validator, which uses it to decide whether legacy
//! configuration options are merely deprecated or no longer supported at all.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First major version of the wrapped client library that dropped support for
/// the legacy adapter options (`adapter_class` on clients, `timeout` on
/// endpoints).
pub const LEGACY_BREAK_MAJOR: u64 = 6;

/// Error raised when a version string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,

    #[error("invalid version component '{0}': expected an unsigned integer")]
    InvalidComponent(String),

    #[error("too many version components in '{0}': expected at most major.minor.patch")]
    TooManyComponents(String),
}

/// Semantic version of the installed search-client library.
///
/// Missing components default to zero, so `"5"` parses the same as `"5.0.0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolrVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SolrVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether the library still accepts the legacy adapter options.
    ///
    /// Below the breaking major version these options work but are
    /// deprecated; from the breaking version on they are hard errors.
    pub fn supports_legacy_adapters(&self) -> bool {
        self.major < LEGACY_BREAK_MAJOR
    }
}

impl fmt::Display for SolrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SolrVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut components = [0u64; 3];
        let mut count = 0;
        for part in s.split('.') {
            if count == 3 {
                return Err(VersionParseError::TooManyComponents(s.to_string()));
            }
            components[count] = part
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent(part.to_string()))?;
            count += 1;
        }

        Ok(Self::new(components[0], components[1], components[2]))
    }
}
