//! Tests for the configuration schema engine.

mod errors_tests;
mod proptest;

use crate::schema::validator::ConfigValidator;
use crate::version::SolrVersion;

/// Validator against a library version that still allows legacy options.
pub(crate) fn legacy_validator() -> ConfigValidator {
    ConfigValidator::new(SolrVersion::new(5, 3, 0))
}

/// Validator against the first library version that dropped legacy options.
pub(crate) fn modern_validator() -> ConfigValidator {
    ConfigValidator::new(SolrVersion::new(6, 0, 0))
}
