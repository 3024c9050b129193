//! Configuration schema and validation for the Solr client integration layer.
//!
//! The crate turns a raw, JSON-like configuration document describing
//! endpoints, clients, a load balancer, and plugins into a canonical, typed
//! [`CanonicalConfig`]: defaults are applied, shorthand forms normalized,
//! cross-field constraints enforced, and legacy options gated on the
//! injected [`SolrVersion`] of the wrapped client library. Container wiring
//! consumes the canonical configuration; it is not part of this crate.

pub mod schema;
pub mod version;

// Re-exports
pub use schema::errors::{ConfigError, ConfigPath, DeprecationNotice, Severity};
pub use schema::types::{
    CanonicalConfig, ClientConfig, ConfigValidation, EndpointConfig, LoadBalancerConfig,
    PluginConfig, QueryType, DEFAULT_CLIENT_CLASS, DEFAULT_CLIENT_NAME, QUERY_UPDATE,
};
pub use schema::validator::{ConfigValidator, Validated, ValidationReport};
pub use version::{SolrVersion, VersionParseError, LEGACY_BREAK_MAJOR};
