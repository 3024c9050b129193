//! Configuration schema: canonical model, normalization, and validation.

pub mod errors;
pub mod normalize;
pub mod types;
pub mod validator;

#[cfg(test)]
mod tests;

pub use errors::{ConfigError, ConfigPath, DeprecationNotice, Severity};
pub use types::{
    CanonicalConfig, ClientConfig, ConfigValidation, EndpointConfig, LoadBalancerConfig,
    PluginConfig, QueryType, DEFAULT_CLIENT_CLASS, DEFAULT_CLIENT_NAME, QUERY_UPDATE,
};
pub use validator::{ConfigValidator, Validated, ValidationReport};
