//! Canonical configuration model.
//!
//! These structs are the validated, defaulted output of the schema engine.
//! Defaults live here as serde default functions so that a minimal document
//! (even `{}`) deserializes into a fully populated configuration; cross-field
//! invariants live in the [`ConfigValidation`] implementations and are
//! enforced by the validator after deserialization.

use crate::schema::errors::{ConfigError, ConfigPath};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the client used when the document does not pick one.
pub const DEFAULT_CLIENT_NAME: &str = "default";

/// Fully-qualified type of the wrapped library's default client.
pub const DEFAULT_CLIENT_CLASS: &str = "solr_client::Client";

/// The query type blocked from load balancing by default.
pub const QUERY_UPDATE: &str = "update";

/// Well-known query types of the wrapped client library.
///
/// `blocked_query_types` entries are plain strings so that custom query
/// plugins can be referenced, but the built-in types are enumerated here for
/// callers that construct configurations programmatically.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Select,
    Update,
    Ping,
    Terms,
    Suggest,
    Analysis,
    Extract,
    MoreLikeThis,
    RealtimeGet,
}

/// Cross-field invariant checks on canonical configuration types.
pub trait ConfigValidation {
    /// Checks the invariants of `self`, reporting failures against `path`.
    fn validate(&self, path: &ConfigPath) -> Result<(), ConfigError>;
}

/// The validated root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalConfig {
    pub default_client: String,
    pub endpoints: BTreeMap<String, EndpointConfig>,
    pub clients: BTreeMap<String, ClientConfig>,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            default_client: DEFAULT_CLIENT_NAME.to_string(),
            endpoints: BTreeMap::new(),
            clients: BTreeMap::new(),
        }
    }
}

impl ConfigValidation for CanonicalConfig {
    fn validate(&self, path: &ConfigPath) -> Result<(), ConfigError> {
        if self.default_client.is_empty() {
            return Err(ConfigError::malformed_value(
                path.key("default_client"),
                "default_client cannot be empty",
            ));
        }
        let clients_path = path.key("clients");
        for (name, client) in &self.clients {
            client.validate(&clients_path.key(name))?;
        }
        Ok(())
    }
}

/// A named network address identifying one search-service instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
    /// Legacy per-endpoint timeout in seconds. Deprecated: configure
    /// `adapter_timeout` on the client instead. Rejected outright from
    /// library major version 6 on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            path: default_path(),
            core: None,
            timeout: None,
        }
    }
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8983
}

fn default_path() -> String {
    "/".to_string()
}

impl EndpointConfig {
    /// Drops an empty `core` so that presence checks are uniform.
    pub(crate) fn prune_empty(&mut self) {
        prune(&mut self.core);
    }
}

/// A configured handle for issuing queries, bound to one or more endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub client_class: String,
    /// Legacy adapter class override. Deprecated in favor of
    /// `adapter_service` or the default adapter; rejected from library major
    /// version 6 on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter_timeout: Option<u64>,
    /// Reference to an externally defined adapter service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter_service: Option<String>,
    /// Endpoint names this client talks to, in declaration order.
    pub endpoints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_endpoint: Option<String>,
    pub load_balancer: LoadBalancerConfig,
    pub plugins: BTreeMap<String, PluginConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_class: default_client_class(),
            adapter_class: None,
            adapter_timeout: None,
            adapter_service: None,
            endpoints: Vec::new(),
            default_endpoint: None,
            load_balancer: LoadBalancerConfig::default(),
            plugins: BTreeMap::new(),
        }
    }
}

fn default_client_class() -> String {
    DEFAULT_CLIENT_CLASS.to_string()
}

impl ClientConfig {
    /// Drops empty optional strings so that presence checks are uniform.
    pub(crate) fn prune_empty(&mut self) {
        prune(&mut self.adapter_class);
        prune(&mut self.adapter_service);
        prune(&mut self.default_endpoint);
        for plugin in self.plugins.values_mut() {
            prune(&mut plugin.plugin_class);
            prune(&mut plugin.plugin_service);
        }
    }
}

fn prune(value: &mut Option<String>) {
    if value.as_deref() == Some("") {
        *value = None;
    }
}

impl ConfigValidation for ClientConfig {
    fn validate(&self, path: &ConfigPath) -> Result<(), ConfigError> {
        if self.client_class.is_empty() {
            return Err(ConfigError::malformed_value(
                path.key("client_class"),
                "client_class cannot be empty",
            ));
        }

        if self.adapter_timeout.is_some() && self.adapter_service.is_some() {
            return Err(ConfigError::mutual_exclusion(
                path.clone(),
                "adapter_timeout",
                "adapter_service",
                "adapter_timeout is only supported for the default adapter \
                 and not combined with adapter_service",
            ));
        }

        let plugins_path = path.key("plugins");
        for (name, plugin) in &self.plugins {
            plugin.validate(&plugins_path.key(name))?;
        }

        self.load_balancer.validate(&path.key("load_balancer"))
    }
}

/// Client-side selection among weighted endpoints for a subset of query types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoadBalancerConfig {
    pub enabled: bool,
    /// Endpoint name to selection weight.
    pub endpoints: BTreeMap<String, u32>,
    /// Query types excluded from load balancing.
    pub blocked_query_types: Vec<String>,
}

impl Default for LoadBalancerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoints: BTreeMap::new(),
            blocked_query_types: default_blocked_query_types(),
        }
    }
}

pub(crate) fn default_blocked_query_types() -> Vec<String> {
    vec![QUERY_UPDATE.to_string()]
}

impl ConfigValidation for LoadBalancerConfig {
    fn validate(&self, path: &ConfigPath) -> Result<(), ConfigError> {
        if self.enabled && self.endpoints.is_empty() {
            return Err(ConfigError::empty_collection(
                path.key("endpoints"),
                "the load balancer is enabled but no endpoints are configured",
            ));
        }
        Ok(())
    }
}

/// An optional behavior extension attached to a client.
///
/// Identified either by a class to instantiate or by a pre-built service
/// reference, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PluginConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_service: Option<String>,
}

impl ConfigValidation for PluginConfig {
    fn validate(&self, path: &ConfigPath) -> Result<(), ConfigError> {
        if self.plugin_class.is_some() && self.plugin_service.is_some() {
            return Err(ConfigError::mutual_exclusion(
                path.clone(),
                "plugin_class",
                "plugin_service",
                "only one of plugin class or plugin service can be set",
            ));
        }
        Ok(())
    }
}
