//! The configuration validation engine.
//!
//! [`ConfigValidator`] turns a raw, JSON-like configuration document into a
//! [`CanonicalConfig`] or fails with a [`ConfigError`]. Validation proceeds in
//! a fixed order: top-level shape and defaults, then the endpoints section,
//! then the clients section (per-entry normalization followed by cross-field
//! checks), with deprecation notices collected along the way and legacy
//! options turned into hard errors when the injected library version has
//! dropped them.
//!
//! Known fields are declared in per-section tables of name plus accepted JSON
//! types, all walked by one generic routine; the field-specific normalizers
//! live in [`crate::schema::normalize`].
//!
//! The engine is a pure function of the document and the injected version: it
//! holds no mutable state and never mutates its input, so one validator can
//! serve any number of threads.

use crate::schema::errors::{ConfigError, ConfigPath, DeprecationNotice};
use crate::schema::normalize;
use crate::schema::types::{CanonicalConfig, ClientConfig, ConfigValidation, EndpointConfig};
use crate::version::{SolrVersion, LEGACY_BREAK_MAJOR};
use serde_json::{json, Map, Value};
use tracing::warn;

/// JSON types a field may carry, for the declarative field tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl JsonType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Null => value.is_null(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }
}

/// One known field of a configuration section.
struct KnownField {
    name: &'static str,
    types: &'static [JsonType],
}

const fn field(name: &'static str, types: &'static [JsonType]) -> KnownField {
    KnownField { name, types }
}

const ROOT_FIELDS: &[KnownField] = &[
    field("default_client", &[JsonType::String]),
    field("endpoints", &[JsonType::Object]),
    field("clients", &[JsonType::Object]),
];

const ENDPOINT_FIELDS: &[KnownField] = &[
    field("scheme", &[JsonType::String]),
    field("host", &[JsonType::String]),
    field("port", &[JsonType::Number]),
    field("path", &[JsonType::String]),
    field("core", &[JsonType::String]),
    field("timeout", &[JsonType::Number, JsonType::String]),
];

const CLIENT_FIELDS: &[KnownField] = &[
    field("client_class", &[JsonType::String]),
    field("adapter_class", &[JsonType::String]),
    field("adapter_timeout", &[JsonType::Number, JsonType::String]),
    field("adapter_service", &[JsonType::String]),
    field("endpoints", &[JsonType::String, JsonType::Array]),
    field("default_endpoint", &[JsonType::String]),
    field(
        "load_balancer",
        &[JsonType::Boolean, JsonType::Null, JsonType::Object],
    ),
    field("plugins", &[JsonType::Object]),
];

const LOAD_BALANCER_FIELDS: &[KnownField] = &[
    field("enabled", &[JsonType::Boolean]),
    field(
        "endpoints",
        &[JsonType::String, JsonType::Array, JsonType::Object],
    ),
    field("blocked_query_types", &[JsonType::String, JsonType::Array]),
];

const PLUGIN_FIELDS: &[KnownField] = &[
    field("plugin_class", &[JsonType::String]),
    field("plugin_service", &[JsonType::String]),
];

/// Checks a mapping against its field table: every key must be known and
/// carry one of the accepted types.
fn check_fields(
    map: &Map<String, Value>,
    specs: &[KnownField],
    path: &ConfigPath,
) -> Result<(), ConfigError> {
    for (key, value) in map {
        let Some(known) = specs.iter().find(|known| known.name == key.as_str()) else {
            return Err(ConfigError::unrecognized_option(path.clone(), key));
        };
        if !known.types.iter().any(|t| t.matches(value)) {
            let expected = known
                .types
                .iter()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(ConfigError::invalid_type(
                path.key(key),
                expected,
                normalize::value_type_name(value),
            ));
        }
    }
    Ok(())
}

/// A successfully validated configuration plus the deprecation notices
/// gathered on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub config: CanonicalConfig,
    pub deprecations: Vec<DeprecationNotice>,
}

/// Outcome of [`ConfigValidator::validate_collecting`]: every error found,
/// not just the first, plus all deprecation notices regardless of outcome.
#[derive(Debug, Default, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ConfigError>,
    pub deprecations: Vec<DeprecationNotice>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_deprecations(&self) -> bool {
        !self.deprecations.is_empty()
    }

    /// The overall outcome, failing with the first error collected.
    pub fn result(&self) -> Result<(), ConfigError> {
        match self.errors.first() {
            None => Ok(()),
            Some(error) => Err(error.clone()),
        }
    }
}

/// Validates raw configuration documents against the schema.
///
/// The validator is constructed once with the detected library version and
/// can then validate any number of documents.
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    version: SolrVersion,
}

impl ConfigValidator {
    pub fn new(version: SolrVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> SolrVersion {
        self.version
    }

    /// Validates a document, failing on the first error.
    ///
    /// On success the returned [`CanonicalConfig`] satisfies every schema
    /// invariant and carries no raw comma-joined list values; deprecation
    /// notices ride along and are also emitted as `tracing` warnings.
    pub fn validate(&self, raw: &Value) -> Result<Validated, ConfigError> {
        let mut deprecations = Vec::new();
        let root_path = ConfigPath::root();
        let root = root_object(raw)?;
        check_fields(&root, ROOT_FIELDS, &root_path)?;

        let mut config = CanonicalConfig {
            default_client: default_client(&root)?,
            ..CanonicalConfig::default()
        };

        if let Some(Value::Object(endpoints)) = root.get("endpoints") {
            let section = root_path.key("endpoints");
            for (name, value) in endpoints {
                let endpoint = self.endpoint_entry(&section.key(name), value, &mut deprecations)?;
                config.endpoints.insert(name.clone(), endpoint);
            }
        }

        if let Some(Value::Object(clients)) = root.get("clients") {
            let section = root_path.key("clients");
            for (name, value) in clients {
                let client = self.client_entry(&section.key(name), value, &mut deprecations)?;
                config.clients.insert(name.clone(), client);
            }
        }

        emit(&deprecations);
        Ok(Validated {
            config,
            deprecations,
        })
    }

    /// Validates a document, collecting every error instead of stopping at
    /// the first. Endpoint and client entries fail independently.
    pub fn validate_collecting(&self, raw: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();
        let root_path = ConfigPath::root();
        let root = match root_object(raw) {
            Ok(root) => root,
            Err(error) => {
                report.errors.push(error);
                return report;
            }
        };
        if let Err(error) = check_fields(&root, ROOT_FIELDS, &root_path) {
            report.errors.push(error);
        }
        if let Err(error) = default_client(&root) {
            report.errors.push(error);
        }

        if let Some(Value::Object(endpoints)) = root.get("endpoints") {
            let section = root_path.key("endpoints");
            for (name, value) in endpoints {
                if let Err(error) =
                    self.endpoint_entry(&section.key(name), value, &mut report.deprecations)
                {
                    report.errors.push(error);
                }
            }
        }

        if let Some(Value::Object(clients)) = root.get("clients") {
            let section = root_path.key("clients");
            for (name, value) in clients {
                if let Err(error) =
                    self.client_entry(&section.key(name), value, &mut report.deprecations)
                {
                    report.errors.push(error);
                }
            }
        }

        emit(&report.deprecations);
        report
    }

    fn endpoint_entry(
        &self,
        path: &ConfigPath,
        value: &Value,
        deprecations: &mut Vec<DeprecationNotice>,
    ) -> Result<EndpointConfig, ConfigError> {
        let map = as_object(value, path)?;
        check_fields(map, ENDPOINT_FIELDS, path)?;

        let mut normalized = map.clone();
        if let Some(Value::Number(port)) = map.get("port") {
            let valid = port.as_u64().is_some_and(|p| (1..=65_535).contains(&p));
            if !valid {
                return Err(ConfigError::malformed_value(
                    path.key("port"),
                    format!("port must be an integer between 1 and 65535, found {}", port),
                ));
            }
        }
        if let Some(timeout) = map.get("timeout") {
            let seconds = normalize::timeout_seconds(timeout, &path.key("timeout"))?;
            self.legacy_option(
                path.key("timeout"),
                "timeout",
                "1.3",
                "the per-endpoint \"timeout\" option is deprecated, \
                 configure \"adapter_timeout\" on the client instead",
                deprecations,
            )?;
            normalized.insert("timeout".to_string(), json!(seconds));
        }

        let mut endpoint: EndpointConfig = serde_json::from_value(Value::Object(normalized))
            .map_err(|error| ConfigError::malformed_value(path.clone(), error.to_string()))?;
        endpoint.prune_empty();
        Ok(endpoint)
    }

    fn client_entry(
        &self,
        path: &ConfigPath,
        value: &Value,
        deprecations: &mut Vec<DeprecationNotice>,
    ) -> Result<ClientConfig, ConfigError> {
        let map = as_object(value, path)?;
        check_fields(map, CLIENT_FIELDS, path)?;

        let mut normalized = map.clone();

        if let Some(endpoints) = map.get("endpoints") {
            let list = normalize::split_list(endpoints, &path.key("endpoints"))?;
            normalized.insert("endpoints".to_string(), json!(list));
        }

        if let Some(balancer) = map.get("load_balancer") {
            let balancer_path = path.key("load_balancer");
            let mut balancer = normalize::coerce_load_balancer(balancer, &balancer_path)?;
            check_fields(&balancer, LOAD_BALANCER_FIELDS, &balancer_path)?;
            if let Some(endpoints) = balancer.get("endpoints") {
                let weights =
                    normalize::weighted_endpoints(endpoints, &balancer_path.key("endpoints"))?;
                balancer.insert("endpoints".to_string(), json!(weights));
            }
            let blocked = normalize::blocked_query_types(
                balancer.get("blocked_query_types"),
                &balancer_path.key("blocked_query_types"),
            )?;
            balancer.insert("blocked_query_types".to_string(), json!(blocked));
            normalized.insert("load_balancer".to_string(), Value::Object(balancer));
        }

        match map.get("adapter_timeout") {
            Some(Value::String(s)) if s.trim().is_empty() => {
                normalized.remove("adapter_timeout");
            }
            Some(timeout) => {
                let seconds = normalize::timeout_seconds(timeout, &path.key("adapter_timeout"))?;
                normalized.insert("adapter_timeout".to_string(), json!(seconds));
            }
            None => {}
        }

        match map.get("adapter_class") {
            Some(Value::String(s)) if s.is_empty() => {
                normalized.remove("adapter_class");
            }
            Some(_) => {
                self.legacy_option(
                    path.key("adapter_class"),
                    "adapter_class",
                    "1.2",
                    "the \"adapter_class\" option is deprecated, \
                     use \"adapter_service\" or the default adapter instead",
                    deprecations,
                )?;
            }
            None => {}
        }

        if let Some(Value::Object(plugins)) = map.get("plugins") {
            let plugins_path = path.key("plugins");
            for (name, plugin) in plugins {
                let plugin_path = plugins_path.key(name);
                let plugin = as_object(plugin, &plugin_path)?;
                check_fields(plugin, PLUGIN_FIELDS, &plugin_path)?;
            }
        }

        let mut client: ClientConfig = serde_json::from_value(Value::Object(normalized))
            .map_err(|error| ConfigError::malformed_value(path.clone(), error.to_string()))?;
        client.prune_empty();
        client.validate(path)?;
        Ok(client)
    }

    /// Records a deprecation for a legacy option, or rejects it when the
    /// library version has dropped it.
    fn legacy_option(
        &self,
        path: ConfigPath,
        option: &str,
        since: &'static str,
        message: &str,
        deprecations: &mut Vec<DeprecationNotice>,
    ) -> Result<(), ConfigError> {
        if self.version.supports_legacy_adapters() {
            deprecations.push(DeprecationNotice::new(path, since, message));
            Ok(())
        } else {
            Err(ConfigError::incompatible_version(
                path,
                option,
                LEGACY_BREAK_MAJOR,
                format!(
                    "the \"{}\" option is not supported by client library version {} and later",
                    option, LEGACY_BREAK_MAJOR
                ),
            ))
        }
    }
}

/// The document root as a mapping; null and absent are treated as empty.
fn root_object(raw: &Value) -> Result<Map<String, Value>, ConfigError> {
    match raw {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        other => Err(ConfigError::invalid_type(
            ConfigPath::root(),
            "mapping",
            normalize::value_type_name(other),
        )),
    }
}

/// The `default_client` value: absent defaults to `"default"`, present but
/// empty is rejected.
fn default_client(root: &Map<String, Value>) -> Result<String, ConfigError> {
    match root.get("default_client") {
        None => Ok(crate::schema::types::DEFAULT_CLIENT_NAME.to_string()),
        Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
        Some(Value::String(_)) => Err(ConfigError::malformed_value(
            ConfigPath::root().key("default_client"),
            "default_client cannot be empty",
        )),
        Some(other) => Err(ConfigError::invalid_type(
            ConfigPath::root().key("default_client"),
            "string",
            normalize::value_type_name(other),
        )),
    }
}

fn as_object<'a>(
    value: &'a Value,
    path: &ConfigPath,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| {
        ConfigError::invalid_type(path.clone(), "mapping", normalize::value_type_name(value))
    })
}

fn emit(deprecations: &[DeprecationNotice]) {
    for notice in deprecations {
        warn!(
            path = %notice.path,
            since = notice.since,
            "{}", notice.message
        );
    }
}
