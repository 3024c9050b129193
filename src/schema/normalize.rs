//! Raw-tree normalization.
//!
//! Pure, named transformation functions applied to the raw configuration
//! document before deserialization into the canonical model. Each function
//! takes the node it operates on plus the node's path for error reporting;
//! none of them mutate the input. All normalizations are idempotent: feeding
//! an already-canonical value back in returns it unchanged.

use crate::schema::errors::{ConfigError, ConfigPath};
use crate::schema::types;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Comma surrounded by optional whitespace, the list separator accepted in
/// string-valued list fields.
static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("list separator regex is valid"));

/// Name of a JSON value's type, for error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::Null => "null",
    }
}

/// Normalizes a list-like field into a sequence of strings.
///
/// A single string is split on `\s*,\s*`; a sequence of strings passes
/// through unchanged. Empty segments (from leading, trailing, or doubled
/// commas) are dropped.
pub fn split_list(value: &Value, path: &ConfigPath) -> Result<Vec<String>, ConfigError> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Vec::new());
            }
            Ok(LIST_SEPARATOR
                .split(trimmed)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect())
        }
        Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => list.push(s.clone()),
                    other => {
                        return Err(ConfigError::invalid_type(
                            path.key(index.to_string()),
                            "string",
                            value_type_name(other),
                        ));
                    }
                }
            }
            Ok(list)
        }
        other => Err(ConfigError::invalid_type(
            path.clone(),
            "string or sequence of strings",
            value_type_name(other),
        )),
    }
}

/// Coerces the load-balancer shorthand forms into an explicit mapping.
///
/// `false` becomes `{enabled: false}`; `true` and `null` become
/// `{enabled: true}`; a mapping without an explicit `enabled` key gets
/// `enabled: true` injected. Any other scalar is malformed.
pub fn coerce_load_balancer(
    value: &Value,
    path: &ConfigPath,
) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Value::Bool(enabled) => {
            let mut map = Map::new();
            map.insert("enabled".to_string(), Value::Bool(*enabled));
            Ok(map)
        }
        Value::Null => {
            let mut map = Map::new();
            map.insert("enabled".to_string(), Value::Bool(true));
            Ok(map)
        }
        Value::Object(entries) => {
            let mut map = entries.clone();
            map.entry("enabled".to_string())
                .or_insert(Value::Bool(true));
            Ok(map)
        }
        other => Err(ConfigError::invalid_type(
            path.clone(),
            "boolean, null, or mapping",
            value_type_name(other),
        )),
    }
}

/// Normalizes load-balancer endpoints into a name-to-weight mapping.
///
/// Accepts a comma-separated string or a bare list of names (each name gets
/// weight 1), a list mixing names and single-entry `{name: weight}` mappings,
/// or an explicit name-to-weight mapping (passed through). Duplicate names
/// resolve last-write-wins, standard mapping semantics.
pub fn weighted_endpoints(
    value: &Value,
    path: &ConfigPath,
) -> Result<BTreeMap<String, u32>, ConfigError> {
    let mut weights = BTreeMap::new();
    match value {
        Value::String(_) => {
            for name in split_list(value, path)? {
                weights.insert(name, 1);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(name) => {
                        weights.insert(name.clone(), 1);
                    }
                    Value::Object(entries) => {
                        for (name, weight) in entries {
                            let weight = parse_weight(weight, &path.key(name))?;
                            weights.insert(name.clone(), weight);
                        }
                    }
                    other => {
                        return Err(ConfigError::invalid_type(
                            path.key(index.to_string()),
                            "endpoint name or {name: weight} mapping",
                            value_type_name(other),
                        ));
                    }
                }
            }
        }
        Value::Object(entries) => {
            for (name, weight) in entries {
                let weight = parse_weight(weight, &path.key(name))?;
                weights.insert(name.clone(), weight);
            }
        }
        other => {
            return Err(ConfigError::invalid_type(
                path.clone(),
                "string, sequence, or mapping",
                value_type_name(other),
            ));
        }
    }
    Ok(weights)
}

fn parse_weight(value: &Value, path: &ConfigPath) -> Result<u32, ConfigError> {
    value
        .as_u64()
        .and_then(|weight| u32::try_from(weight).ok())
        .ok_or_else(|| {
            ConfigError::malformed_value(
                path.clone(),
                format!(
                    "endpoint weight must be a non-negative integer, found {}",
                    value
                ),
            )
        })
}

/// Normalizes `blocked_query_types`, defaulting to the update query type when
/// the field is absent.
pub fn blocked_query_types(
    value: Option<&Value>,
    path: &ConfigPath,
) -> Result<Vec<String>, ConfigError> {
    match value {
        None => Ok(types::default_blocked_query_types()),
        Some(value) => split_list(value, path),
    }
}

/// Normalizes a timeout value given as a number or a numeric string into
/// whole seconds.
pub fn timeout_seconds(value: &Value, path: &ConfigPath) -> Result<u64, ConfigError> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            ConfigError::malformed_value(
                path.clone(),
                format!("timeout must be a non-negative integer, found {}", n),
            )
        }),
        Value::String(s) => s.trim().parse().map_err(|_| {
            ConfigError::malformed_value(
                path.clone(),
                format!("timeout must be a non-negative integer, found '{}'", s),
            )
        }),
        other => Err(ConfigError::invalid_type(
            path.clone(),
            "number or numeric string",
            value_type_name(other),
        )),
    }
}
