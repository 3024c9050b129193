//! End-to-end validation scenarios over the public API.

use pretty_assertions::assert_eq;
use serde_json::json;
use solr_client_config::{
    ConfigError, ConfigPath, ConfigValidation, ConfigValidator, SolrVersion, QUERY_UPDATE,
};

fn validator() -> ConfigValidator {
    ConfigValidator::new(SolrVersion::new(5, 3, 0))
}

#[test]
fn a_full_document_validates_into_the_canonical_form() {
    let raw = json!({
        "default_client": "search",
        "endpoints": {
            "primary": {"host": "solr1.internal", "core": "products"},
            "replica": {"scheme": "https", "host": "solr2.internal", "port": 8984, "path": "/solr"}
        },
        "clients": {
            "search": {
                "endpoints": "primary, replica",
                "default_endpoint": "primary",
                "load_balancer": {
                    "endpoints": {"primary": 3, "replica": 1},
                    "blocked_query_types": "update"
                },
                "plugins": {
                    "audit": {"plugin_service": "app.audit"}
                }
            },
            "indexing": {
                "adapter_timeout": 120,
                "endpoints": ["primary"]
            }
        }
    });

    let validated = validator().validate(&raw).unwrap();
    let config = &validated.config;

    assert_eq!(config.default_client, "search");
    assert_eq!(config.endpoints.len(), 2);
    assert_eq!(config.endpoints["replica"].scheme, "https");
    assert_eq!(config.endpoints["replica"].port, 8984);

    let search = &config.clients["search"];
    assert_eq!(search.endpoints, vec!["primary", "replica"]);
    assert!(search.load_balancer.enabled);
    assert_eq!(search.load_balancer.endpoints["primary"], 3);
    assert_eq!(search.load_balancer.blocked_query_types, vec![QUERY_UPDATE]);

    let indexing = &config.clients["indexing"];
    assert_eq!(indexing.adapter_timeout, Some(120));
    assert!(!indexing.load_balancer.enabled);

    assert!(config.validate(&ConfigPath::root()).is_ok());
    assert!(validated.deprecations.is_empty());
}

#[test]
fn the_empty_document_succeeds_with_defaults() {
    let validated = validator().validate(&json!({})).unwrap();
    assert_eq!(validated.config.default_client, "default");
    assert!(validated.config.endpoints.is_empty());
    assert!(validated.config.clients.is_empty());
}

#[test]
fn conflicting_adapter_options_fail_with_the_client_path() {
    let error = validator()
        .validate(&json!({
            "clients": {"default": {"adapter_timeout": 5, "adapter_service": "svc"}}
        }))
        .unwrap_err();
    assert!(matches!(error, ConfigError::MutualExclusion { .. }));
    assert_eq!(error.path().to_string(), "clients.default");
    assert_eq!(error.error_code(), "CONFIG_0001");
}

#[test]
fn an_enabled_load_balancer_without_endpoints_fails() {
    let error = validator()
        .validate(&json!({
            "clients": {"default": {"load_balancer": {"enabled": true}}}
        }))
        .unwrap_err();
    assert!(matches!(error, ConfigError::EmptyCollection { .. }));
}

#[test]
fn legacy_options_deprecate_then_break_across_the_version_boundary() {
    let raw = json!({
        "endpoints": {"main": {"timeout": 5}},
        "clients": {"default": {"adapter_class": "app::CurlAdapter"}}
    });

    let validated = validator().validate(&raw).unwrap();
    assert_eq!(validated.deprecations.len(), 2);

    let modern = ConfigValidator::new("6.2.1".parse::<SolrVersion>().unwrap());
    let error = modern.validate(&raw).unwrap_err();
    assert!(matches!(error, ConfigError::IncompatibleVersion { .. }));
}

#[test]
fn collecting_surfaces_all_errors_and_deprecations_at_once() {
    let report = validator().validate_collecting(&json!({
        "endpoints": {"main": {"timeout": 5}},
        "clients": {
            "a": {"adapter_timeout": 5, "adapter_service": "svc"},
            "b": {"plugins": {"p": {"plugin_class": "x", "plugin_service": "y"}}}
        }
    }));
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.deprecations.len(), 1);
    assert!(report.result().is_err());
}
