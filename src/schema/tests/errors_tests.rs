//! Tests for the error hierarchy.

use crate::schema::errors::{ConfigError, ConfigPath, DeprecationNotice, Severity};
use pretty_assertions::assert_eq;

#[test]
fn paths_render_dot_separated() {
    let path = ConfigPath::root().key("clients").key("default");
    assert_eq!(path.to_string(), "clients.default");
    assert_eq!(ConfigPath::root().to_string(), "<root>");
}

#[test]
fn paths_parse_from_strings() {
    let path = ConfigPath::from("clients.default.load_balancer");
    assert_eq!(path.segments().len(), 3);
    assert!(ConfigPath::from("").is_root());
}

#[test]
fn key_does_not_mutate_the_parent() {
    let parent = ConfigPath::from("clients");
    let _child = parent.key("default");
    assert_eq!(parent.to_string(), "clients");
}

#[test]
fn error_codes_are_stable() {
    let path = ConfigPath::from("clients.default");
    assert_eq!(
        ConfigError::mutual_exclusion(path.clone(), "a", "b", "conflict").error_code(),
        "CONFIG_0001"
    );
    assert_eq!(
        ConfigError::empty_collection(path.clone(), "empty").error_code(),
        "CONFIG_0002"
    );
    assert_eq!(
        ConfigError::incompatible_version(path.clone(), "timeout", 6, "dropped").error_code(),
        "CONFIG_0003"
    );
    assert_eq!(
        ConfigError::malformed_value(path, "bad").error_code(),
        "CONFIG_0004"
    );
}

#[test]
fn messages_carry_the_offending_path() {
    let error = ConfigError::empty_collection(
        ConfigPath::from("clients.default.load_balancer.endpoints"),
        "no endpoints configured",
    );
    let rendered = error.to_string();
    assert!(rendered.contains("clients.default.load_balancer.endpoints"));
    assert!(rendered.contains("no endpoints configured"));
}

#[test]
fn invalid_type_names_both_types() {
    let error = ConfigError::invalid_type(ConfigPath::from("endpoints.main.port"), "number", "string");
    assert!(error.to_string().contains("expected number, found string"));
}

#[test]
fn errors_are_errors_and_notices_are_warnings() {
    let error = ConfigError::malformed_value(ConfigPath::root(), "bad");
    assert_eq!(error.severity(), Severity::Error);

    let notice = DeprecationNotice::new(ConfigPath::from("endpoints.main.timeout"), "1.3", "gone soon");
    assert_eq!(notice.severity(), Severity::Warning);
}

#[test]
fn deprecation_notices_render_package_and_version() {
    let notice = DeprecationNotice::new(ConfigPath::from("clients.default.adapter_class"), "1.2", "use adapter_service");
    let rendered = notice.to_string();
    assert!(rendered.contains("solr-client-config"));
    assert!(rendered.contains("1.2"));
    assert!(rendered.contains("clients.default.adapter_class"));
}

#[test]
fn severity_displays_uppercase() {
    assert_eq!(Severity::Error.to_string(), "ERROR");
    assert_eq!(Severity::Warning.to_string(), "WARNING");
}
