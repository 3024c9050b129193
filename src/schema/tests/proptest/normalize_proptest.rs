//! Property-based tests for normalization and the end-to-end invariants.

use crate::schema::errors::ConfigPath;
use crate::schema::normalize::{split_list, weighted_endpoints};
use crate::schema::tests::legacy_validator;
use crate::schema::types::ConfigValidation;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Generate endpoint-like identifiers.
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name_strategy(), 1..6)
}

proptest! {
    #[test]
    fn comma_split_recovers_the_source_names(names in names_strategy()) {
        let path = ConfigPath::root();
        let split = split_list(&json!(names.join(", ")), &path).unwrap();
        prop_assert_eq!(split, names);
    }

    #[test]
    fn list_normalization_is_idempotent(names in names_strategy()) {
        let path = ConfigPath::root();
        let once = split_list(&json!(names.join(",")), &path).unwrap();
        let twice = split_list(&json!(once.clone()), &path).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn bare_list_entries_always_get_weight_one(names in names_strategy()) {
        let weights = weighted_endpoints(&json!(names), &ConfigPath::root()).unwrap();
        prop_assert!(weights.values().all(|&weight| weight == 1));
        for name in &names {
            prop_assert!(weights.contains_key(name));
        }
    }

    #[test]
    fn valid_documents_yield_invariant_satisfying_configs(
        names in names_strategy(),
        balanced in any::<bool>(),
        timeout in prop::option::of(1u64..3600),
    ) {
        let mut client = Map::new();
        client.insert("endpoints".to_string(), json!(names.join(", ")));
        if let Some(timeout) = timeout {
            client.insert("adapter_timeout".to_string(), json!(timeout));
        }
        let balancer = if balanced {
            json!({"endpoints": names.clone()})
        } else {
            json!(false)
        };
        client.insert("load_balancer".to_string(), balancer);

        let raw = json!({"clients": {"default": Value::Object(client)}});
        let validated = legacy_validator().validate(&raw).unwrap();

        prop_assert!(validated.config.validate(&ConfigPath::root()).is_ok());
        let client = &validated.config.clients["default"];
        prop_assert_eq!(client.load_balancer.enabled, balanced);
        prop_assert_eq!(&client.endpoints, &names);
        if balanced {
            prop_assert!(!client.load_balancer.endpoints.is_empty());
        }
    }
}
