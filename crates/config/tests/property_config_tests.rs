//! Property-based tests for loading config directories.
//!
//! These tests verify loader invariants over randomly generated environments
//! and trees, catching edge cases that fixed examples miss.
//!
//! Test coverage:
//! - Default-only directory: the loaded tree equals the file tree for any
//!   deployment, instance, and hostname.
//! - Three-level ladder: the most specific file defining a key wins.

use cascade_config::ConfigLoader;
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use std::fs;
use tempfile::TempDir;

/// Strategy for environment fields; empty instances are common in practice.
fn env_strategy() -> impl Strategy<Value = (String, String, String)> {
    let deployment = prop_oneof![
        Just("development".to_string()),
        Just("production".to_string()),
        "[a-z]{3,10}".prop_map(String::from),
    ];
    let instance = prop_oneof![Just(String::new()), "[a-z0-9]{1,6}".prop_map(String::from)];
    let hostname = prop_oneof![
        Just("localhost".to_string()),
        ("[a-z][a-z0-9]{0,8}", "[a-z]{2,6}")
            .prop_map(|(host, domain)| format!("{host}.{domain}.com")),
    ];
    (deployment, instance, hostname)
}

/// Strategy for small JSON trees with a mapping root.
fn tree_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];
    let node = leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    });
    prop::collection::btree_map("[a-z]{1,6}", node, 0..5)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn prop_default_only_directory_loads_unchanged(
        (deployment, instance, hostname) in env_strategy(),
        tree in tree_strategy(),
    ) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("default.json"), serde_json::to_vec(&tree).unwrap()).unwrap();

        let config = ConfigLoader::new(dir.path())
            .with_deployment(deployment)
            .with_instance(instance)
            .with_hostname(hostname)
            .load()
            .unwrap();
        prop_assert_eq!(config.tree(), &tree);
    }

    #[test]
    fn prop_most_specific_file_wins(
        (deployment, instance, hostname) in env_strategy(),
        in_default in any::<bool>(),
        in_deployment in any::<bool>(),
        in_instance in any::<bool>(),
    ) {
        prop_assume!(!instance.is_empty());
        let short = hostname.split('.').next().unwrap_or_default().to_string();
        // `env` is the override file, not a ladder entry
        prop_assume!(
            deployment != "default"
                && deployment != "local"
                && deployment != "env"
                && deployment != short
        );
        let dir = TempDir::new().unwrap();
        let files = [
            ("default".to_string(), in_default),
            (deployment.clone(), in_deployment),
            (format!("{deployment}-{instance}"), in_instance),
        ];
        for (basename, defines_key) in &files {
            let body = if *defines_key {
                json!({"key": basename, "marker": basename})
            } else {
                json!({"marker": basename})
            };
            fs::write(
                dir.path().join(format!("{basename}.json")),
                serde_json::to_vec(&body).unwrap(),
            )
            .unwrap();
        }

        let config = ConfigLoader::new(dir.path())
            .with_deployment(deployment.clone())
            .with_instance(instance.clone())
            .with_hostname(hostname)
            .load()
            .unwrap();

        let expected = files.iter().rev().find(|(_, defines)| *defines).map(|(b, _)| b.clone());
        match expected {
            Some(basename) => prop_assert_eq!(config.get_string("key").unwrap(), basename),
            None => prop_assert!(config.get("key").is_err()),
        }
        prop_assert_eq!(config.get_string("marker").unwrap(), files[2].0.clone());
    }
}
