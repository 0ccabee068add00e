//! Basic loader tests.
//!
//! Responsibilities:
//! - Test that candidate files merge in ladder order and others are ignored.
//! - Test provenance (`sources`) and error reporting for broken files.

use serde_json::json;
use tempfile::TempDir;

use super::{loader_for, write_file};
use crate::loader::error::ConfigError;

#[test]
fn test_empty_directory_loads_empty_tree() {
    let temp = TempDir::new().unwrap();
    let config = loader_for(temp.path()).load().unwrap();
    assert_eq!(config.tree(), &json!({}));
    assert!(config.sources().is_empty());
    assert!(config.overrides().is_empty());
}

#[test]
fn test_default_and_deployment_merge() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "default.yml",
        "root:\n  prop1: foo\n  prop2: 100\n  prop3: false\n",
    );
    write_file(temp.path(), "production.json", r#"{"root": {"prop2": 200}}"#);

    let config = loader_for(temp.path())
        .with_deployment("production")
        .load()
        .unwrap();
    assert_eq!(config.get_string("root.prop1").unwrap(), "foo");
    assert_eq!(config.get_int("root.prop2").unwrap(), 200);
    assert!(!config.get_bool("root.prop3").unwrap());

    let merged: Vec<_> = config.sources().iter().map(|s| s.basename.as_str()).collect();
    assert_eq!(merged, vec!["default", "production"]);
    assert_eq!(config.sources()[1].template, "{deployment}");
    assert_eq!(config.sources()[1].format, "json");
}

#[test]
fn test_other_deployment_files_are_ignored() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.yml", "level: default\n");
    write_file(temp.path(), "production.yml", "level: production\n");
    write_file(temp.path(), "staging.yml", "level: staging\n");

    let config = loader_for(temp.path()).load().unwrap();
    assert_eq!(config.environment().deployment(), "development");
    assert_eq!(config.get_string("level").unwrap(), "default");
}

#[test]
fn test_instance_file_wins_over_deployment_file() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.yml", "key: default\n");
    write_file(temp.path(), "production.yml", "key: production\n");
    write_file(temp.path(), "production-inst1.yml", "key: production-inst1\n");

    let config = loader_for(temp.path())
        .with_deployment("production")
        .with_instance("inst1")
        .load()
        .unwrap();
    assert_eq!(config.get_string("key").unwrap(), "production-inst1");
}

#[test]
fn test_empty_instance_keeps_dash_suffixed_basenames() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.yml", "key: default\n");
    write_file(temp.path(), "default-.yml", "key: dash\n");

    let config = loader_for(temp.path()).load().unwrap();
    assert_eq!(config.get_string("key").unwrap(), "dash");
}

#[test]
fn test_mixed_formats_merge() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.toml", "[server]\nport = 80\nhost = \"a\"\n");
    write_file(temp.path(), "development.json5", "{server: {port: 81,},}");
    write_file(temp.path(), "service1.hjson", "{\n  server: {\n    host: b\n  }\n}\n");
    write_file(temp.path(), "local.yaml", "server:\n  tls: true\n");

    let config = loader_for(temp.path()).load().unwrap();
    assert_eq!(
        config.tree(),
        &json!({"server": {"port": 81, "host": "b", "tls": true}})
    );
    let formats: Vec<_> = config.sources().iter().map(|s| s.format.as_str()).collect();
    assert_eq!(formats, vec!["toml", "json5", "hjson", "yaml"]);
}

#[test]
fn test_parse_error_aborts_load() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.yml", "a: 1\n");
    write_file(temp.path(), "development.yml", "a: [unclosed\n");

    let err = loader_for(temp.path()).load().unwrap_err();
    match err {
        ConfigError::Parse { path, format, .. } => {
            assert!(path.ends_with("development.yml"));
            assert_eq!(format, "yaml");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_non_mapping_root_is_parse_error() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.json", "[1, 2, 3]");
    assert!(matches!(
        loader_for(temp.path()).load(),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_unparsed_noncandidate_files_do_not_fail_load() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "default.yml", "a: 1\n");
    write_file(temp.path(), "unrelated.json", "{ broken");

    let config = loader_for(temp.path()).load().unwrap();
    assert_eq!(config.get_int("a").unwrap(), 1);
}

#[test]
fn test_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let err = loader_for(&temp.path().join("absent")).load().unwrap_err();
    assert!(matches!(err, ConfigError::DirectoryRead { .. }));
}
