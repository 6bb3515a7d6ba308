mod common;

use cadence_registry::{RegistryConfig, RegistryError};
use common::init_tracing;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("cadence.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_yields_defaults() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = RegistryConfig::load_from(dir.path().join("absent.toml"));
    assert_eq!(config, RegistryConfig::default());
}

#[test]
fn partial_section_keeps_other_defaults() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[registry]
max_search_depth = 8
cache_fallback = false
"#,
    );

    let config = RegistryConfig::load_from(&path);
    assert_eq!(
        config,
        RegistryConfig {
            max_search_depth: 8,
            cache_fallback: false,
            ..RegistryConfig::default()
        }
    );
}

#[test]
fn file_without_registry_section_yields_defaults() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[logging]\nlevel = \"debug\"\n");
    assert_eq!(RegistryConfig::load_from(&path), RegistryConfig::default());
}

#[test]
fn invalid_toml_yields_defaults() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[registry\nmax_search_depth = ");
    assert_eq!(RegistryConfig::load_from(&path), RegistryConfig::default());
}

#[test]
fn wrong_value_type_is_rejected() {
    let result = RegistryConfig::from_toml_str("[registry]\nmax_search_depth = \"deep\"\n");
    assert!(matches!(result, Err(RegistryError::Config(_))));
}

#[test]
fn zero_threshold_is_rejected() {
    let result = RegistryConfig::from_toml_str("[registry]\nsize_warning_threshold = 0\n");
    match result {
        Err(RegistryError::Config(message)) => {
            assert!(message.contains("size_warning_threshold"));
        }
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn zero_threshold_file_falls_back_to_defaults() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[registry]\nsize_warning_threshold = 0\n");
    assert_eq!(RegistryConfig::load_from(&path), RegistryConfig::default());
}

#[test]
fn full_section_round_trips_through_toml() {
    let config = RegistryConfig {
        max_search_depth: 3,
        size_warning_threshold: 50,
        cache_fallback: false,
        repair_on_resolve: false,
    };
    let text = format!("[registry]\n{}", toml::to_string(&config).unwrap());
    assert_eq!(RegistryConfig::from_toml_str(&text).unwrap(), config);
}
