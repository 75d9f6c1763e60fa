//! Integration tests for descriptor loading

use anvil_fs::NormalizedPath;
use anvil_meta::{CompatibilityLevel, DescriptorLoader, PluginDescriptor};
use std::fs;
use tempfile::TempDir;

fn setup_descriptor_file(temp: &TempDir, content: &str) -> NormalizedPath {
    let config_dir = temp.path().join(".anvil");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("plugins.toml"), content).unwrap();
    NormalizedPath::new(temp.path())
}

#[test]
fn test_load_declared_descriptor() {
    let temp = TempDir::new().unwrap();
    let root = setup_descriptor_file(
        &temp,
        r#"
[compatibility]
level = "11"

[[repositories]]
url = "https://first.example/plugins"

[[repositories]]
url = "https://second.example/plugins"

[dependencies]
plugins = [
    "org.anvil.dsl:dsl-plugin:2.1.4",
    "org.anvil.dsl:dsl-conventions:0.7.0",
]
"#,
    );

    let descriptor = DescriptorLoader::new().load(&root).unwrap();

    assert_eq!(descriptor.endpoints().len(), 2);
    assert_eq!(
        descriptor.endpoints()[0].url(),
        "https://first.example/plugins"
    );
    assert_eq!(descriptor.dependencies().len(), 2);
    assert_eq!(descriptor.compatibility_level(), CompatibilityLevel::V11);
}

#[test]
fn test_load_is_deterministic_across_loads() {
    let temp = TempDir::new().unwrap();
    let root = setup_descriptor_file(
        &temp,
        r#"
[[repositories]]
url = "https://a.example/plugins"

[[repositories]]
url = "https://b.example/plugins"

[[repositories]]
url = "https://c.example/plugins"

[[repositories]]
url = "https://d.example/plugins"
"#,
    );

    let loader = DescriptorLoader::new();
    let first = loader.load(&root).unwrap();
    let second = loader.load(&root).unwrap();

    assert_eq!(first, second);
    let urls: Vec<&str> = first.endpoints().iter().map(|e| e.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://a.example/plugins",
            "https://b.example/plugins",
            "https://c.example/plugins",
            "https://d.example/plugins",
        ]
    );
}

#[test]
fn test_missing_file_yields_builtin() {
    let temp = TempDir::new().unwrap();
    let root = NormalizedPath::new(temp.path());

    let descriptor = DescriptorLoader::new().load(&root).unwrap();

    assert_eq!(descriptor, PluginDescriptor::builtin());
}

#[test]
fn test_malformed_toml_is_an_error() {
    let temp = TempDir::new().unwrap();
    let root = setup_descriptor_file(&temp, "[[repositories]\nurl = ");

    let result = DescriptorLoader::new().load(&root);

    assert!(result.is_err());
}

#[test]
fn test_invalid_coordinate_is_reported_with_path() {
    let temp = TempDir::new().unwrap();
    let root = setup_descriptor_file(
        &temp,
        r#"
[dependencies]
plugins = ["missing-version"]
"#,
    );

    let result = DescriptorLoader::new().load(&root);

    let err = result.unwrap_err().to_string();
    assert!(err.contains("plugins.toml"), "error should name the file: {err}");
    assert!(err.contains("missing-version"), "error should name the coordinate: {err}");
}

#[test]
fn test_mismatched_compatibility_is_an_error() {
    let temp = TempDir::new().unwrap();
    let root = setup_descriptor_file(
        &temp,
        r#"
[compatibility]
source = "8"
target = "17"
"#,
    );

    let result = DescriptorLoader::new().load(&root);

    assert!(result.is_err());
}
