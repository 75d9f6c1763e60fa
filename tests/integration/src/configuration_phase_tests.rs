//! Scenario tests for descriptor determinism and wrapper path assembly.

use anvil_fs::NormalizedPath;
use anvil_home::{DistributionType, WrapperSettings};
use anvil_meta::{DescriptorLoader, PluginDescriptor};
use semver::Version;
use std::fs;
use tempfile::TempDir;

fn write_descriptor(project: &TempDir, content: &str) -> NormalizedPath {
    let config_dir = project.path().join(".anvil");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("plugins.toml"), content).unwrap();
    NormalizedPath::new(project.path())
}

#[test]
fn test_endpoint_order_survives_reload() {
    let project = TempDir::new().unwrap();
    let root = write_descriptor(
        &project,
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
    for _ in 0..3 {
        let descriptor = loader.load(&root).unwrap();
        let urls: Vec<&str> = descriptor.endpoints().iter().map(|e| e.url()).collect();
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
}

#[test]
fn test_declared_dependency_set_is_closed() {
    let project = TempDir::new().unwrap();
    let root = write_descriptor(
        &project,
        r#"
[dependencies]
plugins = [
    "kotlin-dsl-plugin:2.1.4",
    "kotlin-dsl-conventions:0.7.0",
]
"#,
    );

    let descriptor = DescriptorLoader::new().load(&root).unwrap();

    assert_eq!(descriptor.dependencies().len(), 2);
    let rendered: Vec<String> = descriptor
        .dependencies()
        .iter()
        .map(|coordinate| coordinate.to_string())
        .collect();
    assert!(rendered.contains(&"kotlin-dsl-plugin:2.1.4".to_string()));
    assert!(rendered.contains(&"kotlin-dsl-conventions:0.7.0".to_string()));
}

#[test]
fn test_builtin_descriptor_is_stable() {
    assert_eq!(PluginDescriptor::builtin(), PluginDescriptor::builtin());
}

#[test]
fn test_wrapper_settings_round_trip_and_install_dir() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let project_root = NormalizedPath::new(project.path());
    let home_root = NormalizedPath::new(home.path());

    let settings = WrapperSettings::for_version(&Version::new(5, 6, 4), DistributionType::Bin);
    settings.save(&project_root).unwrap();

    let loaded = WrapperSettings::load(&project_root).unwrap();
    assert_eq!(loaded, settings);

    let install_dir = loaded.install_dir(&home_root, &project_root).unwrap();
    let expected_prefix = home_root.join("wrapper/dists/anvil-5.6.4-bin");
    assert!(install_dir.as_str().starts_with(expected_prefix.as_str()));

    // Same settings always assemble the same install directory.
    assert_eq!(
        install_dir,
        loaded.install_dir(&home_root, &project_root).unwrap()
    );
}
