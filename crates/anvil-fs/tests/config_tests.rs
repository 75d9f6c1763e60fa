use anvil_fs::{ConfigStore, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    name: String,
    #[serde(default)]
    pinned: bool,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("sample.toml");
    fs::write(&file, "name = \"portal\"\npinned = true\n").unwrap();

    let store = ConfigStore::new();
    let sample: Sample = store.load(&NormalizedPath::new(&file)).unwrap();

    assert_eq!(
        sample,
        Sample {
            name: "portal".into(),
            pinned: true
        }
    );
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("sample.json");
    fs::write(&file, r#"{"name": "portal"}"#).unwrap();

    let store = ConfigStore::new();
    let sample: Sample = store.load(&NormalizedPath::new(&file)).unwrap();

    assert_eq!(sample.name, "portal");
    assert!(!sample.pinned);
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("sample.yaml");
    fs::write(&file, "name: portal\npinned: true\n").unwrap();

    let store = ConfigStore::new();
    let sample: Sample = store.load(&NormalizedPath::new(&file)).unwrap();

    assert_eq!(sample.name, "portal");
    assert!(sample.pinned);
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("sample.ini");
    fs::write(&file, "name=portal").unwrap();

    let store = ConfigStore::new();
    let result: anvil_fs::Result<Sample> = store.load(&NormalizedPath::new(&file));

    assert!(matches!(
        result,
        Err(anvil_fs::Error::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_load_malformed_toml_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("sample.toml");
    fs::write(&file, "name = ").unwrap();

    let store = ConfigStore::new();
    let result: anvil_fs::Result<Sample> = store.load(&NormalizedPath::new(&file));

    match result {
        Err(anvil_fs::Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse error, got {:?}", other),
    }
}

#[test]
fn test_save_then_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let file = NormalizedPath::new(temp.path().join("out.toml"));
    let sample = Sample {
        name: "portal".into(),
        pinned: true,
    };

    let store = ConfigStore::new();
    store.save(&file, &sample).unwrap();
    let loaded: Sample = store.load(&file).unwrap();

    assert_eq!(loaded, sample);
}
