//! End-to-end tests across the workspace crates: a project root plus a
//! user home, exercised the way the engine's configuration phase would.

use anvil_fs::NormalizedPath;
use anvil_home::{
    BuildProperties, CleanupCounts, HomeCleanupService, InitialProperties, user_home,
};
use anvil_meta::{CompatibilityLevel, DescriptorLoader};
use semver::Version;
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

struct Fixture {
    project: TempDir,
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    fn project_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.project.path())
    }

    fn home_root(&self) -> NormalizedPath {
        NormalizedPath::new(self.home.path())
    }

    fn write_project_file(&self, relative: &str, content: &str) {
        let path = self.project.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_home_file(&self, relative: &str, content: &str) {
        let path = self.home.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

#[test]
fn test_configuration_phase_flow() {
    let fixture = Fixture::new();
    fixture.write_project_file(
        ".anvil/plugins.toml",
        r#"
[compatibility]
level = "8"

[[repositories]]
url = "https://mirror.example/plugin-releases"

[[repositories]]
url = "https://plugins.example/m2"

[dependencies]
plugins = [
    "org.anvil.dsl:dsl-plugin:2.1.4",
    "org.anvil.dsl:dsl-conventions:0.7.0",
]
"#,
    );
    fixture.write_project_file("anvil.properties", "systemProp.build.channel=stable\n");
    fixture.write_home_file("anvil.properties", "systemProp.build.owner=user\n");

    // 1. Initial properties name the user home explicitly.
    let initial = InitialProperties::from_definitions([(
        "anvil.user.home".to_string(),
        fixture.home_root().as_str().to_string(),
    )]);
    let home = user_home(&initial).unwrap();
    assert_eq!(home, fixture.home_root());

    // 2. Merged properties see both files.
    let merged = BuildProperties::assemble(&initial, &home, &fixture.project_root()).unwrap();
    assert_eq!(merged.get("build.channel"), Some("stable"));
    assert_eq!(merged.get("build.owner"), Some("user"));

    // 3. The descriptor is read once and is a pure snapshot.
    let descriptor = DescriptorLoader::new().load(&fixture.project_root()).unwrap();
    assert_eq!(descriptor.endpoints().len(), 2);
    assert_eq!(
        descriptor.endpoints()[0].url(),
        "https://mirror.example/plugin-releases"
    );
    assert_eq!(descriptor.dependencies().len(), 2);
    assert_eq!(descriptor.compatibility_level(), CompatibilityLevel::V8);
    assert_eq!(
        descriptor.source_compatibility(),
        descriptor.target_compatibility()
    );
}

#[test]
fn test_shutdown_cleanup_flow() {
    let fixture = Fixture::new();

    // Current version cache plus one stale release cache with an old marker.
    fixture.write_home_file("caches/5.6.4/.keep", "");
    fixture.write_home_file("caches/5.2.0/file-hashes/file-hashes.lock", "");
    fixture.write_home_file("wrapper/dists/anvil-5.2.0-bin/abc/.keep", "");

    let service = HomeCleanupService::new(fixture.home_root(), Version::new(5, 6, 4))
        .at_time(SystemTime::now() + DAY * 40);
    let counts = service.stop().unwrap();

    assert_eq!(counts.deleted, 1);
    assert!(!fixture.home.path().join("caches/5.2.0").exists());
    assert!(
        !fixture
            .home
            .path()
            .join("wrapper/dists/anvil-5.2.0-bin")
            .exists()
    );
    assert!(fixture.home.path().join("caches/5.6.4").exists());

    // A second shutdown within the 24h interval of the sweep marker does
    // nothing. The marker was touched just now, so an hour later is too soon.
    let service = HomeCleanupService::new(fixture.home_root(), Version::new(5, 6, 4))
        .at_time(SystemTime::now() + Duration::from_secs(60 * 60));
    assert_eq!(service.stop().unwrap(), CleanupCounts::default());
}
