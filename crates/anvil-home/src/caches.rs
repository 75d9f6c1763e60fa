//! Version-specific cache directory scanning.
//!
//! The engine keeps one cache directory per version under
//! `<user home>/caches`, e.g. `caches/5.6.4`. The scanner enumerates
//! them; retention decisions live in [`crate::cleanup`].

use std::fs;
use std::sync::LazyLock;

use anvil_fs::NormalizedPath;
use regex::Regex;
use semver::Version;

use crate::{Error, Result};

/// Directory names must start with a digit to be considered.
static DIGIT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d").expect("static pattern compiles"));

/// One existing version-specific cache directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionSpecificCacheDir {
    version: Version,
    dir: NormalizedPath,
}

impl VersionSpecificCacheDir {
    /// The engine version this cache belongs to.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The cache directory.
    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }

    /// The `major.minor.patch` version with any pre-release stripped.
    pub fn base_version(&self) -> Version {
        Version::new(self.version.major, self.version.minor, self.version.patch)
    }

    /// Whether this cache belongs to a snapshot (pre-release) version.
    pub fn is_snapshot(&self) -> bool {
        !self.version.pre.is_empty()
    }
}

/// Scanner over a version-specific cache base directory.
#[derive(Debug, Clone)]
pub struct CacheDirScanner {
    base_dir: NormalizedPath,
}

impl CacheDirScanner {
    /// Create a scanner rooted at the cache base directory.
    pub fn new(base_dir: NormalizedPath) -> Self {
        Self { base_dir }
    }

    /// The cache base directory.
    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    /// The cache directory for one version, existing or not.
    pub fn dir_for(&self, version: &Version) -> NormalizedPath {
        self.base_dir.join(version.to_string())
    }

    /// Enumerate existing version-specific cache directories, sorted by
    /// version.
    ///
    /// Subdirectories whose name does not start with a digit or does not
    /// parse as a version are skipped. A missing base directory yields an
    /// empty list.
    pub fn existing_dirs(&self) -> Result<Vec<VersionSpecificCacheDir>> {
        let mut dirs = Vec::new();

        let native = self.base_dir.to_native();
        if !native.is_dir() {
            return Ok(dirs);
        }

        let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            if !DIGIT_PREFIX.is_match(&name) {
                continue;
            }
            match Version::parse(&name) {
                Ok(version) => dirs.push(VersionSpecificCacheDir {
                    version,
                    dir: NormalizedPath::new(&path),
                }),
                Err(_) => {
                    tracing::debug!("Ignoring non-version cache directory {}", name);
                }
            }
        }

        dirs.sort();
        Ok(dirs)
    }
}
