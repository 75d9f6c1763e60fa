//! Cleanup of unused version-specific caches and wrapper distributions.
//!
//! A cache directory is deleted when its version is strictly older than
//! the running engine, its usage marker exists, and the marker has not
//! been touched within the retention window (30 days for releases, 7 for
//! snapshots). Snapshots are additionally kept while they are the newest
//! cache for their base version. The whole sweep runs at most once per
//! 24 hours, tracked by a `gc.properties` marker in the current version's
//! cache directory.

use std::collections::BTreeMap;
use std::fs;
use std::time::{Duration, SystemTime};

use anvil_fs::{HomePath, NormalizedPath, io};
use semver::Version;

use crate::caches::{CacheDirScanner, VersionSpecificCacheDir};
use crate::properties::load_properties;
use crate::wrapper::{DistributionType, dist_dir_name};
use crate::{Error, Result};

/// Default retention for release caches, in days.
pub const MAX_UNUSED_DAYS_RELEASES: u64 = 30;

/// Default retention for snapshot caches, in days.
pub const MAX_UNUSED_DAYS_SNAPSHOTS: u64 = 7;

/// Property disabling the cleanup sweep entirely.
pub const CACHE_CLEANUP_PROPERTY: &str = "cache.cleanup";

/// Marker file whose mtime records when a cache was last used.
const USAGE_MARKER_PATH: &str = "file-hashes/file-hashes.lock";

/// Minimum interval between sweeps.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Observer for cleanup progress.
pub trait CleanupProgressMonitor {
    fn increment_deleted(&mut self);
    fn increment_skipped(&mut self);
}

/// Simple counting monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupCounts {
    pub deleted: usize,
    pub skipped: usize,
}

impl CleanupProgressMonitor for CleanupCounts {
    fn increment_deleted(&mut self) {
        self.deleted += 1;
    }

    fn increment_skipped(&mut self) {
        self.skipped += 1;
    }
}

/// Outcome of one cleanup execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    /// Whether a sweep actually ran.
    pub performed: bool,
    /// Versions whose cache directories were deleted.
    pub deleted_versions: Vec<Version>,
}

/// Deletes unused version-specific cache directories.
pub struct VersionCacheCleanup {
    scanner: CacheDirScanner,
    current_version: Version,
    max_unused_days_releases: u64,
    max_unused_days_snapshots: u64,
    now: SystemTime,
}

impl VersionCacheCleanup {
    /// Create a cleanup action over a cache base directory with default
    /// retention windows.
    pub fn new(cache_base_dir: NormalizedPath, current_version: Version) -> Self {
        Self {
            scanner: CacheDirScanner::new(cache_base_dir),
            current_version,
            max_unused_days_releases: MAX_UNUSED_DAYS_RELEASES,
            max_unused_days_snapshots: MAX_UNUSED_DAYS_SNAPSHOTS,
            now: SystemTime::now(),
        }
    }

    /// Override the retention windows.
    ///
    /// The release window must be at least as long as the snapshot window.
    pub fn with_retention(mut self, releases: u64, snapshots: u64) -> Result<Self> {
        if releases < snapshots {
            return Err(Error::InvalidRetention {
                releases,
                snapshots,
            });
        }
        self.max_unused_days_releases = releases;
        self.max_unused_days_snapshots = snapshots;
        Ok(self)
    }

    /// Pin the reference time used for interval and retention checks.
    pub fn at_time(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Run the cleanup if it is due.
    ///
    /// Returns the outcome; `performed` is false when the sweep ran within
    /// the last 24 hours or the current version has no cache directory yet.
    pub fn execute(&self, monitor: &mut dyn CleanupProgressMonitor) -> Result<CleanupOutcome> {
        if !self.requires_cleanup()? {
            return Ok(CleanupOutcome::default());
        }

        let deleted_versions = self.perform_cleanup(monitor)?;
        io::touch(&self.gc_marker())?;

        tracing::debug!(
            "Processed version-specific caches at {} for cleanup",
            self.scanner.base_dir()
        );

        Ok(CleanupOutcome {
            performed: true,
            deleted_versions,
        })
    }

    /// The sweep marker lives in the current version's cache directory.
    fn gc_marker(&self) -> NormalizedPath {
        self.scanner
            .dir_for(&self.current_version)
            .join(HomePath::GcMarker)
    }

    fn requires_cleanup(&self) -> Result<bool> {
        let marker = self.gc_marker();
        if !marker.is_file() {
            // Only sweep once the current version has a cache to mark.
            return Ok(marker
                .parent()
                .map(|parent| parent.is_dir())
                .unwrap_or(false));
        }
        let modified = modified_time(&marker)?;
        Ok(self
            .now
            .duration_since(modified)
            .unwrap_or(Duration::ZERO)
            >= CLEANUP_INTERVAL)
    }

    fn perform_cleanup(
        &self,
        monitor: &mut dyn CleanupProgressMonitor,
    ) -> Result<Vec<Version>> {
        let mut by_base_version: BTreeMap<Version, Vec<VersionSpecificCacheDir>> = BTreeMap::new();
        for cache_dir in self.scanner.existing_dirs()? {
            by_base_version
                .entry(cache_dir.base_version())
                .or_default()
                .push(cache_dir);
        }

        let mut deleted_versions = Vec::new();
        for group in by_base_version.values() {
            for (index, cache_dir) in group.iter().enumerate() {
                let has_newer_same_base = index + 1 < group.len();
                if self.should_delete(cache_dir, has_newer_same_base)? {
                    monitor.increment_deleted();
                    match fs::remove_dir_all(cache_dir.dir().to_native()) {
                        Ok(()) => {
                            tracing::debug!(
                                "Deleted version-specific cache directory at {}",
                                cache_dir.dir()
                            );
                            deleted_versions.push(cache_dir.version().clone());
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to clean up version-specific cache directory {}: {}",
                                cache_dir.dir(),
                                e
                            );
                        }
                    }
                } else {
                    monitor.increment_skipped();
                }
            }
        }

        Ok(deleted_versions)
    }

    fn should_delete(
        &self,
        cache_dir: &VersionSpecificCacheDir,
        has_newer_same_base: bool,
    ) -> Result<bool> {
        // Caches of the running or newer versions are never touched.
        if cache_dir.version() >= &self.current_version {
            return Ok(false);
        }

        let marker = cache_dir.dir().join(USAGE_MARKER_PATH);
        if !marker.is_file() {
            return Ok(false);
        }
        let last_used = modified_time(&marker)?;

        if last_used < self.minimum_timestamp(self.max_unused_days_releases) {
            return Ok(true);
        }
        if cache_dir.is_snapshot()
            && last_used < self.minimum_timestamp(self.max_unused_days_snapshots)
        {
            return Ok(has_newer_same_base);
        }
        Ok(false)
    }

    fn minimum_timestamp(&self, max_unused_days: u64) -> SystemTime {
        self.now
            .checked_sub(Duration::from_secs(max_unused_days * SECONDS_PER_DAY))
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }
}

fn modified_time(path: &NormalizedPath) -> Result<SystemTime> {
    let native = path.to_native();
    let metadata = fs::metadata(&native).map_err(|e| Error::io(&native, e))?;
    metadata.modified().map_err(|e| Error::io(&native, e))
}

/// Orchestrates the user-home cleanup on engine shutdown.
///
/// Honors `cache.cleanup=false` in the user-home properties file, runs the
/// version-cache sweep, and removes wrapper distributions for versions
/// whose caches were deleted.
pub struct HomeCleanupService {
    user_home: NormalizedPath,
    current_version: Version,
    now: SystemTime,
}

impl HomeCleanupService {
    /// Create a service for a user home and the running engine version.
    pub fn new(user_home: NormalizedPath, current_version: Version) -> Self {
        Self {
            user_home,
            current_version,
            now: SystemTime::now(),
        }
    }

    /// Pin the reference time used for interval and retention checks.
    pub fn at_time(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Run the cleanup sweep.
    ///
    /// Called when the engine stops. Returns the deleted/skipped counts;
    /// both are zero when cleanup is disabled or not yet due.
    pub fn stop(&self) -> Result<CleanupCounts> {
        let properties = load_properties(&self.user_home.join(HomePath::PropertiesFile))?;
        if properties.get(CACHE_CLEANUP_PROPERTY).map(String::as_str) == Some("false") {
            tracing::debug!("Cache cleanup disabled via {}", CACHE_CLEANUP_PROPERTY);
            return Ok(CleanupCounts::default());
        }

        let mut counts = CleanupCounts::default();
        let cleanup = VersionCacheCleanup::new(
            self.user_home.join(HomePath::CachesDir),
            self.current_version.clone(),
        )
        .at_time(self.now);
        let outcome = cleanup.execute(&mut counts)?;

        if outcome.performed {
            self.cleanup_wrapper_dists(&outcome.deleted_versions)?;
        }

        Ok(counts)
    }

    /// Remove installed wrapper distributions for deleted cache versions.
    fn cleanup_wrapper_dists(&self, deleted_versions: &[Version]) -> Result<()> {
        let dists_dir = self.user_home.join(HomePath::WrapperDists);
        if !dists_dir.is_dir() {
            return Ok(());
        }

        for version in deleted_versions {
            for dist_type in [DistributionType::Bin, DistributionType::All] {
                let dist_dir = dists_dir.join(dist_dir_name(version, dist_type));
                if dist_dir.is_dir() {
                    match fs::remove_dir_all(dist_dir.to_native()) {
                        Ok(()) => {
                            tracing::debug!("Deleted wrapper distribution at {}", dist_dir);
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to delete wrapper distribution {}: {}",
                                dist_dir,
                                e
                            );
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
