//! Wrapper distribution settings - loaded from .anvil/wrapper.toml
//!
//! The declarative half of the wrapper: which engine distribution a
//! project pins, where it is downloaded from, and where it is installed
//! under the user home. Downloading and unpacking are the launcher's job.
//!
//! # Example TOML
//!
//! ```toml
//! distribution_url = "https://services.anvil-build.org/distributions/anvil-5.6.4-bin.zip"
//! distribution_sha256 = "sha256:1f3067073041bc44554d0efe5d402a33bc3d3c93cc39ab684f308586d732a80d"
//! distribution_base = "user-home"
//! distribution_type = "bin"
//! ```

use std::fmt;
use std::str::FromStr;

use anvil_fs::{ConfigStore, HomePath, NormalizedPath, checksum};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Engine distribution flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    /// Binary-only distribution.
    #[default]
    Bin,
    /// Complete distribution with sources and documentation.
    All,
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionType::Bin => write!(f, "bin"),
            DistributionType::All => write!(f, "all"),
        }
    }
}

impl FromStr for DistributionType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bin" => Ok(DistributionType::Bin),
            "all" => Ok(DistributionType::All),
            _ => Err(Error::InvalidDistributionType {
                value: s.to_string(),
            }),
        }
    }
}

/// How wrapper paths are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathBase {
    /// Relative to the user home.
    #[default]
    UserHome,
    /// Relative to the project root.
    Project,
}

/// Canonical directory name of an installed distribution.
pub fn dist_dir_name(version: &Version, dist_type: DistributionType) -> String {
    format!("anvil-{}-{}", version, dist_type)
}

/// Deterministic download locations for engine distributions.
pub struct DistributionLocator;

impl DistributionLocator {
    /// Repository serving release distributions.
    pub const RELEASE_REPOSITORY: &'static str = "https://services.anvil-build.org/distributions";

    /// Repository serving snapshot distributions.
    pub const SNAPSHOT_REPOSITORY: &'static str =
        "https://services.anvil-build.org/distributions-snapshots";

    /// Download URL for a version and distribution type.
    ///
    /// Pre-release versions are served from the snapshot repository.
    pub fn location_for(version: &Version, dist_type: DistributionType) -> String {
        let repository = if version.pre.is_empty() {
            Self::RELEASE_REPOSITORY
        } else {
            Self::SNAPSHOT_REPOSITORY
        };
        format!("{}/{}.zip", repository, dist_dir_name(version, dist_type))
    }
}

fn default_distribution_path() -> String {
    HomePath::WrapperDists.as_str().to_string()
}

/// Wrapper distribution settings for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperSettings {
    /// Where the pinned distribution is downloaded from.
    pub distribution_url: String,
    /// Expected checksum of the downloaded archive, when pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_sha256: Option<String>,
    /// Anchor for the install path.
    #[serde(default)]
    pub distribution_base: PathBase,
    /// Install path relative to the anchor.
    #[serde(default = "default_distribution_path")]
    pub distribution_path: String,
    /// Distribution flavor.
    #[serde(default)]
    pub distribution_type: DistributionType,
}

impl WrapperSettings {
    /// Settings pinning the given engine version with defaults.
    pub fn for_version(version: &Version, dist_type: DistributionType) -> Self {
        Self {
            distribution_url: DistributionLocator::location_for(version, dist_type),
            distribution_sha256: None,
            distribution_base: PathBase::default(),
            distribution_path: default_distribution_path(),
            distribution_type: dist_type,
        }
    }

    /// Path of the settings file under a project root.
    pub fn settings_path(root: &NormalizedPath) -> NormalizedPath {
        root.join(HomePath::ConfigDir).join(HomePath::WrapperFile)
    }

    /// Load and validate settings from a project root.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let settings: Self = ConfigStore::new().load(&Self::settings_path(root))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Persist settings under a project root.
    pub fn save(&self, root: &NormalizedPath) -> Result<()> {
        self.validate()?;
        ConfigStore::new().save(&Self::settings_path(root), self)?;
        Ok(())
    }

    /// The directory this distribution installs into.
    ///
    /// `<anchor>/<distribution_path>/<archive name>/<digest of URL>`. The
    /// URL digest keeps distributions from distinct sources from ever
    /// sharing an install directory.
    pub fn install_dir(
        &self,
        user_home: &NormalizedPath,
        project_root: &NormalizedPath,
    ) -> Result<NormalizedPath> {
        self.validate()?;
        let anchor = match self.distribution_base {
            PathBase::UserHome => user_home,
            PathBase::Project => project_root,
        };
        let archive_name = self
            .distribution_url
            .rsplit('/')
            .next()
            .unwrap_or(&self.distribution_url)
            .trim_end_matches(".zip");
        let digest = checksum::hex_digest(&checksum::content_checksum(&self.distribution_url))
            .to_string();
        Ok(anchor
            .join(&self.distribution_path)
            .join(archive_name)
            .join(&digest))
    }

    fn validate(&self) -> Result<()> {
        if self.distribution_url.is_empty() || !self.distribution_url.contains("://") {
            return Err(Error::InvalidDistributionUrl {
                url: self.distribution_url.clone(),
            });
        }
        Ok(())
    }
}
