//! Dependency coordinates for external plugins.
//!
//! A coordinate identifies one plugin by its `group:artifact` identifier
//! and a pinned version. Whether the version resolves against a configured
//! endpoint is checked by the engine during resolution, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of one external plugin with a pinned version.
///
/// Coordinates compare by identity (`group:artifact` then version), so a
/// set of coordinates is insensitive to declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DependencyCoordinate {
    group_artifact: String,
    version: String,
}

impl DependencyCoordinate {
    /// Create a coordinate from its parts.
    ///
    /// Both parts must be non-empty.
    pub fn new(
        group_artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, Error> {
        let group_artifact = group_artifact.into();
        let version = version.into();
        if group_artifact.is_empty() || version.is_empty() {
            return Err(Error::InvalidCoordinate {
                coordinate: format!("{}:{}", group_artifact, version),
            });
        }
        Ok(Self {
            group_artifact,
            version,
        })
    }

    /// Infallible constructor for engine-pinned coordinates.
    pub(crate) fn pinned(group_artifact: &str, version: &str) -> Self {
        Self {
            group_artifact: group_artifact.to_string(),
            version: version.to_string(),
        }
    }

    /// The `group:artifact` identifier.
    pub fn group_artifact(&self) -> &str {
        &self.group_artifact
    }

    /// The pinned version string.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl FromStr for DependencyCoordinate {
    type Err = Error;

    /// Parse a `group:artifact:version` string.
    ///
    /// The version is the segment after the last colon; everything before
    /// it is the `group:artifact` identifier.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.rsplitn(2, ':');
        let version = parts.next().unwrap_or_default();
        let group_artifact = parts.next().unwrap_or_default();
        if group_artifact.is_empty() || version.is_empty() {
            return Err(Error::InvalidCoordinate {
                coordinate: s.to_string(),
            });
        }
        Ok(Self {
            group_artifact: group_artifact.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_artifact, self.version)
    }
}

impl TryFrom<String> for DependencyCoordinate {
    type Error = Error;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DependencyCoordinate> for String {
    fn from(coordinate: DependencyCoordinate) -> Self {
        coordinate.to_string()
    }
}
