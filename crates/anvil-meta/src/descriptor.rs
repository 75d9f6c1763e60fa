//! Plugin resolution descriptor - loaded from .anvil/plugins.toml
//!
//! The descriptor declares where the engine resolves build plugins from and
//! which plugins the build-tooling module requires. It is read once during
//! the configuration phase and never mutated afterwards.
//!
//! # Example TOML
//!
//! ```toml
//! [compatibility]
//! level = "8"
//!
//! [[repositories]]
//! url = "https://mirror.anvil-build.org/plugin-releases"
//!
//! [[repositories]]
//! url = "https://plugins.anvil-build.org/m2"
//!
//! [dependencies]
//! plugins = [
//!     "org.anvil.dsl:dsl-plugin:2.1.4",
//!     "org.anvil.dsl:dsl-conventions:0.7.0",
//! ]
//! ```

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::compatibility::CompatibilityLevel;
use crate::coordinate::DependencyCoordinate;
use crate::error::Error;

/// One plugin-repository endpoint.
///
/// Endpoints are kept in declaration order; the engine queries them first
/// to last and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Create an endpoint from a URL string.
    ///
    /// The URL must be non-empty and scheme-qualified. Reachability is the
    /// engine's concern.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        let url = url.into();
        if url.is_empty() || !url.contains("://") {
            return Err(Error::InvalidEndpoint { url });
        }
        Ok(Self { url })
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// The immutable plugin resolution descriptor.
///
/// A single snapshot: no states, no transitions, no side effects. All
/// accessors are pure reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    endpoints: Vec<Endpoint>,
    dependencies: BTreeSet<DependencyCoordinate>,
    compatibility: CompatibilityLevel,
}

impl PluginDescriptor {
    /// Assemble a descriptor from validated parts.
    pub fn new(
        endpoints: Vec<Endpoint>,
        dependencies: BTreeSet<DependencyCoordinate>,
        compatibility: CompatibilityLevel,
    ) -> Self {
        Self {
            endpoints,
            dependencies,
            compatibility,
        }
    }

    /// The engine's built-in descriptor, used when a project declares none.
    ///
    /// Carries the default endpoint chain (mirror, releases, release
    /// candidates, portal) and the standard build-script plugin set.
    pub fn builtin() -> Self {
        let endpoints = vec![
            Endpoint {
                url: "https://mirror.anvil-build.org/plugin-releases".to_string(),
            },
            Endpoint {
                url: "https://repo.anvil-build.org/libs-releases".to_string(),
            },
            Endpoint {
                url: "https://repo.anvil-build.org/libs-release-candidates".to_string(),
            },
            Endpoint {
                url: "https://plugins.anvil-build.org/m2".to_string(),
            },
        ];
        let dependencies = [
            DependencyCoordinate::pinned("org.anvil.dsl:dsl-plugin", "2.1.4"),
            DependencyCoordinate::pinned("org.anvil.dsl:dsl-conventions", "0.7.0"),
        ]
        .into_iter()
        .collect();

        Self {
            endpoints,
            dependencies,
            compatibility: CompatibilityLevel::V8,
        }
    }

    /// Endpoints in declaration order. No filtering, no reordering.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// The fixed dependency set, keyed by coordinate identity.
    pub fn dependencies(&self) -> &BTreeSet<DependencyCoordinate> {
        &self.dependencies
    }

    /// The single pinned compatibility level.
    pub fn compatibility_level(&self) -> CompatibilityLevel {
        self.compatibility
    }

    /// Compatibility level for source compilation.
    ///
    /// Always equal to [`Self::target_compatibility`].
    pub fn source_compatibility(&self) -> CompatibilityLevel {
        self.compatibility
    }

    /// Compatibility level for target bytecode.
    ///
    /// Always equal to [`Self::source_compatibility`].
    pub fn target_compatibility(&self) -> CompatibilityLevel {
        self.compatibility
    }
}

/// Raw `plugins.toml` document shape, validated into a [`PluginDescriptor`].
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DescriptorFile {
    #[serde(default)]
    repositories: Vec<RepositorySection>,
    #[serde(default)]
    dependencies: DependenciesSection,
    #[serde(default)]
    compatibility: CompatibilitySection,
}

/// One `[[repositories]]` entry.
#[derive(Debug, Deserialize)]
struct RepositorySection {
    url: String,
}

/// The `[dependencies]` section.
#[derive(Debug, Default, Deserialize)]
struct DependenciesSection {
    #[serde(default)]
    plugins: Vec<String>,
}

/// The `[compatibility]` section.
///
/// Either a single `level`, or an explicit `source`/`target` pair that
/// must agree.
#[derive(Debug, Default, Deserialize)]
struct CompatibilitySection {
    level: Option<CompatibilityLevel>,
    source: Option<CompatibilityLevel>,
    target: Option<CompatibilityLevel>,
}

impl CompatibilitySection {
    fn resolve(&self) -> Result<CompatibilityLevel, Error> {
        let declared: Vec<CompatibilityLevel> = [self.level, self.source, self.target]
            .into_iter()
            .flatten()
            .collect();

        match declared.as_slice() {
            [] => Ok(CompatibilityLevel::default()),
            [first, rest @ ..] => {
                if let Some(other) = rest.iter().find(|level| *level != first) {
                    return Err(Error::CompatibilityMismatch {
                        source_level: first.to_string(),
                        target: other.to_string(),
                    });
                }
                Ok(*first)
            }
        }
    }
}

impl TryFrom<DescriptorFile> for PluginDescriptor {
    type Error = Error;

    fn try_from(file: DescriptorFile) -> Result<Self, Self::Error> {
        let endpoints = file
            .repositories
            .into_iter()
            .map(|section| Endpoint::new(section.url))
            .collect::<Result<Vec<_>, _>>()?;

        let dependencies = file
            .dependencies
            .plugins
            .iter()
            .map(|coordinate| coordinate.parse())
            .collect::<Result<BTreeSet<_>, _>>()?;

        let compatibility = file.compatibility.resolve()?;

        Ok(PluginDescriptor {
            endpoints,
            dependencies,
            compatibility,
        })
    }
}
