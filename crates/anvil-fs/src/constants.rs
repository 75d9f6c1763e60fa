//! Constants and enums for well-known Anvil filesystem paths.

use std::path::Path;

/// Standard names under the Anvil user home and project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomePath {
    /// The `caches` directory (version-specific caches root)
    CachesDir,
    /// The `wrapper/dists` directory (installed wrapper distributions)
    WrapperDists,
    /// The `anvil.properties` file (user or project properties)
    PropertiesFile,
    /// The `gc.properties` marker (last cache cleanup timestamp)
    GcMarker,
    /// The `.anvil` directory (project configuration root)
    ConfigDir,
    /// The `plugins.toml` file (plugin resolution descriptor)
    PluginsFile,
    /// The `wrapper.toml` file (wrapper distribution settings)
    WrapperFile,
}

impl HomePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CachesDir => "caches",
            Self::WrapperDists => "wrapper/dists",
            Self::PropertiesFile => "anvil.properties",
            Self::GcMarker => "gc.properties",
            Self::ConfigDir => ".anvil",
            Self::PluginsFile => "plugins.toml",
            Self::WrapperFile => "wrapper.toml",
        }
    }
}

impl AsRef<Path> for HomePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for HomePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for HomePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
