//! Property files and the initial-properties view.
//!
//! `InitialProperties` is the immutable view of definitions available
//! before the build layout is known: the `-D`-style properties requested
//! on the command line. `BuildProperties` is the merged view assembled
//! once the user home and project root are known.

use std::collections::BTreeMap;

use anvil_fs::{HomePath, NormalizedPath, io};

use crate::Result;

/// Prefix marking entries of a properties file as system properties.
pub const SYSTEM_PROP_PREFIX: &str = "systemProp.";

/// Load a `key=value` properties file into a map.
///
/// Blank lines and lines starting with `#` are ignored. Lines without a
/// `=` separator are skipped with a warning rather than failing the load.
/// A missing file yields an empty map.
pub fn load_properties(path: &NormalizedPath) -> Result<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();

    if !path.is_file() {
        return Ok(properties);
    }

    let content = io::read_text(path)?;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                properties.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                tracing::warn!("Skipping malformed line in {}: {}", path, line);
            }
        }
    }

    Ok(properties)
}

/// An immutable view of the properties available prior to calculating the
/// build layout: the system properties defined on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialProperties {
    requested: BTreeMap<String, String>,
}

impl InitialProperties {
    /// Build the view from command-line `-D`-style definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            requested: definitions.into_iter().collect(),
        }
    }

    /// The system properties defined as command-line options.
    pub fn requested(&self) -> &BTreeMap<String, String> {
        &self.requested
    }

    /// Look up a single requested property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.requested.get(key).map(String::as_str)
    }
}

/// The merged property view for a located build.
///
/// Layering, weakest first: `systemProp.`-prefixed entries from the
/// project-root properties file, then the user-home file, then the
/// command-line definitions. Later layers override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties {
    properties: BTreeMap<String, String>,
}

impl BuildProperties {
    /// Assemble the merged view for a project root and user home.
    pub fn assemble(
        initial: &InitialProperties,
        user_home: &NormalizedPath,
        project_root: &NormalizedPath,
    ) -> Result<Self> {
        let mut properties = BTreeMap::new();

        for dir in [project_root, user_home] {
            let file = load_properties(&dir.join(HomePath::PropertiesFile))?;
            for (key, value) in file {
                if let Some(stripped) = key.strip_prefix(SYSTEM_PROP_PREFIX) {
                    properties.insert(stripped.to_string(), value);
                }
            }
        }

        for (key, value) in initial.requested() {
            properties.insert(key.clone(), value.clone());
        }

        Ok(Self { properties })
    }

    /// Look up a merged property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All merged properties, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
