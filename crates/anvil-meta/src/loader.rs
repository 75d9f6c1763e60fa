//! Loader for the plugin resolution descriptor from .anvil/
//!
//! Reads `plugins.toml` from the project's `.anvil/` directory:
//!
//! ```text
//! .anvil/
//!   plugins.toml
//! ```
//!
//! A project without a descriptor file gets the engine's built-in
//! descriptor, so loading always succeeds for well-formed projects.

use anvil_fs::{ConfigStore, HomePath, NormalizedPath};

use crate::descriptor::{DescriptorFile, PluginDescriptor};
use crate::{Error, Result};

/// Loads the plugin resolution descriptor for a project root.
pub struct DescriptorLoader {
    store: ConfigStore,
}

impl DescriptorLoader {
    /// Create a new DescriptorLoader.
    pub fn new() -> Self {
        Self {
            store: ConfigStore::new(),
        }
    }

    /// Path of the descriptor file under a project root.
    pub fn descriptor_path(root: &NormalizedPath) -> NormalizedPath {
        root.join(HomePath::ConfigDir).join(HomePath::PluginsFile)
    }

    /// Load the descriptor for the given project root.
    ///
    /// Returns the built-in descriptor when the project declares none.
    /// A present but malformed descriptor is an error; a missing one is not.
    pub fn load(&self, root: &NormalizedPath) -> Result<PluginDescriptor> {
        let path = Self::descriptor_path(root);

        if !path.is_file() {
            tracing::debug!("No descriptor at {}, using builtin", path);
            return Ok(PluginDescriptor::builtin());
        }

        let file: DescriptorFile = self.store.load(&path)?;
        file.try_into().map_err(|e: Error| Error::InvalidDescriptor {
            path: path.to_native(),
            message: e.to_string(),
        })
    }
}

impl Default for DescriptorLoader {
    fn default() -> Self {
        Self::new()
    }
}
