//! Plugin resolution descriptor for the Anvil build engine.
//!
//! This crate provides the static declaration the engine consumes during
//! its configuration phase: an ordered list of plugin-repository endpoints,
//! a pinned set of plugin dependencies, and the language compatibility
//! level for build-tooling code. The descriptor is pure data; resolving
//! coordinates against endpoints is the engine's job.

pub mod compatibility;
pub mod coordinate;
pub mod descriptor;
pub mod error;
pub mod loader;

pub use compatibility::CompatibilityLevel;
pub use coordinate::DependencyCoordinate;
pub use descriptor::{Endpoint, PluginDescriptor};
pub use error::{Error, Result};
pub use loader::DescriptorLoader;
