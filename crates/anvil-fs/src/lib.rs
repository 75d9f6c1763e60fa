//! Filesystem abstraction for the Anvil build engine
//!
//! Provides normalized path handling, safe I/O, and format-agnostic
//! configuration loading for the configuration and user-home crates.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::HomePath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
