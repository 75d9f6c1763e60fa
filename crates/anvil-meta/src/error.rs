//! Error types for anvil-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] anvil_fs::Error),

    #[error("Invalid descriptor at {path}: {message}")]
    InvalidDescriptor { path: PathBuf, message: String },

    #[error("Invalid dependency coordinate: {coordinate}")]
    InvalidCoordinate { coordinate: String },

    #[error("Invalid repository endpoint: {url}")]
    InvalidEndpoint { url: String },

    #[error("Unsupported compatibility level: {level}")]
    UnsupportedLevel { level: String },

    #[error("Source compatibility {source_level} does not match target compatibility {target}")]
    CompatibilityMismatch { source_level: String, target: String },
}
