//! Error types for anvil-home

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] anvil_fs::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine a home directory for the current user")]
    HomeDirUnavailable,

    #[error(
        "Release retention ({releases} days) must be at least snapshot retention ({snapshots} days)"
    )]
    InvalidRetention { releases: u64, snapshots: u64 },

    #[error("Invalid distribution URL: {url}")]
    InvalidDistributionUrl { url: String },

    #[error("Invalid distribution type: {value}. Expected one of: bin, all")]
    InvalidDistributionType { value: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
