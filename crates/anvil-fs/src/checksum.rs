//! SHA-256 checksum utilities
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used for
//! distribution verification and collision-free install path derivation.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Strip the `sha256:` prefix from a canonical checksum.
///
/// Returns the input unchanged when the prefix is absent.
pub fn hex_digest(checksum: &str) -> &str {
    checksum.strip_prefix(PREFIX).unwrap_or(checksum)
}
