//! User home services for the Anvil build engine.
//!
//! Everything the engine keeps per user rather than per project: the home
//! directory lookup, property layering, version-specific caches and their
//! cleanup, and wrapper distribution settings.

pub mod caches;
pub mod cleanup;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod properties;
pub mod wrapper;

pub use caches::{CacheDirScanner, VersionSpecificCacheDir};
pub use cleanup::{
    CleanupCounts, CleanupOutcome, CleanupProgressMonitor, HomeCleanupService, VersionCacheCleanup,
};
pub use error::{Error, Result};
pub use lookup::{default_user_home, user_home};
pub use properties::{BuildProperties, InitialProperties};
pub use wrapper::{DistributionLocator, DistributionType, PathBase, WrapperSettings};
