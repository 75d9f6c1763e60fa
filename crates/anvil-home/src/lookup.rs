//! User home directory lookup.
//!
//! Resolution order mirrors the engine launcher: an explicit property,
//! then the environment, then the default under the OS home directory.

use anvil_fs::{HomePath, NormalizedPath};

use crate::properties::InitialProperties;
use crate::{Error, Result};

/// Property key overriding the user home location.
pub const USER_HOME_PROPERTY: &str = "anvil.user.home";

/// Environment variable overriding the user home location.
pub const USER_HOME_ENV: &str = "ANVIL_USER_HOME";

/// Resolve the user home directory.
///
/// Precedence: the `anvil.user.home` property from the initial
/// properties, the `ANVIL_USER_HOME` environment variable, then
/// `<os home>/.anvil`.
pub fn user_home(initial: &InitialProperties) -> Result<NormalizedPath> {
    resolve(initial, std::env::var(USER_HOME_ENV).ok())
}

/// The default user home, `<os home>/.anvil`.
pub fn default_user_home() -> Result<NormalizedPath> {
    let base = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
    Ok(NormalizedPath::new(base).join(HomePath::ConfigDir))
}

fn resolve(initial: &InitialProperties, env_value: Option<String>) -> Result<NormalizedPath> {
    if let Some(path) = initial.get(USER_HOME_PROPERTY) {
        return Ok(NormalizedPath::new(path));
    }
    if let Some(path) = env_value.filter(|value| !value.is_empty()) {
        return Ok(NormalizedPath::new(path));
    }
    default_user_home()
}
