//! Language compatibility level for build-tooling code.
//!
//! One level is applied uniformly to source and target compilation.
//! The engine only supports the long-term-support levels below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A language-version baseline for compiling build-tooling code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum CompatibilityLevel {
    /// Level 8, the engine's default baseline.
    #[default]
    #[serde(rename = "8")]
    V8,
    /// Level 11.
    #[serde(rename = "11")]
    V11,
    /// Level 17.
    #[serde(rename = "17")]
    V17,
    /// Level 21.
    #[serde(rename = "21")]
    V21,
}

impl FromStr for CompatibilityLevel {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "8" | "1.8" => Ok(CompatibilityLevel::V8),
            "11" => Ok(CompatibilityLevel::V11),
            "17" => Ok(CompatibilityLevel::V17),
            "21" => Ok(CompatibilityLevel::V21),
            _ => Err(Error::UnsupportedLevel {
                level: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompatibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            CompatibilityLevel::V8 => "8",
            CompatibilityLevel::V11 => "11",
            CompatibilityLevel::V17 => "17",
            CompatibilityLevel::V21 => "21",
        };
        write!(f, "{}", level)
    }
}
