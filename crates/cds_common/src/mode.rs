//! The sharing-mode selector: how strongly a run depends on the archive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller-declared tolerance for an unusable shared archive.
///
/// Parses from `"off"`, `"auto"` and `"required"` (with `"on"` accepted as
/// an alias for `"required"`), case-insensitively.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharingMode {
    /// Sharing is disabled by the caller.
    Off,
    /// Use the archive when it validates, otherwise fall back silently.
    #[default]
    Auto,
    /// The archive must be usable; any mismatch is fatal.
    #[serde(alias = "on")]
    Required,
}

impl SharingMode {
    /// Returns `true` if a mismatch under this mode terminates the process.
    pub fn is_strict(self) -> bool {
        self == SharingMode::Required
    }
}

impl fmt::Display for SharingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingMode::Off => write!(f, "off"),
            SharingMode::Auto => write!(f, "auto"),
            SharingMode::Required => write!(f, "required"),
        }
    }
}

/// Error returned when a string names no known sharing mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sharing mode '{input}' (expected off, auto, required or on)")]
pub struct ParseSharingModeError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for SharingMode {
    type Err = ParseSharingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(SharingMode::Off),
            "auto" => Ok(SharingMode::Auto),
            "required" | "on" => Ok(SharingMode::Required),
            _ => Err(ParseSharingModeError {
                input: s.to_string(),
            }),
        }
    }
}
