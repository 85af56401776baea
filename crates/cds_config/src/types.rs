//! Configuration types deserialized from `cds.toml`.

use cds_common::SharingMode;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// The top-level configuration parsed from `cds.toml`.
///
/// Every section is optional; an empty file is a valid configuration that
/// selects `auto` sharing with no archive and no diagnostic logging.
#[derive(Debug, Default, Deserialize)]
pub struct CdsConfig {
    /// Archive location and sharing mode.
    #[serde(default)]
    pub sharing: SharingConfig,
    /// Diagnostic logging selectors.
    #[serde(default)]
    pub log: LogConfig,
}

/// The `[sharing]` section.
#[derive(Debug, Default, Deserialize)]
pub struct SharingConfig {
    /// How strongly the run depends on the archive.
    #[serde(default)]
    pub mode: SharingMode,
    /// Path to the archive file.
    #[serde(default)]
    pub archive: Option<PathBuf>,
}

/// The `[log]` section.
#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// Log selectors such as `"class+path=info"`.
    ///
    /// Accepts either a single string or a list of strings.
    #[serde(default, deserialize_with = "deserialize_string_or_vec")]
    pub categories: Vec<String>,
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows TOML config to accept both `categories = "cds"` (string) and
/// `categories = ["cds", "class+path=info"]` (array of strings).
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Verbosity of a log category, ordered from quietest to noisiest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Category disabled.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warning,
    /// Informational detail.
    Info,
    /// Debug detail.
    Debug,
    /// Everything.
    Trace,
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(()),
        }
    }
}

/// A parsed `tag+tag[=level]` log selector.
///
/// Tags are stored sorted so `path+class` and `class+path` select the same
/// category. A selector without a level means `info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSelector {
    /// Sorted tag set naming the category.
    pub tags: Vec<String>,
    /// Level the category is enabled at.
    pub level: LogLevel,
}

impl LogSelector {
    /// Returns `true` if this selector names exactly `tags` and enables `level`.
    pub fn enables(&self, tags: &[&str], level: LogLevel) -> bool {
        let mut wanted: Vec<&str> = tags.to_vec();
        wanted.sort_unstable();
        self.tags.iter().map(String::as_str).eq(wanted) && self.level >= level
    }

    /// Returns `true` if this selector names exactly `tags`, at any level.
    pub fn names(&self, tags: &[&str]) -> bool {
        let mut wanted: Vec<&str> = tags.to_vec();
        wanted.sort_unstable();
        self.tags.iter().map(String::as_str).eq(wanted)
    }
}

impl FromStr for LogSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLogSelector(s.to_string());
        let trimmed = s.trim();
        let (tag_part, level) = match trimmed.split_once('=') {
            Some((tags, level)) => (tags, level.parse().map_err(|_| invalid())?),
            None => (trimmed, LogLevel::Info),
        };

        let mut tags = Vec::new();
        for tag in tag_part.split('+') {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid());
            }
            tags.push(tag.to_string());
        }
        tags.sort_unstable();
        tags.dedup();

        Ok(LogSelector { tags, level })
    }
}
