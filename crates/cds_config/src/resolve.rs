//! Settings resolution: merging `cds.toml` with command-line overrides.

use crate::error::ConfigError;
use crate::types::{CdsConfig, LogLevel, LogSelector};
use cds_common::SharingMode;
use std::path::{Path, PathBuf};

/// Tag set of the classpath validator's diagnostic logging category.
pub const CLASS_PATH_TAGS: &[&str] = &["class", "path"];

/// Values given on the command line, each overriding its file counterpart.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--share`.
    pub mode: Option<SharingMode>,
    /// `--archive`.
    pub archive: Option<PathBuf>,
    /// `--log`, applied after the file's selectors.
    pub log: Vec<String>,
}

/// A fully resolved, immutable view of the settings for one load attempt.
///
/// Built once per process and passed by reference to the policy and the
/// reporter, so neither consults ambient process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Effective sharing mode.
    pub mode: SharingMode,
    /// Effective archive path, if any was configured.
    pub archive: Option<PathBuf>,
    /// Whether the `class+path` category is enabled at `info` or above.
    pub class_path_logging: bool,
}

impl Settings {
    /// Creates settings directly, without a configuration file.
    pub fn new(mode: SharingMode, class_path_logging: bool) -> Self {
        Self {
            mode,
            archive: None,
            class_path_logging,
        }
    }

    /// Returns the archive path or a `MissingField` error naming the setting.
    pub fn archive_path(&self) -> Result<&Path, ConfigError> {
        self.archive
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("sharing.archive".to_string()))
    }
}

/// Resolves the effective settings from a configuration and overrides.
///
/// Scalar overrides replace file values. Log selectors are applied in order,
/// file first, and the last selector naming the `class+path` category decides
/// whether it is enabled.
pub fn resolve_settings(config: &CdsConfig, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let mut class_path_logging = false;
    for raw in config.log.categories.iter().chain(&overrides.log) {
        let selector: LogSelector = raw.parse()?;
        if selector.names(CLASS_PATH_TAGS) {
            class_path_logging = selector.enables(CLASS_PATH_TAGS, LogLevel::Info);
        }
    }

    Ok(Settings {
        mode: overrides.mode.unwrap_or(config.sharing.mode),
        archive: overrides
            .archive
            .clone()
            .or_else(|| config.sharing.archive.clone()),
        class_path_logging,
    })
}
