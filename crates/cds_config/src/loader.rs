//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{CdsConfig, LogSelector};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "cds.toml";

/// Loads and validates a configuration from an explicit file path.
pub fn load_config(path: &Path) -> Result<CdsConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CdsConfig, ConfigError> {
    let config: CdsConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Returns `<dir>/cds.toml` if it exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Rejects log selectors that would otherwise be silently ignored.
fn validate_config(config: &CdsConfig) -> Result<(), ConfigError> {
    for selector in &config.log.categories {
        selector.parse::<LogSelector>()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cds_common::SharingMode;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.sharing.mode, SharingMode::Auto);
        assert!(config.sharing.archive.is_none());
        assert!(config.log.categories.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[sharing]
mode = "required"
archive = "build/app.jsa"

[log]
categories = ["class+path=info"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.sharing.mode, SharingMode::Required);
        assert_eq!(
            config.sharing.archive.as_deref(),
            Some(Path::new("build/app.jsa"))
        );
        assert_eq!(config.log.categories, vec!["class+path=info"]);
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_mode_errors() {
        let err = load_config_from_str("[sharing]\nmode = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn bad_log_selector_errors() {
        let err = load_config_from_str("[log]\ncategories = \"class+path=loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogSelector(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[sharing]\nmode = \"off\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.sharing.mode, SharingMode::Off);
    }

    #[test]
    fn find_config_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config(dir.path()).is_none());
        std::fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        assert_eq!(find_config(dir.path()), Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn io_error_from_nonexistent_file() {
        let err = load_config(Path::new("/nonexistent/dir/cds.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
