//! Error types for configuration loading and validation.

/// Errors that can occur when loading or resolving a `cds.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required setting was given neither in the file nor on the command line.
    #[error("missing required setting: {0}")]
    MissingField(String),

    /// A log selector could not be understood.
    #[error("invalid log selector '{0}'")]
    InvalidLogSelector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("sharing.archive".to_string());
        assert_eq!(format!("{err}"), "missing required setting: sharing.archive");
    }

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("expected '=' at line 3".to_string());
        assert_eq!(
            format!("{err}"),
            "failed to parse configuration: expected '=' at line 3"
        );
    }

    #[test]
    fn display_invalid_log_selector() {
        let err = ConfigError::InvalidLogSelector("class+path=loud".to_string());
        assert_eq!(format!("{err}"), "invalid log selector 'class+path=loud'");
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::IoError(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
