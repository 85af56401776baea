//! Parsing and resolution of `cds.toml` sharing configuration.
//!
//! This crate reads the optional configuration file, merges command-line
//! overrides on top of it, and produces the immutable [`Settings`] value that
//! is threaded explicitly into the archive policy and reporter.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE};
pub use resolve::{resolve_settings, Overrides, Settings, CLASS_PATH_TAGS};
pub use types::*;
