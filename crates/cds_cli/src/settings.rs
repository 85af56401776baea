//! Loading `cds.toml` and merging it with command-line overrides.

use std::path::Path;

use cds_config::{CdsConfig, Overrides, Settings};
use tracing::debug;

use crate::GlobalArgs;

/// Loads the configuration file.
///
/// `--config` names the file explicitly and must exist. Otherwise `cds.toml`
/// in the current directory is used if present, and defaults if not.
pub fn load_file_config(global: &GlobalArgs) -> Result<CdsConfig, Box<dyn std::error::Error>> {
    if let Some(ref path) = global.config {
        return load_from(path);
    }
    match cds_config::find_config(&std::env::current_dir()?) {
        Some(path) => load_from(&path),
        None => {
            debug!("no cds.toml found, using defaults");
            Ok(CdsConfig::default())
        }
    }
}

/// Resolves the effective settings for one command.
pub fn resolve(
    global: &GlobalArgs,
    overrides: &Overrides,
) -> Result<Settings, Box<dyn std::error::Error>> {
    let config = load_file_config(global)?;
    let settings = cds_config::resolve_settings(&config, overrides)?;
    debug!(
        mode = %settings.mode,
        class_path_logging = settings.class_path_logging,
        "resolved settings"
    );
    Ok(settings)
}

/// Whether `class+path` logging ends up enabled for a run with these `--log` selectors.
///
/// Called before logging is initialised. A configuration error yields
/// `false` here and is reported when the command itself resolves settings.
pub fn class_path_logging(global: &GlobalArgs, log: &[String]) -> bool {
    let overrides = Overrides {
        log: log.to_vec(),
        ..Overrides::default()
    };
    resolve(global, &overrides).is_ok_and(|settings| settings.class_path_logging)
}

fn load_from(path: &Path) -> Result<CdsConfig, Box<dyn std::error::Error>> {
    debug!(path = %path.display(), "loading configuration");
    cds_config::load_config(path)
        .map_err(|e| format!("failed to load {}: {e}", path.display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cds_common::SharingMode;
    use std::path::PathBuf;

    fn global(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            color: false,
            config,
        }
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[sharing]\nmode = \"required\"\narchive = \"app.jsa\"\n[log]\ncategories = \"class+path=info\"\n",
        )
        .unwrap();

        let settings = resolve(&global(Some(path)), &Overrides::default()).unwrap();
        assert_eq!(settings.mode, SharingMode::Required);
        assert_eq!(settings.archive, Some(PathBuf::from("app.jsa")));
        assert!(settings.class_path_logging);
    }

    #[test]
    fn overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cds.toml");
        std::fs::write(&path, "[sharing]\nmode = \"required\"\n").unwrap();

        let overrides = Overrides {
            mode: Some(SharingMode::Auto),
            archive: Some(PathBuf::from("other.jsa")),
            log: vec!["class+path=info".to_string()],
        };
        let settings = resolve(&global(Some(path)), &overrides).unwrap();
        assert_eq!(settings.mode, SharingMode::Auto);
        assert_eq!(settings.archive, Some(PathBuf::from("other.jsa")));
        assert!(settings.class_path_logging);
    }

    #[test]
    fn class_path_logging_from_flags_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cds.toml");
        std::fs::write(&path, "[log]\ncategories = [\"class+path=info\"]\n").unwrap();

        let from_file = global(Some(path));
        assert!(class_path_logging(&from_file, &[]));
        assert!(!class_path_logging(&from_file, &["class+path=off".to_string()]));

        let bare = global(Some(dir.path().join("missing.toml")));
        assert!(!class_path_logging(&bare, &["class+path=info".to_string()]));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file_config(&global(Some(dir.path().join("nope.toml")))).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cds.toml");
        std::fs::write(&path, "[sharing]\nmode = \"sometimes\"\n").unwrap();
        assert!(load_file_config(&global(Some(path))).is_err());
    }
}
