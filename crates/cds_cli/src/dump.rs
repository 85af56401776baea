//! `cds dump`: record the classpath fingerprint into a new archive.

use cds_archive::{Archive, EntryKind, FingerprintRecorder, OsFileSystem};
use cds_config::Overrides;
use tracing::warn;

use crate::settings;
use crate::{DumpArgs, GlobalArgs};

/// Runs the `cds dump` command.
///
/// Returns exit code 0 once the archive is written.
pub fn run(args: &DumpArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = Overrides {
        archive: args.archive.clone(),
        ..Overrides::default()
    };
    let settings = settings::resolve(global, &overrides)?;
    let archive_path = settings.archive_path()?;

    let payload = match args.payload {
        Some(ref path) => std::fs::read(path)
            .map_err(|e| format!("failed to read payload {}: {e}", path.display()))?,
        None => Vec::new(),
    };

    let fingerprint = FingerprintRecorder::new(&OsFileSystem).record(&args.classpath);
    for entry in fingerprint.iter().filter(|e| e.kind == EntryKind::Missing) {
        warn!(index = entry.index, path = %entry.path.display(), "classpath entry does not exist");
    }

    let entries = fingerprint.len();
    Archive::new(fingerprint, payload, env!("CARGO_PKG_VERSION")).write(archive_path)?;

    eprintln!(
        "   Dumped {entries} classpath entr{} to {}",
        if entries == 1 { "y" } else { "ies" },
        archive_path.display()
    );
    Ok(0)
}
