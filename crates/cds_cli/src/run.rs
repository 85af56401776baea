//! `cds run`: validate the current classpath against an archive.
//!
//! 1. Resolve settings from `cds.toml` and the command line
//! 2. Read the archive and recompute the classpath fingerprint
//! 3. Decide what to do under the sharing mode
//! 4. Render the diagnostics and map the outcome to an exit code

use cds_archive::{Action, ArchiveLoader, OsFileSystem, ReportOutcome};
use cds_config::Overrides;
use cds_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use tracing::info;

use crate::settings;
use crate::{GlobalArgs, RunArgs};

/// Runs the `cds run` command.
///
/// Returns exit code 1 when the archive is required but unusable, 0 otherwise.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = Overrides {
        mode: args.share,
        archive: args.archive.clone(),
        log: args.log.clone(),
    };
    let settings = settings::resolve(global, &overrides)?;
    let archive_path = settings.archive_path()?;

    let sink = DiagnosticSink::new();
    let decision = ArchiveLoader::new(&settings, &OsFileSystem).load(archive_path, &args.classpath, &sink);

    let renderer = TerminalRenderer::new(global.color);
    eprint!("{}", renderer.render_all(&sink.take_all()));

    match decision.action {
        Action::UseArchive => {
            let bytes = decision.payload.as_ref().map_or(0, Vec::len);
            info!(archive = %archive_path.display(), bytes, "using shared archive");
        }
        Action::DisableAndContinue => {
            info!(archive = %archive_path.display(), "continuing without shared archive");
        }
        Action::DisableAndAbort => {}
    }

    Ok(match decision.outcome {
        ReportOutcome::Continue => 0,
        ReportOutcome::Abort => 1,
    })
}
