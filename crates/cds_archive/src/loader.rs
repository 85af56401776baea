//! One load attempt: read the archive, validate its classpath, decide, report.

use std::path::Path;

use cds_config::Settings;
use cds_diagnostics::DiagnosticSink;
use tracing::{debug, info};

use crate::error::ArchiveError;
use crate::fs::MetadataSource;
use crate::header::Archive;
use crate::policy::{decide, Action};
use crate::recorder::PATH_SEPARATOR;
use crate::report::{ReportOutcome, Reporter};
use crate::validator::{ClasspathValidator, ValidationVerdict};

/// Everything the archive-loading subsystem needs after a load attempt.
#[derive(Debug)]
pub struct LoadDecision {
    /// The verdict, or `None` when the archive file itself was unusable.
    pub verdict: Option<ValidationVerdict>,
    /// What to do with the archive.
    pub action: Action,
    /// Whether the process may continue.
    pub outcome: ReportOutcome,
    /// The cached payload, present only for [`Action::UseArchive`].
    pub payload: Option<Vec<u8>>,
    /// Why the archive file could not be used, if it could not be read.
    pub error: Option<ArchiveError>,
}

/// Runs a single validation of an archive against the current classpath.
///
/// Holds no state between loads; construct one per attempt.
pub struct ArchiveLoader<'a, S: ?Sized> {
    settings: &'a Settings,
    source: &'a S,
    separator: char,
}

impl<'a, S: MetadataSource + ?Sized> ArchiveLoader<'a, S> {
    /// Creates a loader bound to `settings` and a filesystem view.
    pub fn new(settings: &'a Settings, source: &'a S) -> Self {
        Self {
            settings,
            source,
            separator: PATH_SEPARATOR,
        }
    }

    /// Uses `separator` instead of the platform separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Reads the archive at `archive_path` and validates it against `classpath`.
    ///
    /// Diagnostics are emitted into `sink`; nothing is printed and the
    /// process is never terminated here.
    pub fn load(&self, archive_path: &Path, classpath: &str, sink: &DiagnosticSink) -> LoadDecision {
        let reporter = Reporter::new(self.settings);

        let archive = match Archive::read(archive_path) {
            Ok(archive) => archive,
            Err(error) => {
                debug!(path = %archive_path.display(), %error, "shared archive unreadable");
                let outcome = reporter.report_unreadable(&error, sink);
                let action = match outcome {
                    ReportOutcome::Abort => Action::DisableAndAbort,
                    ReportOutcome::Continue => Action::DisableAndContinue,
                };
                return LoadDecision {
                    verdict: None,
                    action,
                    outcome,
                    payload: None,
                    error: Some(error),
                };
            }
        };

        let verdict = self.validate(&archive, classpath);
        let action = decide(self.settings.mode, &verdict);
        let outcome = reporter.report(&verdict, action, sink);
        info!(mode = %self.settings.mode, ?action, "shared archive load decided");

        let payload = match action {
            Action::UseArchive => Some(archive.into_payload()),
            Action::DisableAndAbort | Action::DisableAndContinue => None,
        };

        LoadDecision {
            verdict: Some(verdict),
            action,
            outcome,
            payload,
            error: None,
        }
    }

    /// Validates an already-read archive against `classpath`.
    pub fn validate(&self, archive: &Archive, classpath: &str) -> ValidationVerdict {
        ClasspathValidator::new(self.source)
            .with_separator(self.separator)
            .validate(archive.fingerprint(), classpath)
    }
}
