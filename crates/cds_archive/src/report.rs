//! Rendering of verdicts and actions into diagnostic lines.
//!
//! The exact wording here is a contract: callers and tests match on the
//! headline, the generic mismatch line and the two altered-entry lines.

use cds_config::Settings;
use cds_diagnostics::{Diagnostic, DiagnosticSink};

use crate::error::ArchiveError;
use crate::policy::{mismatch_detail, Action, MismatchDetail};
use crate::validator::ValidationVerdict;

/// Headline written whenever a required archive cannot be used.
pub const UNABLE_TO_USE: &str = "Unable to use shared archive.";

/// Generic detail line for count, missing and order mismatches.
pub const CLASS_PATHS_MISMATCH: &str = "shared class paths mismatch";

/// Appended to the generic line when `class+path` logging is off.
pub const ENABLE_LOGGING_HINT: &str =
    " (hint: enable --log class+path=info to diagnose the failure)";

/// Whether the caller may keep running after the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Continue normally, with or without the archive.
    Continue,
    /// Terminate the process abnormally.
    Abort,
}

/// Turns policy output into diagnostics according to explicit settings.
pub struct Reporter<'a> {
    settings: &'a Settings,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter bound to one load attempt's settings.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Emits the diagnostics for `verdict` under `action` into `sink`.
    ///
    /// - [`Action::DisableAndAbort`]: always writes the headline and the
    ///   detail lines, then returns [`ReportOutcome::Abort`].
    /// - [`Action::DisableAndContinue`]: writes the detail lines only when
    ///   `class+path` logging is enabled.
    /// - [`Action::UseArchive`]: writes nothing.
    pub fn report(
        &self,
        verdict: &ValidationVerdict,
        action: Action,
        sink: &DiagnosticSink,
    ) -> ReportOutcome {
        match action {
            Action::UseArchive => ReportOutcome::Continue,
            Action::DisableAndContinue => {
                if self.settings.class_path_logging {
                    self.emit_explanation(verdict, sink);
                    match mismatch_detail(verdict) {
                        Some(MismatchDetail::Altered { .. }) => self.emit_altered(verdict, sink),
                        Some(MismatchDetail::Generic) => {
                            sink.emit(Diagnostic::warning(self.mismatch_line()).with_tag("cds"))
                        }
                        None => {}
                    }
                }
                ReportOutcome::Continue
            }
            Action::DisableAndAbort => {
                sink.emit(Diagnostic::error(UNABLE_TO_USE));
                if self.settings.class_path_logging {
                    self.emit_explanation(verdict, sink);
                }
                self.emit_altered(verdict, sink);
                sink.emit(Diagnostic::error(self.mismatch_line()));
                ReportOutcome::Abort
            }
        }
    }

    /// Emits the diagnostics for an archive file that could not be read.
    ///
    /// Fatal only under a strict mode; otherwise the archive is bypassed silently.
    pub fn report_unreadable(&self, error: &ArchiveError, sink: &DiagnosticSink) -> ReportOutcome {
        if !self.settings.mode.is_strict() {
            return ReportOutcome::Continue;
        }
        sink.emit(Diagnostic::error(UNABLE_TO_USE));
        sink.emit(Diagnostic::error(error.to_string()));
        ReportOutcome::Abort
    }

    fn mismatch_line(&self) -> String {
        if self.settings.class_path_logging {
            CLASS_PATHS_MISMATCH.to_string()
        } else {
            format!("{CLASS_PATHS_MISMATCH}{ENABLE_LOGGING_HINT}")
        }
    }

    fn emit_altered(&self, verdict: &ValidationVerdict, sink: &DiagnosticSink) {
        if let Some(MismatchDetail::Altered { path, change }) = mismatch_detail(verdict) {
            let path = path.display();
            sink.emit(
                Diagnostic::warning(format!(
                    "{path} is not the one used while building the shared archive file"
                ))
                .with_tag("cds"),
            );
            sink.emit(Diagnostic::warning(format!("{path} {change} has changed.")).with_tag("cds"));
        }
    }

    fn emit_explanation(&self, verdict: &ValidationVerdict, sink: &DiagnosticSink) {
        let message = match verdict {
            ValidationVerdict::Match => return,
            ValidationVerdict::CountMismatch { expected, actual } => {
                let relation = if actual < expected { "shorter" } else { "longer" };
                let noun = if *actual == 1 { "entry" } else { "entries" };
                format!(
                    "Run time classpath is {relation} than the one at dump time: {actual} {noun} vs {expected}"
                )
            }
            ValidationVerdict::EntryMissing { index, path } => {
                format!("Run time classpath entry [{index}] does not exist: {}", path.display())
            }
            ValidationVerdict::OrderMismatch {
                index,
                expected,
                actual,
            } => format!(
                "Run time classpath entry [{index}] differs from dump time: expected {}, found {}",
                expected.display(),
                actual.display()
            ),
            ValidationVerdict::EntryAltered { index, path, .. } => format!(
                "Run time classpath entry [{index}] was modified after dump time: {}",
                path.display()
            ),
        };
        sink.emit(Diagnostic::info(message).with_tag("class").with_tag("path"));
    }
}
