//! Sharing-mode policy: what to do with the archive given a verdict.

use std::path::PathBuf;

use cds_common::SharingMode;

use crate::validator::{EntryChange, ValidationVerdict};

/// What the archive-loading subsystem should do after validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// The classpath matches; use the cached metadata.
    UseArchive,
    /// The archive is unusable and the mode requires it; terminate abnormally.
    DisableAndAbort,
    /// Bypass the archive and carry on with ordinary loading.
    DisableAndContinue,
}

/// Which wording a mismatch is reported with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MismatchDetail {
    /// The generic "shared class paths mismatch" line.
    Generic,
    /// The two-line altered-entry warning for `path`.
    Altered {
        /// The altered entry's path.
        path: PathBuf,
        /// What changed.
        change: EntryChange,
    },
}

/// Maps a sharing mode and a verdict to an action.
///
/// A matching classpath is always used. Any mismatch aborts under
/// [`SharingMode::Required`] and is silently bypassed otherwise.
pub fn decide(mode: SharingMode, verdict: &ValidationVerdict) -> Action {
    match verdict {
        ValidationVerdict::Match => Action::UseArchive,
        ValidationVerdict::CountMismatch { .. }
        | ValidationVerdict::EntryMissing { .. }
        | ValidationVerdict::OrderMismatch { .. }
        | ValidationVerdict::EntryAltered { .. } => match mode {
            SharingMode::Required => Action::DisableAndAbort,
            SharingMode::Auto | SharingMode::Off => Action::DisableAndContinue,
        },
    }
}

/// Returns the wording for a mismatch verdict, or `None` for a match.
pub fn mismatch_detail(verdict: &ValidationVerdict) -> Option<MismatchDetail> {
    match verdict {
        ValidationVerdict::Match => None,
        ValidationVerdict::CountMismatch { .. }
        | ValidationVerdict::EntryMissing { .. }
        | ValidationVerdict::OrderMismatch { .. } => Some(MismatchDetail::Generic),
        ValidationVerdict::EntryAltered { path, change, .. } => Some(MismatchDetail::Altered {
            path: path.clone(),
            change: *change,
        }),
    }
}
