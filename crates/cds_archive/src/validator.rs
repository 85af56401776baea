//! Comparison of the stored fingerprint against the current classpath.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::entry::{ClasspathEntry, ClasspathFingerprint};
use crate::fs::MetadataSource;
use crate::recorder::FingerprintRecorder;

/// Which identity attribute of an entry changed since dump time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryChange {
    /// The entry switched between file, directory and missing.
    Kind,
    /// The last-modified time differs.
    Timestamp,
    /// The size differs while the timestamp is unchanged.
    Size,
}

impl fmt::Display for EntryChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryChange::Kind => write!(f, "type"),
            EntryChange::Timestamp => write!(f, "timestamp"),
            EntryChange::Size => write!(f, "size"),
        }
    }
}

/// The classified outcome of comparing a stored fingerprint with the current classpath.
///
/// When several conditions hold at once the first applicable rule wins, in
/// declaration order after `Match`: a count difference hides everything
/// else, any missing entry beats any reordering, and any reordering beats
/// any altered entry. Within one class the lowest index is reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationVerdict {
    /// Every entry matches on path, existence, size and timestamp.
    Match,
    /// The classpaths have a different number of entries.
    CountMismatch {
        /// Entry count recorded at dump time.
        expected: usize,
        /// Entry count of the current classpath.
        actual: usize,
    },
    /// An entry that existed at dump time no longer exists.
    EntryMissing {
        /// Position in the classpath.
        index: usize,
        /// The current (missing) path.
        path: PathBuf,
    },
    /// The entry at this position is a different path than at dump time.
    OrderMismatch {
        /// Position in the classpath.
        index: usize,
        /// Path recorded at dump time.
        expected: PathBuf,
        /// Path found now.
        actual: PathBuf,
    },
    /// Same path at the same position, but it has changed on disk.
    EntryAltered {
        /// Position in the classpath.
        index: usize,
        /// The entry's path.
        path: PathBuf,
        /// What changed.
        change: EntryChange,
    },
}

/// Validates a stored fingerprint against a classpath string.
///
/// Created per load attempt. The validator only stats paths through its
/// [`MetadataSource`]; it never writes anything and keeps no state between
/// calls, so repeated calls over an unchanged filesystem agree.
pub struct ClasspathValidator<'a, S: ?Sized> {
    recorder: FingerprintRecorder<'a, S>,
}

impl<'a, S: MetadataSource + ?Sized> ClasspathValidator<'a, S> {
    /// Creates a validator over `source` using the platform separator.
    pub fn new(source: &'a S) -> Self {
        Self {
            recorder: FingerprintRecorder::new(source),
        }
    }

    /// Uses `separator` instead of the platform separator.
    pub fn with_separator(self, separator: char) -> Self {
        Self {
            recorder: self.recorder.with_separator(separator),
        }
    }

    /// Recomputes the fingerprint of `current_classpath` and compares it with `stored`.
    pub fn validate(
        &self,
        stored: &ClasspathFingerprint,
        current_classpath: &str,
    ) -> ValidationVerdict {
        let current = self.recorder.record(current_classpath);
        let verdict = compare_fingerprints(stored, &current);
        debug!(target: "cds::class_path", ?verdict, "classpath validation finished");
        verdict
    }
}

/// Compares two fingerprints under the verdict priority rules.
pub fn compare_fingerprints(
    stored: &ClasspathFingerprint,
    current: &ClasspathFingerprint,
) -> ValidationVerdict {
    if stored.len() != current.len() {
        return ValidationVerdict::CountMismatch {
            expected: stored.len(),
            actual: current.len(),
        };
    }

    let pairs = || stored.iter().zip(current.iter());

    for (index, (was, now)) in pairs().enumerate() {
        debug!(
            target: "cds::class_path",
            index,
            expected = %was.path.display(),
            actual = %now.path.display(),
            "checking shared classpath entry"
        );
    }

    if let Some((_, now)) = pairs().find(|(was, now)| was.exists() && !now.exists()) {
        return ValidationVerdict::EntryMissing {
            index: now.index,
            path: now.path.clone(),
        };
    }

    if let Some((was, now)) = pairs().find(|(was, now)| was.path != now.path) {
        return ValidationVerdict::OrderMismatch {
            index: now.index,
            expected: was.path.clone(),
            actual: now.path.clone(),
        };
    }

    for (was, now) in pairs() {
        if let Some(change) = detect_change(was, now) {
            return ValidationVerdict::EntryAltered {
                index: now.index,
                path: now.path.clone(),
                change,
            };
        }
    }

    ValidationVerdict::Match
}

fn detect_change(was: &ClasspathEntry, now: &ClasspathEntry) -> Option<EntryChange> {
    if was.kind != now.kind {
        Some(EntryChange::Kind)
    } else if was.modified != now.modified {
        Some(EntryChange::Timestamp)
    } else if was.size != now.size {
        Some(EntryChange::Size)
    } else {
        None
    }
}
