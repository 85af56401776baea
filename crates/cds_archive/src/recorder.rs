//! Classpath parsing and fingerprint capture.
//!
//! The same parsing and capture rules run at dump time and at load time, so
//! a classpath string that has not changed, over a filesystem that has not
//! changed, always captures to an equal fingerprint.

use std::path::Path;

use tracing::{debug, trace};

use crate::entry::{ClasspathEntry, ClasspathFingerprint};
use crate::fs::MetadataSource;

/// The platform's classpath delimiter.
#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';

/// The platform's classpath delimiter.
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = ':';

/// Splits a classpath string into its non-empty segments, in order.
///
/// Empty segments (from leading, trailing or doubled separators) are
/// dropped. Nothing is rejected: a malformed string simply yields different
/// segments than intended.
pub fn split_classpath(classpath: &str, separator: char) -> Vec<&str> {
    classpath
        .split(separator)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Captures an ordered [`ClasspathFingerprint`] from a classpath string.
///
/// Each segment is stat'ed once through the [`MetadataSource`]; roots that
/// cannot be stat'ed are recorded as [`Missing`](crate::EntryKind::Missing)
/// rather than dropped, so recording never fails.
pub struct FingerprintRecorder<'a, S: ?Sized> {
    source: &'a S,
    separator: char,
}

impl<'a, S: MetadataSource + ?Sized> FingerprintRecorder<'a, S> {
    /// Creates a recorder over `source` using the platform separator.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            separator: PATH_SEPARATOR,
        }
    }

    /// Uses `separator` instead of the platform separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Captures the fingerprint of `classpath` as the filesystem is right now.
    pub fn record(&self, classpath: &str) -> ClasspathFingerprint {
        let entries: Vec<ClasspathEntry> = split_classpath(classpath, self.separator)
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                let given = Path::new(segment);
                let entry = ClasspathEntry::captured(index, given, self.source.metadata(given));
                trace!(
                    target: "cds::class_path",
                    index,
                    path = %entry.path.display(),
                    kind = %entry.kind,
                    size = entry.size,
                    "captured classpath entry"
                );
                entry
            })
            .collect();

        debug!(target: "cds::class_path", entries = entries.len(), "recorded classpath fingerprint");
        ClasspathFingerprint::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use crate::fs::{FsSnapshot, OsFileSystem};
    use std::path::PathBuf;

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!(split_classpath("a.jar::b.jar:", ':'), vec!["a.jar", "b.jar"]);
        assert_eq!(split_classpath(":::", ':'), Vec::<&str>::new());
        assert_eq!(split_classpath("", ':'), Vec::<&str>::new());
    }

    #[test]
    fn split_keeps_order_and_duplicates() {
        assert_eq!(
            split_classpath("b;a;b", ';'),
            vec!["b", "a", "b"]
        );
    }

    #[test]
    fn record_preserves_order() {
        let fs = FsSnapshot::new()
            .with_archive("/lib/a.jar", 10, 100)
            .with_directory("/classes", 200)
            .with_archive("/lib/b.jar", 20, 300);
        let fp = FingerprintRecorder::new(&fs)
            .with_separator(':')
            .record("/lib/b.jar:/classes:/lib/a.jar");

        let paths: Vec<&Path> = fp.iter().map(|e| e.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("/lib/b.jar"),
                Path::new("/classes"),
                Path::new("/lib/a.jar")
            ]
        );
        assert_eq!(fp.get(1).unwrap().kind, EntryKind::Directory);
        assert_eq!(fp.get(2).unwrap().size, 10);
        assert_eq!(fp.get(2).unwrap().index, 2);
    }

    #[test]
    fn record_missing_entry_is_kept() {
        let fs = FsSnapshot::new().with_archive("/lib/a.jar", 10, 100);
        let fp = FingerprintRecorder::new(&fs)
            .with_separator(':')
            .record("/lib/a.jar:/lib/gone.jar");
        assert_eq!(fp.len(), 2);
        assert_eq!(fp.get(1).unwrap().kind, EntryKind::Missing);
        assert_eq!(fp.get(1).unwrap().path, PathBuf::from("/lib/gone.jar"));
    }

    #[test]
    fn record_is_deterministic() {
        let fs = FsSnapshot::new()
            .with_archive("/lib/a.jar", 10, 100)
            .with_archive("/lib/b.jar", 20, 300);
        let recorder = FingerprintRecorder::new(&fs).with_separator(':');
        assert_eq!(
            recorder.record("/lib/a.jar:/lib/b.jar"),
            recorder.record("/lib/a.jar:/lib/b.jar")
        );
    }

    #[test]
    fn record_empty_classpath() {
        let fs = FsSnapshot::new();
        let fp = FingerprintRecorder::new(&fs).record("");
        assert!(fp.is_empty());
    }

    #[test]
    fn record_real_files_canonicalizes() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("hello.jar");
        std::fs::write(&jar, b"hello").unwrap();
        let dotted = dir.path().join(".").join("hello.jar");

        let cp = dotted.to_string_lossy().into_owned();
        let fp = FingerprintRecorder::new(&OsFileSystem).record(&cp);
        assert_eq!(fp.len(), 1);
        let entry = fp.get(0).unwrap();
        assert_eq!(entry.path, std::fs::canonicalize(&jar).unwrap());
        assert_eq!(entry.kind, EntryKind::Archive);
        assert_eq!(entry.size, 5);
    }
}
