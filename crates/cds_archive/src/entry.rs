//! Classpath entries and the ordered fingerprint they form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// What a classpath root turned out to be when it was stat'ed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file (a jar or other class archive).
    Archive,
    /// A directory of class files.
    Directory,
    /// The path could not be stat'ed at capture time.
    Missing,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Archive => write!(f, "archive"),
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::Missing => write!(f, "missing"),
        }
    }
}

/// A last-modified timestamp relative to the Unix epoch.
///
/// `nanos` is always in `0..1_000_000_000`; instants before the epoch have a
/// negative `secs` and a non-negative `nanos` offset forward from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModifiedTime {
    /// Whole seconds since the epoch.
    pub secs: i64,
    /// Sub-second nanoseconds.
    pub nanos: u32,
}

impl ModifiedTime {
    /// The epoch itself; recorded for entries that do not exist.
    pub const ZERO: ModifiedTime = ModifiedTime { secs: 0, nanos: 0 };

    /// Converts a [`SystemTime`] into an epoch-relative timestamp.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => Self {
                secs: d.as_secs() as i64,
                nanos: d.subsec_nanos(),
            },
            Err(e) => {
                let d = e.duration();
                let secs = -(d.as_secs() as i64);
                match d.subsec_nanos() {
                    0 => Self { secs, nanos: 0 },
                    n => Self {
                        secs: secs - 1,
                        nanos: 1_000_000_000 - n,
                    },
                }
            }
        }
    }
}

impl fmt::Display for ModifiedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

/// The result of one stat call against a classpath root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryMetadata {
    /// The resolved (canonical) path.
    pub real_path: PathBuf,
    /// File or directory.
    pub kind: EntryKind,
    /// Size in bytes; directories report 0.
    pub size: u64,
    /// Last-modified time.
    pub modified: ModifiedTime,
}

/// One classpath root as captured at a point in time.
///
/// The identity key is [`path`](Self::path). Two entries at the same index
/// with the same path but a different kind, size or timestamp describe an
/// altered file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasspathEntry {
    /// Normalized path: the real path when the root exists, otherwise the
    /// lexically cleaned path as given.
    #[serde(with = "path_repr")]
    pub path: PathBuf,
    /// What the root was at capture time.
    pub kind: EntryKind,
    /// Size in bytes at capture time.
    pub size: u64,
    /// Last-modified time at capture time.
    pub modified: ModifiedTime,
    /// Position in the classpath, starting at 0.
    pub index: usize,
}

impl ClasspathEntry {
    /// Builds an entry from a classpath segment and the result of stat'ing it.
    pub fn captured(index: usize, given: &Path, metadata: Option<EntryMetadata>) -> Self {
        match metadata {
            Some(meta) => Self {
                path: meta.real_path,
                kind: meta.kind,
                size: meta.size,
                modified: meta.modified,
                index,
            },
            None => Self {
                path: given.components().collect(),
                kind: EntryKind::Missing,
                size: 0,
                modified: ModifiedTime::ZERO,
                index,
            },
        }
    }

    /// Returns `true` if the root existed when this entry was captured.
    pub fn exists(&self) -> bool {
        self.kind != EntryKind::Missing
    }
}

/// The ordered record of classpath entries captured at one point in time.
///
/// Order is significant. A fingerprint has no mutating accessors: once
/// built it is only read, compared and persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasspathFingerprint {
    entries: Vec<ClasspathEntry>,
}

impl ClasspathFingerprint {
    /// Builds a fingerprint, renumbering each entry's index to its position.
    pub fn from_entries(entries: Vec<ClasspathEntry>) -> Self {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| ClasspathEntry { index, ..entry })
            .collect();
        Self { entries }
    }

    /// Returns the entries in classpath order.
    pub fn entries(&self) -> &[ClasspathEntry] {
        &self.entries
    }

    /// Returns the entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ClasspathEntry> {
        self.entries.get(index)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the classpath had no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in classpath order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClasspathEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ClasspathFingerprint {
    type Item = &'a ClasspathEntry;
    type IntoIter = std::slice::Iter<'a, ClasspathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serde representation of entry paths.
///
/// Binary formats carry the raw OS bytes, so a real path that is not valid
/// UTF-8 still round-trips through the archive header. Human-readable
/// formats carry the displayed path.
mod path_repr {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::path::{Path, PathBuf};

    pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            return serializer.collect_str(&path.display());
        }
        to_bytes(path).map_err(S::Error::custom)?.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
        if deserializer.is_human_readable() {
            return PathBuf::deserialize(deserializer);
        }
        from_bytes(Vec::<u8>::deserialize(deserializer)?).map_err(D::Error::custom)
    }

    #[cfg(unix)]
    fn to_bytes(path: &Path) -> Result<&[u8], &'static str> {
        use std::os::unix::ffi::OsStrExt;
        Ok(path.as_os_str().as_bytes())
    }

    #[cfg(unix)]
    fn from_bytes(bytes: Vec<u8>) -> Result<PathBuf, &'static str> {
        use std::os::unix::ffi::OsStringExt;
        Ok(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
    }

    #[cfg(not(unix))]
    fn to_bytes(path: &Path) -> Result<&[u8], &'static str> {
        path.to_str()
            .map(str::as_bytes)
            .ok_or("path is not valid Unicode")
    }

    #[cfg(not(unix))]
    fn from_bytes(bytes: Vec<u8>) -> Result<PathBuf, &'static str> {
        String::from_utf8(bytes)
            .map(PathBuf::from)
            .map_err(|_| "path is not valid UTF-8")
    }
}
