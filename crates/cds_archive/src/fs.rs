//! Filesystem snapshot abstraction used by the recorder and the validator.
//!
//! Everything that touches the disk goes through [`MetadataSource`], a
//! mapping from path to optional metadata. [`OsFileSystem`] is the real
//! implementation; [`FsSnapshot`] is an in-memory one, and any
//! `Fn(&Path) -> Option<EntryMetadata>` closure works too.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::entry::{EntryKind, EntryMetadata, ModifiedTime};

/// Read-only view of the filesystem: path in, metadata out.
///
/// Any failure to stat is `None`. Callers never see an I/O error class; a
/// path that cannot be stat'ed is simply missing.
pub trait MetadataSource {
    /// Stats `path`, returning `None` if it does not exist or cannot be read.
    fn metadata(&self, path: &Path) -> Option<EntryMetadata>;
}

impl<F> MetadataSource for F
where
    F: Fn(&Path) -> Option<EntryMetadata>,
{
    fn metadata(&self, path: &Path) -> Option<EntryMetadata> {
        self(path)
    }
}

/// The real filesystem, via `std::fs::metadata` and `std::fs::canonicalize`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileSystem;

impl MetadataSource for OsFileSystem {
    fn metadata(&self, path: &Path) -> Option<EntryMetadata> {
        let meta = std::fs::metadata(path).ok()?;
        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Archive
        };
        let size = match kind {
            EntryKind::Directory => 0,
            _ => meta.len(),
        };
        let modified = meta
            .modified()
            .map(ModifiedTime::from_system_time)
            .unwrap_or(ModifiedTime::ZERO);
        let real_path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        Some(EntryMetadata {
            real_path,
            kind,
            size,
            modified,
        })
    }
}

/// An in-memory filesystem snapshot keyed by the path as it appears in the classpath.
#[derive(Clone, Debug, Default)]
pub struct FsSnapshot {
    files: BTreeMap<PathBuf, EntryMetadata>,
}

impl FsSnapshot {
    /// Creates an empty snapshot in which every path is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a jar-like file whose real path equals `path`.
    pub fn with_archive(mut self, path: impl Into<PathBuf>, size: u64, secs: i64) -> Self {
        self.insert(path, EntryKind::Archive, size, ModifiedTime { secs, nanos: 0 });
        self
    }

    /// Adds a directory whose real path equals `path`.
    pub fn with_directory(mut self, path: impl Into<PathBuf>, secs: i64) -> Self {
        self.insert(path, EntryKind::Directory, 0, ModifiedTime { secs, nanos: 0 });
        self
    }

    /// Inserts or replaces the metadata for `path`.
    pub fn insert(
        &mut self,
        path: impl Into<PathBuf>,
        kind: EntryKind,
        size: u64,
        modified: ModifiedTime,
    ) {
        let path = path.into();
        self.files.insert(
            path.clone(),
            EntryMetadata {
                real_path: path,
                kind,
                size,
                modified,
            },
        );
    }

    /// Removes `path`, making it missing.
    pub fn remove(&mut self, path: &Path) {
        self.files.remove(path);
    }
}

impl MetadataSource for FsSnapshot {
    fn metadata(&self, path: &Path) -> Option<EntryMetadata> {
        self.files.get(path).cloned()
    }
}
