//! Classpath-consistency validation for the shared class-metadata archive.
//!
//! At dump time the [`FingerprintRecorder`] captures the ordered classpath
//! and the [`Archive`] persists it in its header next to the opaque payload.
//! At load time the [`ClasspathValidator`] recomputes the fingerprint of the
//! current classpath and classifies any difference as a
//! [`ValidationVerdict`]; [`policy::decide`] maps the verdict and the
//! configured [`SharingMode`](cds_common::SharingMode) to an [`Action`], and
//! the [`Reporter`] turns both into diagnostic lines. [`ArchiveLoader`] ties
//! the steps together for one load attempt.

#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod fs;
pub mod header;
pub mod loader;
pub mod policy;
pub mod recorder;
pub mod report;
pub mod validator;

pub use entry::{ClasspathEntry, ClasspathFingerprint, EntryKind, EntryMetadata, ModifiedTime};
pub use error::ArchiveError;
pub use fs::{FsSnapshot, MetadataSource, OsFileSystem};
pub use header::{Archive, ArchiveHeader};
pub use loader::{ArchiveLoader, LoadDecision};
pub use policy::{decide, mismatch_detail, Action, MismatchDetail};
pub use recorder::{split_classpath, FingerprintRecorder, PATH_SEPARATOR};
pub use report::{ReportOutcome, Reporter, CLASS_PATHS_MISMATCH, UNABLE_TO_USE};
pub use validator::{compare_fingerprints, ClasspathValidator, EntryChange, ValidationVerdict};
