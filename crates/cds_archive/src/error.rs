//! Error types for archive I/O.

use std::path::PathBuf;

/// Errors that can occur while writing or reading an archive file.
///
/// Classpath mismatches are never errors: they are reported as
/// [`ValidationVerdict`](crate::ValidationVerdict) values. These errors cover
/// only the archive file itself being absent or unusable.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// An I/O error occurred while reading or writing the archive file.
    #[error("archive I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The archive file has an invalid or missing header.
    #[error("invalid archive header in {path}: {reason}")]
    InvalidHeader {
        /// The archive file path.
        path: PathBuf,
        /// Description of the header problem.
        reason: String,
    },

    /// The stored checksum does not match the computed checksum of the payload.
    #[error("checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The archive file path.
        path: PathBuf,
        /// The expected checksum from the header.
        expected: String,
        /// The actual checksum computed from the payload.
        actual: String,
    },

    /// The archive format version does not match the current version.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The archive file path.
        path: PathBuf,
        /// The expected format version.
        expected: u32,
        /// The actual format version found in the file.
        actual: u32,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
