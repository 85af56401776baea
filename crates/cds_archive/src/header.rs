//! The archive file: a validated header carrying the classpath fingerprint,
//! followed by the opaque cached payload.
//!
//! On-disk layout: a 4-byte little-endian header length, the bincode-encoded
//! [`ArchiveHeader`], then the payload bytes.

use std::path::Path;

use cds_common::ContentHash;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::ClasspathFingerprint;
use crate::error::ArchiveError;

/// Magic bytes identifying a shared archive file.
const ARCHIVE_MAGIC: [u8; 4] = *b"CDSA";

/// Current archive format version. Increment on breaking changes to
/// the header or payload format.
const ARCHIVE_FORMAT_VERSION: u32 = 1;

/// Metadata persisted at the front of every archive.
///
/// The fields are private: a header is built once by [`Archive::new`] and
/// afterwards only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveHeader {
    magic: [u8; 4],
    format_version: u32,
    tool_version: String,
    fingerprint: ClasspathFingerprint,
    checksum: ContentHash,
}

impl ArchiveHeader {
    /// Version of the tool that dumped the archive.
    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    /// Archive format version.
    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    /// The classpath fingerprint captured at dump time.
    pub fn fingerprint(&self) -> &ClasspathFingerprint {
        &self.fingerprint
    }

    /// Checksum of the payload.
    pub fn checksum(&self) -> ContentHash {
        self.checksum
    }
}

/// A shared archive: header plus opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    header: ArchiveHeader,
    payload: Vec<u8>,
}

impl Archive {
    /// Builds an archive around a dump-time fingerprint and its payload.
    pub fn new(fingerprint: ClasspathFingerprint, payload: Vec<u8>, tool_version: &str) -> Self {
        let header = ArchiveHeader {
            magic: ARCHIVE_MAGIC,
            format_version: ARCHIVE_FORMAT_VERSION,
            tool_version: tool_version.to_string(),
            fingerprint,
            checksum: ContentHash::from_bytes(&payload),
        };
        Self { header, payload }
    }

    /// Returns the header.
    pub fn header(&self) -> &ArchiveHeader {
        &self.header
    }

    /// Returns the dump-time fingerprint.
    pub fn fingerprint(&self) -> &ClasspathFingerprint {
        &self.header.fingerprint
    }

    /// Returns the payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the archive, returning the payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Serializes the archive into its on-disk byte layout.
    pub fn encode(&self) -> Result<Vec<u8>, ArchiveError> {
        let header_bytes =
            bincode::serde::encode_to_vec(&self.header, bincode::config::standard()).map_err(
                |e| ArchiveError::Serialization {
                    reason: e.to_string(),
                },
            )?;

        let header_len = u32::try_from(header_bytes.len()).map_err(|_| ArchiveError::Serialization {
            reason: format!("header of {} bytes is too large", header_bytes.len()),
        })?;
        let mut output = Vec::with_capacity(4 + header_bytes.len() + self.payload.len());
        output.extend_from_slice(&header_len.to_le_bytes());
        output.extend_from_slice(&header_bytes);
        output.extend_from_slice(&self.payload);
        Ok(output)
    }

    /// Parses and validates archive bytes. `path` is only used in errors.
    ///
    /// Checks, in order: the length prefix, header decoding, magic bytes,
    /// format version and payload checksum.
    pub fn decode(path: &Path, raw: &[u8]) -> Result<Self, ArchiveError> {
        let invalid = |reason: &str| ArchiveError::InvalidHeader {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let Some(prefix) = raw.get(..4) else {
            return Err(invalid("file too short for header length"));
        };
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(prefix);
        let header_len = u32::from_le_bytes(len_bytes) as usize;

        let header_end = 4usize
            .checked_add(header_len)
            .filter(|end| *end <= raw.len())
            .ok_or_else(|| invalid("header length exceeds file size"))?;

        let (header, _): (ArchiveHeader, usize) =
            bincode::serde::decode_from_slice(&raw[4..header_end], bincode::config::standard())
                .map_err(|e| invalid(&e.to_string()))?;

        if header.magic != ARCHIVE_MAGIC {
            return Err(invalid("missing magic bytes"));
        }

        if header.format_version != ARCHIVE_FORMAT_VERSION {
            return Err(ArchiveError::VersionMismatch {
                path: path.to_path_buf(),
                expected: ARCHIVE_FORMAT_VERSION,
                actual: header.format_version,
            });
        }

        let payload = &raw[header_end..];
        let actual = ContentHash::from_bytes(payload);
        if actual != header.checksum {
            return Err(ArchiveError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: header.checksum.to_string(),
                actual: actual.to_string(),
            });
        }

        Ok(Self {
            header,
            payload: payload.to_vec(),
        })
    }

    /// Writes the archive to `path`, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<(), ArchiveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ArchiveError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let bytes = self.encode()?;
        std::fs::write(path, &bytes).map_err(|e| ArchiveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(
            path = %path.display(),
            entries = self.fingerprint().len(),
            bytes = bytes.len(),
            "wrote shared archive"
        );
        Ok(())
    }

    /// Reads and validates the archive at `path`.
    pub fn read(path: &Path) -> Result<Self, ArchiveError> {
        let raw = std::fs::read(path).map_err(|e| ArchiveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::decode(path, &raw)
    }
}
