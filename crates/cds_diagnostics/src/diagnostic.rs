//! Structured diagnostic lines with severity and log tags.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A single diagnostic line destined for the process's error stream.
///
/// Each diagnostic carries:
/// - A severity level
/// - Zero or more log tags (e.g. `cds`, or `class` + `path`) naming the
///   category it belongs to; untagged diagnostics are top-level messages
/// - The message text itself, which callers may match on literally
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// Log tags identifying the category, rendered as `[a,b]`.
    pub tags: Vec<String>,
    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new untagged error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Creates a new untagged warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates a new untagged info diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            tags: Vec::new(),
            message: message.into(),
        }
    }

    /// Adds a log tag to this diagnostic.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
