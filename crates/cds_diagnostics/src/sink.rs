//! Diagnostic accumulator for a single load attempt.

use crate::diagnostic::Diagnostic;
use std::cell::RefCell;

/// An accumulator for diagnostics emitted while validating an archive.
///
/// Diagnostics are kept in emission order. A sink belongs to one load
/// attempt, which runs on one thread.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(sink.is_empty());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn emit_keeps_severity() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error("Unable to use shared archive."));
        sink.emit(Diagnostic::warning("timestamp has changed.").with_tag("cds"));
        let all = sink.diagnostics();
        assert_eq!(all[0].severity, Severity::Error);
        assert_eq!(all[1].severity, Severity::Warning);
        assert!(!sink.is_empty());
    }

    #[test]
    fn keeps_emission_order() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error("headline"));
        sink.emit(Diagnostic::error("detail"));
        let all = sink.diagnostics();
        assert_eq!(all[0].message, "headline");
        assert_eq!(all[1].message, "detail");
    }

    #[test]
    fn take_all_drains() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::error("e"));
        sink.emit(Diagnostic::warning("w"));
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.take_all().is_empty());
        assert!(sink.is_empty());
    }
}
