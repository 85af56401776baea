//! Diagnostic rendering backends.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output lines.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into one line of text, without a trailing newline.
    fn render(&self, diag: &Diagnostic) -> String;

    /// Renders a batch of diagnostics, one per line, each newline-terminated.
    fn render_all(&self, diags: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diag in diags {
            out.push_str(&self.render(diag));
            out.push('\n');
        }
        out
    }
}

/// Renders diagnostics in a unified-logging style terminal format.
///
/// Produces output like:
/// ```text
/// error: Unable to use shared archive.
/// error: shared class paths mismatch
/// [warning][cds] /app/lib/b.jar timestamp has changed.
/// [info][class,path] Run time classpath is shorter than the one at dump time: 1 entry vs 2
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes for the severity.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn severity(&self, severity: Severity) -> String {
        if !self.color {
            return severity.to_string();
        }
        let code = match severity {
            Severity::Info => "36",
            Severity::Warning => "33",
            Severity::Error => "31;1",
        };
        format!("\x1b[{code}m{severity}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let severity = self.severity(diag.severity);
        if diag.tags.is_empty() {
            format!("{severity}: {}", diag.message)
        } else {
            format!("[{severity}][{}] {}", diag.tags.join(","), diag.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_untagged_error() {
        let renderer = TerminalRenderer::new(false);
        let out = renderer.render(&Diagnostic::error("Unable to use shared archive."));
        assert_eq!(out, "error: Unable to use shared archive.");
    }

    #[test]
    fn render_tagged_warning() {
        let renderer = TerminalRenderer::new(false);
        let diag = Diagnostic::warning("b.jar timestamp has changed.").with_tag("cds");
        assert_eq!(renderer.render(&diag), "[warning][cds] b.jar timestamp has changed.");
    }

    #[test]
    fn render_multi_tag() {
        let renderer = TerminalRenderer::new(false);
        let diag = Diagnostic::info("ok").with_tag("class").with_tag("path");
        assert_eq!(renderer.render(&diag), "[info][class,path] ok");
    }

    #[test]
    fn render_all_one_line_each() {
        let renderer = TerminalRenderer::new(false);
        let out = renderer.render_all(&[
            Diagnostic::error("first"),
            Diagnostic::error("second"),
        ]);
        assert_eq!(out, "error: first\nerror: second\n");
    }

    #[test]
    fn color_keeps_message_plain() {
        let renderer = TerminalRenderer::new(true);
        let out = renderer.render(&Diagnostic::error("shared class paths mismatch"));
        assert!(out.contains("\x1b["));
        assert!(out.ends_with(": shared class paths mismatch"));
    }
}
