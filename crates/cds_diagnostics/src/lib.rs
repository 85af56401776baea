//! Diagnostic creation, severity management, and text rendering.
//!
//! This crate provides tagged [`Diagnostic`] lines with severity levels. The
//! [`DiagnosticSink`] accumulates diagnostics during a load attempt, and
//! [`DiagnosticRenderer`] implementations format them for the process's
//! error stream.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
