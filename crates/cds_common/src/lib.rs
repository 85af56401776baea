//! Shared foundational types used across the class-data-sharing workspace.
//!
//! This crate provides the content hash used to checksum archive payloads and
//! the [`SharingMode`] selector that every load decision is made against.

#![warn(missing_docs)]

pub mod hash;
pub mod mode;

pub use hash::ContentHash;
pub use mode::{ParseSharingModeError, SharingMode};
