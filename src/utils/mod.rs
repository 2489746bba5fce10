//! Utility modules for byte-level encoding I/O and clipboard access.

pub mod encoding;

#[cfg(feature = "gui")]
pub mod clipboard;
