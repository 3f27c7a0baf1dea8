//! Label registry.
//!
//! A compile-time table mapping every label the classifier can report to its
//! MIME type, group, description, extensions and text flag. The table is
//! immutable for the lifetime of the process; there is no registration API.

// Submodule declarations
pub mod registry;
mod table;

// Re-exports
pub use registry::{LabelEntry, contains, entries, lookup};

/// Generic text fallback.
pub const TXT: &str = "txt";
/// Generic binary fallback.
pub const UNKNOWN: &str = "unknown";
/// Zero-length content.
pub const EMPTY: &str = "empty";
/// Path-based identification of a directory; never produced by the model.
pub const DIRECTORY: &str = "directory";
