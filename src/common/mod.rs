//! Common types and utilities shared across the crate.
//!
//! Error handling, little-endian binary reading for model blobs, and session
//! configuration live here so the feature, model, and session layers can
//! depend on them without depending on each other.

// Submodule declarations
pub mod binary;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::SessionConfig;
pub use error::{Error, Result};
