//! Unified error types for filekind.
//!
//! One error enum covers model loading, inference, label lookup, file access
//! and session lifecycle, presenting a consistent API to bindings.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
