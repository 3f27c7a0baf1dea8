//! Filekind - content-based file type identification
//!
//! This library identifies the type of a file from its bytes rather than its
//! name. A small neural classifier looks at three windows of the content
//! (beginning, middle, end) and a static label registry turns its prediction
//! into a MIME type, a group, a description and the usual extensions.
//!
//! # Features
//!
//! - **Sessions**: Load a model once, identify any number of files from any
//!   number of threads
//! - **Bounded reads**: Only the sampled windows of a file are read
//! - **Built-in model**: Works out of the box; custom weight blobs can be
//!   loaded from disk or memory
//! - **Deterministic**: The same content always yields the same answer
//! - **Low-confidence fallback**: Uncertain predictions degrade to `txt` or
//!   `unknown` instead of guessing
//!
//! # Example - Identifying content
//!
//! ```
//! use filekind::Session;
//!
//! # fn main() -> filekind::Result<()> {
//! let session = Session::new()?;
//!
//! let info = session.identify_bytes(b"\x89PNG\r\n\x1a\n")?;
//! assert_eq!(info.label(), "png");
//! assert_eq!(info.mime_type(), "image/png");
//!
//! let info = session.identify_bytes(b"just some words\n")?;
//! assert!(info.is_text());
//!
//! session.release();
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Identifying a file with score details
//!
//! ```no_run
//! use filekind::{Session, SessionConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::from_yaml_file("filekind.yaml")?;
//! let session = Session::with_config(config)?;
//!
//! let result = session.classify_path("archive.bin")?;
//! println!(
//!     "{} ({}) score={:.3} overwritten={}",
//!     result.info.label(),
//!     result.info.mime_type(),
//!     result.score,
//!     result.overwritten
//! );
//! # Ok(())
//! # }
//! ```

/// Shared error type, binary readers and configuration
pub mod common;

/// Fixed-width feature extraction from file content
pub mod features;

/// Static registry of content-type labels
pub mod labels;

/// Model weights, the built-in model and inference
pub mod model;

/// Classification sessions
pub mod session;

// Re-export commonly used types for convenience
pub use common::{Error, Result, SessionConfig};
pub use features::{FeatureLayout, FeatureVector};
pub use labels::LabelEntry;
pub use model::ModelSource;
pub use session::{Classification, Session, SessionBuilder, SessionState, TypeInfo};
