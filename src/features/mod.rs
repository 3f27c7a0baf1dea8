//! Byte-level feature extraction.
//!
//! Content is reduced to a fixed-length sequence of tokens: each byte maps to
//! its raw value `0..=255` and the sentinel [`PADDING_TOKEN`] (`256`) fills
//! positions past the end of short inputs. Inputs longer than the layout
//! width are sampled from head, middle and tail windows.
//!
//! The mapping is exact integer tokens, not normalized floats; the model's
//! input encoding consumes tokens directly.

// Submodule declarations
pub mod extract;
pub mod layout;

// Re-exports
pub use extract::{FeatureVector, extract, extract_from_reader};
pub use layout::{FeatureLayout, Windows};

/// Token used for positions with no content byte.
pub const PADDING_TOKEN: u16 = 256;

/// Number of distinct tokens: 256 byte values plus padding.
pub const VOCAB_SIZE: usize = 257;
