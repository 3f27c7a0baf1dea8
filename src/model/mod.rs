//! Model runtime: weight format, the built-in network and the forward pass.
//!
//! The network is small: a positional one-hot encoding of the
//! leading tokens plus a token histogram, one ReLU hidden layer, and a
//! softmax output over the label set.

// Submodule declarations
pub mod builtin;
pub mod runtime;
pub mod weights;

// Re-exports
pub use runtime::{ModelRuntime, ModelSource, Score};
pub use weights::{DenseLayer, ModelWeights};
