//! Unified error types for filekind.
//!
//! Every failure a session can produce is a variant of [`Error`], so callers
//! can tell a file problem from a model problem without string matching.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for filekind operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Model weights missing, truncated, or malformed
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Internal shape or vocabulary mismatch during a forward pass
    #[error("Inference error: {0}")]
    Inference(String),

    /// The model emitted a label the registry does not know
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The session was released
    #[error("Session has been released")]
    SessionClosed,

    /// Release attempted while identify calls were in flight
    #[error("Session is busy with in-flight identify calls")]
    SessionBusy,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures caused by the input file rather than the classifier.
    pub fn is_file_error(&self) -> bool {
        matches!(self, Error::FileNotFound(_) | Error::Io(_))
    }

    /// True for failures originating in the model or the label registry.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            Error::ModelLoad(_) | Error::Inference(_) | Error::UnknownLabel(_)
        )
    }
}

/// Result type for filekind operations.
pub type Result<T> = std::result::Result<T, Error>;
