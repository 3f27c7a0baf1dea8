//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type, plus the path-aware IO mapping
//! used by path-based identification.

use std::io;
use std::path::Path;

use super::types::Error;
use crate::common::binary::BinaryError;

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        Error::ModelLoad(err.to_string())
    }
}

impl Error {
    /// Map an IO failure on `path`, keeping "not found" distinct from other IO errors.
    pub(crate) fn from_path_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(err),
        }
    }
}
