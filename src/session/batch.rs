//! Parallel identification of many files with one session.

use std::path::Path;

use rayon::prelude::*;

use super::{Classification, Session, TypeInfo};
use crate::common::error::{Error, Result};

impl Session {
    /// Identify every path in parallel.
    ///
    /// Results come back in input order, one per path; a failing path does
    /// not affect the others. The whole batch holds the session open, so a
    /// concurrent [`release`](Session::release) waits for it to finish.
    pub fn identify_paths<P>(&self, paths: &[P]) -> Vec<Result<TypeInfo>>
    where
        P: AsRef<Path> + Sync,
    {
        let runtime = match self.active() {
            Ok(runtime) => runtime,
            Err(_) => return paths.iter().map(|_| Err(Error::SessionClosed)).collect(),
        };
        let runtime = &*runtime;

        tracing::debug!(count = paths.len(), "identifying batch");
        paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                if path.as_os_str().is_empty() {
                    return Err(Error::InvalidInput("empty path".to_string()));
                }
                self.classify_path_with(runtime, path)
                    .map(Classification::into_info)
            })
            .collect()
    }
}
