//! Error types for the processing pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort processing of a single source file.
///
/// Per-directive failures (a directory that cannot be created, a target file
/// that cannot be opened) are not errors at this level: they are reported as
/// [`Outcome`](crate::report::Outcome)s and processing continues.
#[derive(Debug)]
pub enum ProcessError {
    /// The source file could not be opened or read.
    Source { path: PathBuf, source: io::Error },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Source { path, source } => {
                write!(
                    f,
                    "Unable to open the file {} for reading: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Source { source, .. } => Some(source),
        }
    }
}
