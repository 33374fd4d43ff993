//! Per-directive outcomes and per-file reports.
//!
//!     The executor returns outcomes instead of printing; the CLI renders them
//!     (or serializes the whole report as JSON). Every variant is
//!     reported-and-continue: none of them stops the pipeline.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Result of executing one directive.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Outcome {
    DirectoryCreated {
        path: String,
    },
    DirectoryFailed {
        path: String,
        error: String,
    },
    FileCreated {
        path: String,
        lines: usize,
    },
    FileFailed {
        path: String,
        error: String,
    },
    CommandRun {
        command: String,
        exit_code: Option<i32>,
    },
    CommandFailed {
        command: String,
        error: String,
    },
    Unrecognized {
        line_number: usize,
        text: String,
    },
    /// A multiline payload whose close token never appeared before the end of
    /// the file. Nothing is written for the directive.
    UnterminatedMultiline {
        line_number: usize,
        target: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::DirectoryCreated { path } => {
                write!(f, "Directory was created at {}.", path)
            }
            Outcome::DirectoryFailed { path, .. } => {
                write!(f, "Directory couldn't be created at {}.", path)
            }
            Outcome::FileCreated { path, .. } => write!(f, "File {} was created.", path),
            Outcome::FileFailed { path, .. } => write!(f, "Unable to create {}.", path),
            Outcome::CommandRun { command, .. } => write!(f, "Executing '{}'.", command),
            Outcome::CommandFailed { command, error } => {
                write!(f, "Unable to execute '{}': {}.", command, error)
            }
            Outcome::Unrecognized { line_number, text } => {
                write!(
                    f,
                    "Unrecognized/unimplemented directive on line {:4}\n{}",
                    line_number, text
                )
            }
            Outcome::UnterminatedMultiline {
                line_number,
                target,
            } => {
                write!(
                    f,
                    "Unterminated multiline block for {} starting on line {}.",
                    target, line_number
                )
            }
        }
    }
}

/// Everything one source file produced.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcomes: Vec<Outcome>,
}

impl FileReport {
    /// Whether any directive in the file failed or went unrecognized.
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|outcome| {
            matches!(
                outcome,
                Outcome::DirectoryFailed { .. }
                    | Outcome::FileFailed { .. }
                    | Outcome::CommandFailed { .. }
                    | Outcome::UnterminatedMultiline { .. }
            )
        })
    }
}
