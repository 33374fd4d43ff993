//! Per-file processing façade.
//!
//!     One source file is processed start to finish under a single top-level
//!     arena checkpoint: load, split into the line table, classify, execute,
//!     restore. Files never share state, so a caller processing many files
//!     reuses one arena and its checkpoints never interleave.

use serde::Serialize;
use std::path::Path;

use crate::arena::Arena;
use crate::directive::{classify_lines, DirectiveKind};
use crate::error::ProcessError;
use crate::executor::execute_directives;
use crate::report::FileReport;
use crate::scan::LineEnding;
use crate::source::{build_line_list, load_source};

/// One classified directive line, as shown by inspect mode.
#[derive(Debug, Serialize)]
pub struct DirectiveListing {
    pub line_number: usize,
    pub kind: DirectiveKind,
    pub text: String,
}

/// Process one source file: execute every directive it carries and report the
/// outcomes. `ending` fixes the line-ending policy; `None` detects it from
/// the buffer.
pub fn process_source_file(
    arena: &mut Arena,
    path: &Path,
    ending: Option<LineEnding>,
) -> Result<FileReport, ProcessError> {
    arena.scoped(|arena| {
        let buffer = load_source(arena, path)?;
        let ending = ending.unwrap_or_else(|| LineEnding::detect(arena.bytes(buffer)));
        let mut lines = build_line_list(arena, buffer, ending);
        classify_lines(arena, &mut lines);
        let outcomes = execute_directives(arena, &lines);
        Ok(FileReport {
            path: path.to_path_buf(),
            outcomes,
        })
    })
}

/// Classify one source file without executing anything: list every directive
/// line with its kind and raw text.
pub fn inspect_source_file(
    arena: &mut Arena,
    path: &Path,
    ending: Option<LineEnding>,
) -> Result<Vec<DirectiveListing>, ProcessError> {
    arena.scoped(|arena| {
        let buffer = load_source(arena, path)?;
        let ending = ending.unwrap_or_else(|| LineEnding::detect(arena.bytes(buffer)));
        let mut lines = build_line_list(arena, buffer, ending);
        classify_lines(arena, &mut lines);
        let listings = lines
            .iter()
            .filter(|record| record.directive.is_actionable())
            .map(|record| DirectiveListing {
                line_number: record.line_number,
                kind: record.directive,
                text: String::from_utf8_lossy(&arena.bytes(record.text)[..record.length])
                    .into_owned(),
            })
            .collect();
        Ok(listings)
    })
}
