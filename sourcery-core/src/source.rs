//! Source loading and the per-file line table.

use std::path::Path;

use crate::arena::{Arena, Block};
use crate::directive::DirectiveKind;
use crate::error::ProcessError;
use crate::list::Trunk;
use crate::platform;
use crate::scan::{self, LineEnding, LineStep};

/// One line of a loaded source file.
///
/// `text` is an arena-owned, NUL-terminated copy of the line without its
/// terminator; `length` excludes the NUL. Line numbers are 0-based ordinals in
/// file order. `directive` stays [`DirectiveKind::Unset`] until the
/// classification pass runs.
pub struct LineRecord {
    pub text: Block,
    pub length: usize,
    pub line_number: usize,
    pub directive: DirectiveKind,
}

/// Load a whole file into one arena-owned, NUL-terminated buffer.
///
/// The block is `len + 1` zeroed bytes with the file contents copied in, so
/// the final byte stays NUL even if the read came up short. Open and read
/// failures are propagated so the caller decides whether one file's failure
/// aborts the run.
pub fn load_source(arena: &mut Arena, path: &Path) -> Result<Block, ProcessError> {
    let data = platform::read_file(path).map_err(|source| ProcessError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(arena.push_bytes(&data))
}

/// Split `buffer` into a line list in source order.
///
/// Each line is measured, copied into its own arena block, and prepended as a
/// [`LineRecord`]; the trunk is reversed exactly once at the end so iteration
/// matches file order. Terminates when the splitter reports the buffer's
/// terminating NUL — a buffer whose only NUL is not at the true end will cut
/// the line table short there.
pub fn build_line_list(arena: &mut Arena, buffer: Block, ending: LineEnding) -> Trunk<LineRecord> {
    let mut lines = Trunk::new();
    let mut line_number = 0;
    let mut offset = 0;
    loop {
        let length = scan::line_length(arena.bytes(buffer), offset, ending);
        let text = arena.push_zeroed(length + 1);
        let (dest, src) = arena.copy_view(text, buffer);
        let step = scan::copy_line(dest, src, offset, ending);

        lines.push_node(LineRecord {
            text,
            length,
            line_number,
            directive: DirectiveKind::Unset,
        });
        line_number += 1;

        match step {
            LineStep::End => break,
            LineStep::Next(next) => offset = next,
        }
    }
    lines.reverse();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_texts(arena: &Arena, lines: &Trunk<LineRecord>) -> Vec<String> {
        lines
            .iter()
            .map(|record| {
                String::from_utf8_lossy(&arena.bytes(record.text)[..record.length]).into_owned()
            })
            .collect()
    }

    #[test]
    fn splits_lines_in_file_order() {
        let mut arena = Arena::with_capacity(4096);
        let buffer = arena.push_bytes(b"alpha\nbeta\ngamma");
        let lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        assert_eq!(line_texts(&arena, &lines), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn assigns_zero_based_line_numbers() {
        let mut arena = Arena::with_capacity(4096);
        let buffer = arena.push_bytes(b"a\nb\nc");
        let lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        let numbers: Vec<_> = lines.iter().map(|record| record.line_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn trailing_newline_yields_a_final_empty_line() {
        let mut arena = Arena::with_capacity(4096);
        let buffer = arena.push_bytes(b"only\n");
        let lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        assert_eq!(line_texts(&arena, &lines), vec!["only", ""]);
    }

    #[test]
    fn empty_source_is_one_empty_line() {
        let mut arena = Arena::with_capacity(64);
        let buffer = arena.push_bytes(b"");
        let lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_texts(&arena, &lines), vec![""]);
    }

    #[test]
    fn crlf_buffer_under_crlf_policy() {
        let mut arena = Arena::with_capacity(4096);
        let buffer = arena.push_bytes(b"one\r\ntwo\r\nthree");
        let lines = build_line_list(&mut arena, buffer, LineEnding::Crlf);
        assert_eq!(line_texts(&arena, &lines), vec!["one", "two", "three"]);
    }

    #[test]
    fn load_source_missing_file_is_an_error() {
        let mut arena = Arena::with_capacity(64);
        let result = load_source(&mut arena, Path::new("definitely/not/here.src"));
        assert!(matches!(result, Err(ProcessError::Source { .. })));
    }
}
