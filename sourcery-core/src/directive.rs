//! Directive marker, kinds, and the classification pass.
//!
//!     A directive line begins at column 0 with the two-character marker `#!`;
//!     the third character selects the kind. Classification is a separate first
//!     pass over the line list so the executor can walk an already-labelled
//!     list, and it is idempotent: re-running it yields the same kinds.

use serde::Serialize;
use std::fmt;

use crate::arena::Arena;
use crate::list::Trunk;
use crate::source::LineRecord;

/// Two-character marker that opens a directive line.
pub const MARKER: &[u8] = b"#!";
/// Opening delimiter of a multiline make-file payload.
pub const MULTILINE_OPEN: &[u8] = b"<<(";
/// Closing delimiter of a multiline make-file payload.
pub const MULTILINE_CLOSE: &[u8] = b")>>";
/// Separates the make-file target from its content.
pub const TARGET_SEPARATOR: &[u8] = b":";

/// Classification of one source line.
///
/// `Variable`, `InlineMacro`, and `FunctionMacro` are declared for the symbol
/// and macro passes but never produced by the classifier; the executor reports
/// them, like `Header`, as unimplemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    /// Not classified: a plain content line, or one too short to carry a
    /// directive.
    Unset,
    /// Marker present but the kind character is not recognized.
    Undefined,
    Header,
    MakeFile,
    MakeDirectory,
    RunCommand,
    Variable,
    InlineMacro,
    FunctionMacro,
}

impl DirectiveKind {
    /// Map the third character of a marker line to its kind.
    pub fn from_kind_char(c: u8) -> DirectiveKind {
        match c {
            b'#' => DirectiveKind::Header,
            b'!' => DirectiveKind::RunCommand,
            b'%' => DirectiveKind::MakeDirectory,
            b'+' => DirectiveKind::MakeFile,
            _ => DirectiveKind::Undefined,
        }
    }

    /// Whether the executor should visit this line at all. Everything except
    /// plain content is visited, if only to be reported as unrecognized.
    pub fn is_actionable(self) -> bool {
        !matches!(self, DirectiveKind::Unset)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveKind::Unset => "unset",
            DirectiveKind::Undefined => "undefined",
            DirectiveKind::Header => "header",
            DirectiveKind::MakeFile => "make-file",
            DirectiveKind::MakeDirectory => "make-directory",
            DirectiveKind::RunCommand => "run-command",
            DirectiveKind::Variable => "variable",
            DirectiveKind::InlineMacro => "inline-macro",
            DirectiveKind::FunctionMacro => "function-macro",
        };
        f.write_str(name)
    }
}

/// First pass: label every line that starts with the marker.
///
/// Lines shorter than three characters cannot carry a directive and stay
/// [`DirectiveKind::Unset`], as does any line without the marker at column 0.
pub fn classify_lines(arena: &Arena, lines: &mut Trunk<LineRecord>) {
    let mut cursor = lines.head();
    while let Some(id) = cursor {
        let kind = {
            let record = lines.get(id);
            if record.length > 2 {
                let text = &arena.bytes(record.text)[..record.length];
                if text.starts_with(MARKER) {
                    Some(DirectiveKind::from_kind_char(text[2]))
                } else {
                    None
                }
            } else {
                None
            }
        };
        if let Some(kind) = kind {
            lines.get_mut(id).directive = kind;
        }
        cursor = lines.next(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::LineEnding;
    use crate::source::build_line_list;

    fn classified(source: &str) -> Vec<DirectiveKind> {
        let mut arena = Arena::with_capacity(4096);
        let buffer = arena.push_bytes(source.as_bytes());
        let mut lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        classify_lines(&arena, &mut lines);
        lines.iter().map(|record| record.directive).collect()
    }

    #[test]
    fn kind_char_mapping() {
        assert_eq!(
            DirectiveKind::from_kind_char(b'%'),
            DirectiveKind::MakeDirectory
        );
        assert_eq!(DirectiveKind::from_kind_char(b'+'), DirectiveKind::MakeFile);
        assert_eq!(
            DirectiveKind::from_kind_char(b'!'),
            DirectiveKind::RunCommand
        );
        assert_eq!(DirectiveKind::from_kind_char(b'#'), DirectiveKind::Header);
        assert_eq!(
            DirectiveKind::from_kind_char(b'?'),
            DirectiveKind::Undefined
        );
    }

    #[test]
    fn marker_must_start_the_line() {
        let kinds = classified("text\n #!%indented\n#!%real");
        assert_eq!(
            kinds,
            vec![
                DirectiveKind::Unset,
                DirectiveKind::Unset,
                DirectiveKind::MakeDirectory,
            ]
        );
    }

    #[test]
    fn short_lines_stay_unset() {
        // "#!" alone is two characters: no kind character to read.
        let kinds = classified("#!\nok");
        assert_eq!(kinds, vec![DirectiveKind::Unset, DirectiveKind::Unset]);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut arena = Arena::with_capacity(4096);
        let buffer = arena.push_bytes(b"#!+a.txt:x\nplain\n#!?odd");
        let mut lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        classify_lines(&arena, &mut lines);
        let first: Vec<_> = lines.iter().map(|r| r.directive).collect();
        classify_lines(&arena, &mut lines);
        let second: Vec<_> = lines.iter().map(|r| r.directive).collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                DirectiveKind::MakeFile,
                DirectiveKind::Unset,
                DirectiveKind::Undefined,
            ]
        );
    }
}
