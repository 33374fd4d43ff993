//! Second pass: directive dispatch and the multiline payload scanner.
//!
//!     The executor walks an already-classified line list with a cursor. Every
//!     actionable line is handled inside a directive-scoped arena checkpoint,
//!     so body extraction, target/content splitting, and payload assembly all
//!     allocate freely and are reclaimed in one restore whatever the outcome.
//!
//!     A make-file directive may own a multiline payload. The scanner starts
//!     just past the `<<(` token and consumes successive line-list nodes until
//!     it finds `)>>`, appending one payload line per node visited; the cursor
//!     then resumes *after* the last consumed node, so payload lines are never
//!     re-examined as directives. Payload assembly uses the same
//!     prepend-then-reverse trunk as the line table itself.

use std::path::Path;

use crate::arena::{Arena, Block};
use crate::directive::{DirectiveKind, MULTILINE_CLOSE, MULTILINE_OPEN, TARGET_SEPARATOR};
use crate::list::{BranchId, Trunk};
use crate::platform;
use crate::report::Outcome;
use crate::scan;
use crate::source::LineRecord;

/// One assembled payload line for a make-file target. The text block is
/// NUL-terminated; its length is recovered at write time.
struct PayloadLine {
    text: Block,
}

/// The close token never appeared before the end of the line list.
#[derive(Debug)]
struct Unterminated;

/// Execute every classified directive in `lines`, in order, and collect the
/// outcomes. Per-directive failures are reported and do not stop the walk.
pub fn execute_directives(arena: &mut Arena, lines: &Trunk<LineRecord>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    let mut cursor = lines.head();
    while let Some(id) = cursor {
        if lines.get(id).directive.is_actionable() {
            let (outcome, resume) = arena.scoped(|arena| run_directive(arena, lines, id));
            outcomes.push(outcome);
            cursor = resume;
        } else {
            cursor = lines.next(id);
        }
    }
    outcomes
}

/// Dispatch one directive. Returns its outcome and where the outer walk
/// should resume.
fn run_directive(
    arena: &mut Arena,
    lines: &Trunk<LineRecord>,
    id: BranchId,
) -> (Outcome, Option<BranchId>) {
    let record = lines.get(id);
    // The directive body is everything after the marker and kind character.
    let body = arena.push_copy(record.text, 3..record.length);
    let body_len = record.length - 3;

    match record.directive {
        DirectiveKind::MakeDirectory => (make_directory(arena, body, body_len), lines.next(id)),
        DirectiveKind::MakeFile => make_file(arena, lines, id, body, body_len),
        DirectiveKind::RunCommand => (run_command(arena, body, body_len), lines.next(id)),
        _ => {
            let text = block_string(arena, record.text, record.length);
            (
                Outcome::Unrecognized {
                    line_number: record.line_number,
                    text,
                },
                lines.next(id),
            )
        }
    }
}

fn make_directory(arena: &Arena, body: Block, body_len: usize) -> Outcome {
    let path = block_string(arena, body, body_len);
    match platform::create_directory(Path::new(&path)) {
        Ok(()) => Outcome::DirectoryCreated { path },
        Err(error) => Outcome::DirectoryFailed {
            path,
            error: error.to_string(),
        },
    }
}

fn run_command(arena: &Arena, body: Block, body_len: usize) -> Outcome {
    let command = block_string(arena, body, body_len);
    match platform::run_command(&command) {
        Ok(status) => Outcome::CommandRun {
            command,
            exit_code: status.code(),
        },
        Err(error) => Outcome::CommandFailed {
            command,
            error: error.to_string(),
        },
    }
}

/// Handle a make-file directive: split target from content, assemble the
/// payload (literal or multiline), and write the target file.
fn make_file(
    arena: &mut Arena,
    lines: &Trunk<LineRecord>,
    id: BranchId,
    body: Block,
    body_len: usize,
) -> (Outcome, Option<BranchId>) {
    let record = lines.get(id);

    // Without a separator the whole body names the target and the payload is
    // empty: the file is created (or truncated) with no contents.
    let separator = scan::find_token(&arena.bytes(body)[..body_len], TARGET_SEPARATOR, 0);
    let (target, target_len) = match separator {
        Some(at) => (arena.push_copy(body, 0..at), at),
        None => (body, body_len),
    };

    let mut payload: Trunk<PayloadLine> = Trunk::new();
    let mut resume = lines.next(id);

    let open = scan::find_token(&arena.bytes(body)[..body_len], MULTILINE_OPEN, 0);
    if let Some(open_at) = open {
        let content_start = open_at + MULTILINE_OPEN.len();
        let working = arena.push_copy(body, content_start..body_len);
        match scan_multiline(
            arena,
            lines,
            id,
            working,
            body_len - content_start,
            &mut payload,
        ) {
            Ok(last_consumed) => resume = lines.next(last_consumed),
            Err(Unterminated) => {
                let target = block_string(arena, target, target_len);
                return (
                    Outcome::UnterminatedMultiline {
                        line_number: record.line_number,
                        target,
                    },
                    // The scanner ran off the end of the list.
                    None,
                );
            }
        }
    } else if let Some(at) = separator {
        let content = arena.push_copy(body, at + 1..body_len);
        payload.push_node(PayloadLine { text: content });
    }

    // Assembled head-first; restore source order before writing.
    payload.reverse();

    let path = block_string(arena, target, target_len);
    let written = platform::create_file_truncated(Path::new(&path)).and_then(|mut file| {
        for line in payload.iter() {
            let bytes = arena.bytes(line.text);
            platform::write_line(&mut file, &bytes[..scan::str_length(bytes)])?;
        }
        Ok(())
    });
    let outcome = match written {
        Ok(()) => Outcome::FileCreated {
            path,
            lines: payload.len(),
        },
        Err(error) => Outcome::FileFailed {
            path,
            error: error.to_string(),
        },
    };
    (outcome, resume)
}

/// Consume line-list nodes until the close token appears, appending one
/// payload line per node. The working text of the first iteration starts just
/// past `<<(`; each later iteration works on a full line. The payload line is
/// appended before the close check, so an immediately-closed block (`<<()>>`)
/// still contributes one empty line.
fn scan_multiline(
    arena: &mut Arena,
    lines: &Trunk<LineRecord>,
    start: BranchId,
    mut working: Block,
    mut working_len: usize,
    payload: &mut Trunk<PayloadLine>,
) -> Result<BranchId, Unterminated> {
    let mut node = start;
    loop {
        let close = scan::find_token(&arena.bytes(working)[..working_len], MULTILINE_CLOSE, 0);
        let end = close.unwrap_or(working_len);
        let text = arena.push_copy(working, 0..end);
        payload.push_node(PayloadLine { text });

        if close.is_some() {
            // Anything after the close token on this line is discarded.
            return Ok(node);
        }
        match lines.next(node) {
            Some(next) => {
                node = next;
                let record = lines.get(next);
                working = record.text;
                working_len = record.length;
            }
            None => return Err(Unterminated),
        }
    }
}

fn block_string(arena: &Arena, block: Block, length: usize) -> String {
    String::from_utf8_lossy(&arena.bytes(block)[..length]).into_owned()
}
