//! String-scanning primitives for NUL-terminated source buffers.
//!
//!     The loader hands out buffers with a trailing NUL, and every scan in this
//!     module stops at the first NUL it meets. A buffer with an interior NUL is
//!     therefore cut short at that byte: callers must guarantee the only NUL is
//!     the true terminator.
//!
//!     Line splitting is parameterized by [`LineEnding`] instead of being baked
//!     in at compile time, since source files are routinely processed on a
//!     different platform than they were authored on. Token search is exact
//!     byte-sequence matching; directive delimiters are plain substrings, never
//!     patterns.

/// Line-ending convention used to split a buffer into lines, selected once per
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Bare `\n` terminators.
    Lf,
    /// `\r\n` pairs. A bare `\n` does not terminate a line under this policy.
    Crlf,
}

impl LineEnding {
    /// Width of the terminator sequence in bytes.
    pub fn width(self) -> usize {
        match self {
            LineEnding::Lf => 1,
            LineEnding::Crlf => 2,
        }
    }

    /// Pick a convention by inspecting the buffer: if the first `\n` is
    /// preceded by `\r`, the file uses CRLF. Buffers without a newline
    /// default to LF.
    pub fn detect(buffer: &[u8]) -> LineEnding {
        for (index, &byte) in buffer.iter().enumerate() {
            if byte == 0 {
                break;
            }
            if byte == b'\n' {
                if index > 0 && buffer[index - 1] == b'\r' {
                    return LineEnding::Crlf;
                }
                return LineEnding::Lf;
            }
        }
        LineEnding::Lf
    }
}

/// Result of copying one line out of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStep {
    /// Offset of the first byte of the following line.
    Next(usize),
    /// The copied line reached the buffer's terminating NUL.
    End,
}

/// Length of `bytes` up to (not including) its first NUL.
pub fn str_length(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// First occurrence of `token` in `haystack` at or after `from`, as an exact
/// byte sequence.
pub fn find_token(haystack: &[u8], token: &[u8], from: usize) -> Option<usize> {
    if token.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(token.len())
        .position(|window| window == token)
        .map(|index| index + from)
}

/// Number of bytes in the line starting at `offset`, not counting the
/// terminator. Scanning stops at the line terminator, the first NUL, or the
/// end of the buffer, whichever comes first.
pub fn line_length(buffer: &[u8], offset: usize, ending: LineEnding) -> usize {
    let mut length = 0;
    while offset + length < buffer.len() {
        let byte = buffer[offset + length];
        if byte == 0 {
            break;
        }
        match ending {
            LineEnding::Lf => {
                if byte == b'\n' {
                    break;
                }
            }
            LineEnding::Crlf => {
                if byte == b'\r'
                    && offset + length + 1 < buffer.len()
                    && buffer[offset + length + 1] == b'\n'
                {
                    break;
                }
            }
        }
        length += 1;
    }
    length
}

/// Copy the line starting at `offset` into `dest` with a trailing NUL.
///
/// `dest` must hold the line plus its NUL; an undersized destination is fatal.
/// Returns where the following line begins, or [`LineStep::End`] when the
/// copied line reached the buffer's terminating NUL.
pub fn copy_line(dest: &mut [u8], buffer: &[u8], offset: usize, ending: LineEnding) -> LineStep {
    let length = line_length(buffer, offset, ending);
    assert!(
        dest.len() >= length + 1,
        "line of {} bytes does not fit a {}-byte destination",
        length,
        dest.len()
    );
    dest[..length].copy_from_slice(&buffer[offset..offset + length]);
    dest[length] = 0;

    let terminator = offset + length;
    if terminator >= buffer.len() || buffer[terminator] == 0 {
        LineStep::End
    } else {
        LineStep::Next(terminator + ending.width())
    }
}
