//! Thin shims over the host filesystem and process loader.
//!
//!     These wrap the handful of OS operations the executor needs: whole-file
//!     reads, truncating file creation, single-level directory creation, and
//!     synchronous command execution through the host shell. They carry no
//!     pipeline logic of their own.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Read a whole file into memory.
pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Open `path` for writing, creating it if needed and truncating it to empty
/// otherwise.
pub fn create_file_truncated(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Write one payload line followed by a single `\n`.
pub fn write_line(file: &mut File, line: &[u8]) -> io::Result<()> {
    file.write_all(line)?;
    file.write_all(b"\n")
}

/// Create a single directory at `path`.
pub fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir(path)
}

/// Run `command` through the host shell and block until it exits.
#[cfg(unix)]
pub fn run_command(command: &str) -> io::Result<ExitStatus> {
    Command::new("sh").arg("-c").arg(command).status()
}

/// Run `command` through the host shell and block until it exits.
#[cfg(windows)]
pub fn run_command(command: &str) -> io::Result<ExitStatus> {
    Command::new("cmd").args(["/C", command]).status()
}
