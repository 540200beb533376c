/// File and stdin access with size enforcement.
///
/// This module is the single entry point for filesystem I/O in the
/// `quotegen` binary; the library crates only ever see byte slices.
///
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::Read as _;
use std::path::Path;

use quotegen_core::EditedGrid;

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads the entire contents of `source`, refusing inputs over `max_size`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) when the file is missing, unreadable
/// or larger than `max_size`.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<Vec<u8>, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Reads and parses an edited grid file.
///
/// # Errors
///
/// Returns [`CliError::InvalidGrid`] when the file is not UTF-8 or not a
/// JSON array of rows, or an I/O error variant when it cannot be read.
pub fn read_grid(path: &Path, max_size: u64) -> Result<EditedGrid, CliError> {
    let bytes = read_file(path, max_size)?;
    let source = path.display().to_string();
    let text = std::str::from_utf8(&bytes).map_err(|e| CliError::InvalidGrid {
        source: source.clone(),
        detail: format!("invalid UTF-8 at byte offset {}", e.valid_up_to()),
    })?;
    EditedGrid::from_json(text).map_err(|e| CliError::InvalidGrid {
        source,
        detail: format!("line {}, column {}: {e}", e.line(), e.column()),
    })
}

/// Writes `bytes` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if the write fails.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes).map_err(|e| CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
#[allow(clippy::wildcard_enum_match_arm)]
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// Reading `max_size + 1` bytes through the cap tells "exactly at the limit"
/// apart from "over the limit".
fn read_stdin(max_size: u64) -> Result<Vec<u8>, CliError> {
    let mut buf: Vec<u8> = Vec::new();
    std::io::stdin()
        .lock()
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 > max_size {
        return Err(CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: max_size,
            actual: None,
        });
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
