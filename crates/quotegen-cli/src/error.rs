/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `quotegen` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The template, grid file or a date
///   argument could not be read or parsed; nothing was produced.
/// - Exit code **1**: logical failure. The input was read but the quotation
///   could not be generated or written.
use std::fmt;
use std::path::PathBuf;

use quotegen_excel::ExcelError;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `quotegen` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (`None` for stdin).
        actual: Option<u64>,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source or destination.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The template is not a readable `.xlsx` workbook.
    UnreadableWorkbook {
        /// A human-readable label for the source.
        source: String,
        /// Description from the workbook reader.
        detail: String,
    },

    /// The grid file is not a JSON array of rows.
    InvalidGrid {
        /// The grid file path.
        source: String,
        /// Description from the JSON parser.
        detail: String,
    },

    /// A date argument matched no accepted format.
    InvalidDate {
        /// The flag the value was given for.
        flag: &'static str,
        /// The rejected value.
        value: String,
    },

    // --- Exit code 1: logical failures ---
    /// The quotation could not be generated.
    ExportFailed {
        /// A description of the failure.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::UnreadableWorkbook { .. }
            | Self::InvalidGrid { .. }
            | Self::InvalidDate { .. } => 2,

            Self::ExportFailed { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::UnreadableWorkbook { source, detail } => {
                format!("error: {source} is not a readable workbook: {detail}")
            }
            Self::InvalidGrid { source, detail } => {
                format!("error: invalid grid in {source}: {detail}")
            }
            Self::InvalidDate { flag, value } => {
                format!("error: invalid date for --{flag}: {value:?} (expected YYYY-MM-DD or DD/MM/YYYY)")
            }
            Self::ExportFailed { detail } => {
                format!("error: export failed: {detail}")
            }
        }
    }

    /// Maps a workbook-layer error; `source` labels the template.
    pub fn from_excel(e: ExcelError, source: &str) -> Self {
        match e {
            ExcelError::Unreadable { detail } => Self::UnreadableWorkbook {
                source: source.to_owned(),
                detail,
            },
            ExcelError::MissingSheet { .. }
            | ExcelError::SheetEdit { .. }
            | ExcelError::Write { .. }
            | ExcelError::NotLoaded => Self::ExportFailed {
                detail: e.to_string(),
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    // ── exit_code ────────────────────────────────────────────────────────────

    #[test]
    fn file_not_found_is_exit_2() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("template.xlsx"),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn file_too_large_is_exit_2() {
        let e = CliError::FileTooLarge {
            source: "big.xlsx".to_owned(),
            limit: 1024,
            actual: Some(2048),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn unreadable_workbook_is_exit_2() {
        let e = CliError::UnreadableWorkbook {
            source: "notes.txt".to_owned(),
            detail: "invalid zip header".to_owned(),
        };
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn invalid_grid_and_date_are_exit_2() {
        let grid = CliError::InvalidGrid {
            source: "grid.json".to_owned(),
            detail: "expected `[`".to_owned(),
        };
        let date = CliError::InvalidDate {
            flag: "etd",
            value: "next week".to_owned(),
        };
        assert_eq!(grid.exit_code(), 2);
        assert_eq!(date.exit_code(), 2);
    }

    #[test]
    fn export_failed_is_exit_1() {
        let e = CliError::ExportFailed {
            detail: "missing required sheet: \"Form\"".to_owned(),
        };
        assert_eq!(e.exit_code(), 1);
    }

    // ── message content ──────────────────────────────────────────────────────

    #[test]
    fn file_not_found_message_contains_path() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("quotation-template.xlsx"),
        };
        let msg = e.message();
        assert!(msg.contains("quotation-template.xlsx"), "message: {msg}");
        assert!(msg.contains("not found"), "message: {msg}");
    }

    #[test]
    fn file_too_large_without_actual_mentions_limit() {
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 512,
            actual: None,
        };
        assert!(e.message().contains("512"));
    }

    #[test]
    fn invalid_date_names_flag_and_value() {
        let e = CliError::InvalidDate {
            flag: "etd",
            value: "31/31/2026".to_owned(),
        };
        let msg = e.message();
        assert!(msg.contains("--etd"), "message: {msg}");
        assert!(msg.contains("31/31/2026"), "message: {msg}");
    }

    #[test]
    fn excel_errors_map_to_exit_codes() {
        let unreadable = CliError::from_excel(
            ExcelError::Unreadable {
                detail: "bad zip".to_owned(),
            },
            "t.xlsx",
        );
        assert_eq!(unreadable.exit_code(), 2);
        assert!(unreadable.message().contains("t.xlsx"));

        let missing = CliError::from_excel(
            ExcelError::MissingSheet {
                sheet: "Form".to_owned(),
            },
            "t.xlsx",
        );
        assert_eq!(missing.exit_code(), 1);
        assert!(missing.message().contains("Form"));
    }

    #[test]
    fn display_matches_message() {
        let e = CliError::FileNotFound {
            path: PathBuf::from("x.xlsx"),
        };
        assert_eq!(format!("{e}"), e.message());
    }
}
