/// Diagnostic formatting: human-readable and JSON (NDJSON) modes.
///
/// - **Human mode** (default): one line per diagnostic on stderr, with the
///   severity tag color-coded. Colors are disabled when `--no-color` is set,
///   the `NO_COLOR` environment variable is present (per
///   <https://no-color.org>), or stderr is not a TTY.
/// - **JSON mode**: each diagnostic is one serialized JSON object per line.
///
/// Both modes honor **quiet** (only errors, no summary) and **verbose**
/// (timing lines).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use quotegen_core::{Diagnostic, Severity};

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the diagnostic formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing lines to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }

    fn suppresses(&self, severity: Severity) -> bool {
        self.quiet && !matches!(severity, Severity::Error)
    }
}

/// Output format selection, mirroring the CLI `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Human-readable, optionally colored output.
    Human,
    /// Structured NDJSON output.
    Json,
}

// ---------------------------------------------------------------------------
// Human mode
// ---------------------------------------------------------------------------

/// Writes a single [`Diagnostic`] in human-readable format.
///
/// Format: `[W] ROUTE_SHEET_MISSING  POL-POD: route sheet is missing; ...`
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_human<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.suppresses(diag.severity) {
        return Ok(());
    }
    let (tag, color) = match diag.severity {
        Severity::Error => ("[E]", ANSI_RED),
        Severity::Warning => ("[W]", ANSI_YELLOW),
        Severity::Info => ("[I]", ANSI_CYAN),
    };
    let location = diag
        .sheet
        .as_deref()
        .map(|sheet| format!("{sheet}: "))
        .unwrap_or_default();

    if config.colors {
        writeln!(
            writer,
            "{color}{tag}{ANSI_RESET} {code}  {location}{message}",
            code = diag.code,
            message = diag.message,
        )
    } else {
        writeln!(
            writer,
            "{tag} {code}  {location}{message}",
            code = diag.code,
            message = diag.message,
        )
    }
}

/// Writes the summary line, e.g. `0 errors, 2 warnings, 1 info`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    counts: Counts,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(
        writer,
        "{} {}, {} {}, {} info",
        counts.errors,
        pluralize(counts.errors, "error", "errors"),
        counts.warnings,
        pluralize(counts.warnings, "warning", "warnings"),
        counts.infos,
    )
}

/// Writes a timing line in verbose mode; a no-op otherwise.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

// ---------------------------------------------------------------------------
// JSON mode
// ---------------------------------------------------------------------------

/// Writes a single [`Diagnostic`] as one NDJSON line:
///
/// ```json
/// {"code":"ROUTE_SHEET_MISSING","severity":"warning","sheet":"POL-POD","message":"..."}
/// ```
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_diagnostic_json<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.suppresses(diag.severity) {
        return Ok(());
    }
    serde_json::to_writer(&mut *writer, diag)?;
    writer.write_all(b"\n")
}

/// Writes `{"summary":{"errors":0,"warnings":2,"info":1}}` as a final line.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_json<W: Write>(
    writer: &mut W,
    counts: Counts,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(
        writer,
        r#"{{"summary":{{"errors":{},"warnings":{},"info":{}}}}}"#,
        counts.errors, counts.warnings, counts.infos,
    )
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Per-severity diagnostic counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    /// Errors.
    pub errors: usize,
    /// Warnings.
    pub warnings: usize,
    /// Informational notes.
    pub infos: usize,
}

impl Counts {
    /// Tallies `diagnostics` by severity.
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Self::default(), |mut acc, d| {
                match d.severity {
                    Severity::Error => acc.errors += 1,
                    Severity::Warning => acc.warnings += 1,
                    Severity::Info => acc.infos += 1,
                }
                acc
            })
    }
}

/// Writes a single [`Diagnostic`] in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic<W: Write>(
    writer: &mut W,
    diag: &Diagnostic,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_diagnostic_human(writer, diag, config),
        FormatMode::Json => write_diagnostic_json(writer, diag, config),
    }
}

/// Writes a summary in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    counts: Counts,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_summary_human(writer, counts, config),
        FormatMode::Json => write_summary_json(writer, counts, config),
    }
}

/// Writes every diagnostic and the summary line to stderr.
///
/// Nothing is written when `diagnostics` is empty.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stderr cannot be written.
pub fn report(
    diagnostics: &[Diagnostic],
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();
    for diag in diagnostics {
        write_diagnostic(&mut err_out, diag, mode, config).map_err(stderr_error)?;
    }
    write_summary(&mut err_out, Counts::of(diagnostics), mode, config).map_err(stderr_error)
}

/// Writes a verbose timing line to stderr.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stderr cannot be written.
pub fn report_timing(
    label: &str,
    duration: Duration,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    if mode == FormatMode::Json {
        return Ok(());
    }
    let stderr = std::io::stderr();
    write_timing_human(&mut stderr.lock(), label, duration, config).map_err(stderr_error)
}

/// Maps a failed write to stdout.
pub fn stdout_error(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

fn stderr_error(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stderr".to_owned(),
        detail: e.to_string(),
    }
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
