//! Implementation of `quotegen companies <template>`.
//!
//! Prints the de-duplicated, sorted company list of the `Data Base` sheet:
//! one name per line, or a JSON array with `--format json`.
use std::io::Write as _;

use crate::PathOrStdin;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, report, stdout_error};

/// Runs the `companies` command.
///
/// # Errors
///
/// Returns [`CliError`] when the template cannot be read or parsed.
pub fn run(
    template: &PathOrStdin,
    max_size: u64,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let session = super::open_template(template, max_size)?;
    let listed = session.entities();
    report(&listed.diagnostics, mode, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match mode {
        FormatMode::Human => {
            for name in &listed.value {
                writeln!(out, "{name}").map_err(stdout_error)?;
            }
        }
        FormatMode::Json => {
            serde_json::to_writer_pretty(&mut out, &listed.value)
                .map_err(|e| stdout_error(e.into()))?;
            writeln!(out).map_err(stdout_error)?;
        }
    }
    Ok(())
}
