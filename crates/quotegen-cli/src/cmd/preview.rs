//! Implementation of `quotegen preview <template> --job J [-o grid.json]`.
//!
//! Dumps the route-key sheet of the job as a JSON grid (an array of rows).
//! The file can be edited and passed back to `quotegen export --grid`.
use std::io::Write as _;
use std::path::Path;

use quotegen_core::{Diagnostic, DiagnosticCode, EditedGrid, derive_route_key, pol_pod_from_job};
use quotegen_excel::preview_sheet;

use crate::PathOrStdin;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, report, stdout_error};
use crate::io::write_output;

/// Runs the `preview` command.
///
/// A job whose route-key sheet does not exist yields an empty grid and a
/// [`DiagnosticCode::TargetSheetMissing`] warning; a job too short to carry
/// a route key yields an empty grid and [`DiagnosticCode::RouteUnclassified`].
///
/// # Errors
///
/// Returns [`CliError`] when the template cannot be read or parsed, or the
/// grid cannot be written.
pub fn run(
    template: &PathOrStdin,
    job: &str,
    output: Option<&Path>,
    max_size: u64,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let session = super::open_template(template, max_size)?;
    let pol_pod = pol_pod_from_job(job);
    let route_key = derive_route_key(&pol_pod);

    let (grid, diagnostics) = match preview_sheet(session.template().formulas(), route_key) {
        Some(grid) => (grid, Vec::new()),
        None if route_key.is_empty() => (
            EditedGrid::new(),
            vec![Diagnostic::new(
                DiagnosticCode::RouteUnclassified,
                None,
                format!("job {job:?} has no route key"),
            )],
        ),
        None => (
            EditedGrid::new(),
            vec![Diagnostic::new(
                DiagnosticCode::TargetSheetMissing,
                Some(route_key),
                "no route sheet to preview; starting from an empty grid",
            )],
        ),
    };
    report(&diagnostics, mode, config)?;

    let json = grid.to_json().map_err(|e| CliError::IoError {
        source: "preview".to_owned(),
        detail: format!("JSON serialization failed: {e}"),
    })?;
    match output {
        Some(path) => write_output(path, format!("{json}\n").as_bytes()),
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{json}").map_err(stdout_error)
        }
    }
}
