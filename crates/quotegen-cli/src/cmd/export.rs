//! Implementation of `quotegen export`.
//!
//! Loads the company and job, optionally replaces the route-key sheet with
//! an edited grid, rewrites the template and writes
//! `QUO {job} {company}.xlsx` into the output directory. The written path
//! is printed to stdout (as `{"path": ..., "sheets": [...]}` in JSON mode).
//!
//! Exit codes:
//! - 0 = workbook written (warnings may have been printed)
//! - 1 = the template could not be rewritten or serialized
//! - 2 = unreadable template or grid file, bad date, I/O error
use std::io::Write as _;
use std::time::Instant;

use chrono::{Local, NaiveDate};

use quotegen_core::parse_form_date;
use quotegen_excel::{ExportOptions, ShipmentDetails};

use crate::cli::ExportArgs;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, report, report_timing, stdout_error};
use crate::io::{read_grid, write_output};

/// Runs the `export` command.
///
/// # Errors
///
/// Returns [`CliError`] on unreadable input, invalid dates or grid files,
/// rewrite failures, or when the output file cannot be written.
pub fn run(
    args: &ExportArgs,
    max_size: u64,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let started = Instant::now();
    let details = shipment_details(args, Local::now().date_naive())?;
    let grid = args
        .grid
        .as_deref()
        .map(|path| read_grid(path, max_size))
        .transpose()?;

    let mut session = super::open_template(&args.template, max_size)?;
    session.load(&args.company, &args.job);
    if let Some(grid) = grid {
        session
            .edit_grid(grid)
            .map_err(|e| CliError::from_excel(e, &args.template.label()))?;
    }

    let options = ExportOptions {
        prune_unrouted: !args.keep_reference_sheets,
    };
    let artifact = session
        .export(&details, options)
        .map_err(|e| CliError::from_excel(e, &args.template.label()))?;

    let path = args.output_dir.join(&artifact.file_name);
    write_output(&path, &artifact.bytes)?;
    report(&artifact.diagnostics, mode, config)?;
    report_timing("exported", started.elapsed(), mode, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match mode {
        FormatMode::Human => writeln!(out, "{}", path.display()).map_err(stdout_error),
        FormatMode::Json => {
            let doc = serde_json::json!({
                "path": path.display().to_string(),
                "file_name": artifact.file_name,
                "mime": artifact.mime,
                "sheets": artifact.sheet_names,
            });
            serde_json::to_writer_pretty(&mut out, &doc).map_err(|e| stdout_error(e.into()))?;
            writeln!(out).map_err(stdout_error)
        }
    }
}

/// Builds the header details; `--date` defaults to `today` and `--etd` to
/// the creation date.
fn shipment_details(args: &ExportArgs, today: NaiveDate) -> Result<ShipmentDetails, CliError> {
    let date = parse_date_arg("date", args.date.as_deref())?.unwrap_or(today);
    let etd = parse_date_arg("etd", args.etd.as_deref())?.unwrap_or(date);
    Ok(ShipmentDetails {
        commodity: args.commodity.clone(),
        volume: args.volume.clone(),
        etd,
        attn: args.attn.clone(),
        tel: args.tel.clone(),
        sop: args.sop.clone(),
        date,
    })
}

fn parse_date_arg(flag: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    value
        .map(|v| {
            parse_form_date(v).ok_or_else(|| CliError::InvalidDate {
                flag,
                value: v.to_owned(),
            })
        })
        .transpose()
}
