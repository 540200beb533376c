//! Implementation of `quotegen map <template> --company C --job J`.
//!
//! Shows the route derived from the job and the line items the quotation
//! form would receive. Human mode prints a tab-separated table; JSON mode
//! prints one object with the route and the items.
use std::io::Write;

use quotegen_core::LineItem;
use quotegen_core::layout::LINE_ITEM_COLUMNS;
use quotegen_excel::MappedQuote;

use crate::PathOrStdin;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, report, stdout_error};

/// Runs the `map` command.
///
/// # Errors
///
/// Returns [`CliError`] when the template cannot be read or parsed.
pub fn run(
    template: &PathOrStdin,
    company: &str,
    job: &str,
    max_size: u64,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let mut session = super::open_template(template, max_size)?;
    let mapped = session.load(company, job);
    report(&mapped.diagnostics, mode, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match mode {
        FormatMode::Human => write_table(&mut out, mapped).map_err(stdout_error),
        FormatMode::Json => {
            let doc = serde_json::json!({
                "company": mapped.company,
                "job_id": mapped.job_id,
                "pol_pod": mapped.pol_pod,
                "route_key": mapped.route_key,
                "group": mapped.group,
                "line_items": mapped.line_items,
            });
            serde_json::to_writer_pretty(&mut out, &doc).map_err(|e| stdout_error(e.into()))?;
            writeln!(out).map_err(stdout_error)
        }
    }
}

fn write_table<W: Write>(out: &mut W, mapped: &MappedQuote) -> std::io::Result<()> {
    writeln!(out, "job:       {}", mapped.job_id)?;
    writeln!(out, "pol/pod:   {}", mapped.pol_pod)?;
    match mapped.group {
        Some(group) => writeln!(out, "route key: {} ({group})", mapped.route_key)?,
        None => writeln!(out, "route key: {} (unrouted)", mapped.route_key)?,
    }
    writeln!(out)?;
    writeln!(out, "{}", LINE_ITEM_COLUMNS.join("\t"))?;
    for item in &mapped.line_items {
        writeln!(out, "{}", row(item))?;
    }
    Ok(())
}

fn row(item: &LineItem) -> String {
    item.fields().join("\t")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use quotegen_core::{EditedGrid, RouteGroup};

    use super::*;

    fn mapped(group: Option<RouteGroup>) -> MappedQuote {
        MappedQuote {
            company: "ACME".to_owned(),
            job_id: "HCMBKK01".to_owned(),
            pol_pod: "HCM-BKK".to_owned(),
            route_key: "BKK".to_owned(),
            group,
            line_items: vec![LineItem::placeholder("ACME")],
            grid: EditedGrid::new(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn table_has_route_header_and_rows() {
        let mut buf: Vec<u8> = Vec::new();
        write_table(&mut buf, &mapped(Some(RouteGroup::Asia))).expect("write");
        let s = String::from_utf8(buf).expect("utf8");
        assert!(s.contains("route key: BKK (asia)"), "output: {s}");
        assert!(s.contains("No\tDescription\tRate"), "output: {s}");
        assert!(s.contains("1\tACME\t\t\t\t\t\t\n"), "output: {s:?}");
    }

    #[test]
    fn unrouted_is_labelled() {
        let mut buf: Vec<u8> = Vec::new();
        write_table(&mut buf, &mapped(None)).expect("write");
        let s = String::from_utf8(buf).expect("utf8");
        assert!(s.contains("(unrouted)"), "output: {s}");
    }
}
