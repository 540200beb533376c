/// Rewrites the formula view of a template into the exported quotation.
///
/// # Steps
///
/// The steps run in this order on one workbook; a failure part-way leaves
/// the workbook half-rewritten, so callers discard it on error.
///
/// 1. Blank the line-item block `Form!A8:H20`.
/// 2. Write the line items from row 8, coercing each field.
/// 3. Replace placeholder tokens in string cells of `Form!A1:J7`.
/// 4. Write the creation date to `Form!F40` and `Form!H40`.
/// 5. Overwrite the route-key sheet from the edited grid, creating it when
///    there is something to write.
/// 6. Delete every sheet except `Form` and the route-key sheet, then make
///    `Form` the active tab.
/// 7. Serialize ([`to_bytes`]).
use std::io::Cursor;

use serde::Serialize;
use umya_spreadsheet::{Cell, CellRawValue, Spreadsheet, Worksheet};

use quotegen_core::layout::{
    DIRECTORY_SHEET, FOOTER_DATE_CELLS, FORM_SHEET, HEADER_REGION, LINE_ITEM_REGION, ROUTE_SHEET,
};
use quotegen_core::{
    CellValue, Diagnostic, DiagnosticCode, EditedGrid, HeaderSubstitutions, LineItem, coerce,
};

use crate::error::ExcelError;
use crate::template::sheet_names;

/// Switches for the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportOptions {
    /// Prune down to `Form` alone when there is no route-key sheet.
    ///
    /// When `true` (the default) an unrouted export deletes the reference
    /// sheets along with everything else and raises
    /// [`DiagnosticCode::ReferenceSheetsDropped`]. When `false` an unrouted
    /// export keeps every sheet.
    pub prune_unrouted: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            prune_unrouted: true,
        }
    }
}

/// Everything the rewriter needs besides the workbook itself.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRequest<'a> {
    /// Line items to write into the form.
    pub line_items: &'a [LineItem],
    /// Header placeholder values.
    pub substitutions: &'a HeaderSubstitutions,
    /// Creation date, already rendered as `DD-MMM-YY`.
    pub footer_date: &'a str,
    /// Route-key sheet name; empty when the route was not classified.
    pub target_sheet: &'a str,
    /// Edited contents of the route-key sheet.
    pub grid: &'a EditedGrid,
    /// Export switches.
    pub options: ExportOptions,
}

/// What the rewriter did.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RewriteReport {
    /// Header cells whose text changed.
    pub header_cells_replaced: usize,
    /// Grid cells written to the route-key sheet.
    pub target_cells_written: usize,
    /// Sheets deleted by pruning, in workbook order.
    pub removed_sheets: Vec<String>,
    /// Sheets left in the workbook, in workbook order.
    pub kept_sheets: Vec<String>,
    /// Recoverable conditions met along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs steps 1–6 on `book`.
///
/// # Errors
///
/// Returns [`ExcelError::MissingSheet`] when the workbook has no `Form`
/// sheet, and [`ExcelError::SheetEdit`] when a sheet cannot be created or
/// deleted.
pub fn rewrite(
    book: &mut Spreadsheet,
    request: &RewriteRequest<'_>,
) -> Result<RewriteReport, ExcelError> {
    let mut report = RewriteReport::default();

    let form = book
        .get_sheet_by_name_mut(FORM_SHEET)
        .ok_or_else(|| ExcelError::MissingSheet {
            sheet: FORM_SHEET.to_owned(),
        })?;
    clear_line_items(form);
    write_line_items(form, request.line_items);
    report.header_cells_replaced = substitute_header(form, request.substitutions);
    write_footer_dates(form, request.footer_date);

    let mut keep = vec![FORM_SHEET.to_owned()];
    if !request.target_sheet.is_empty() {
        let written = write_target_sheet(book, request.target_sheet, request.grid)?;
        match written {
            TargetOutcome::Missing => report.diagnostics.push(Diagnostic::new(
                DiagnosticCode::TargetSheetMissing,
                Some(request.target_sheet),
                "route sheet not found in template and no grid to create it from",
            )),
            TargetOutcome::Written { created, cells } => {
                if created {
                    report.diagnostics.push(Diagnostic::new(
                        DiagnosticCode::TargetSheetCreated,
                        Some(request.target_sheet),
                        "route sheet created from the edited grid",
                    ));
                }
                report.target_cells_written = cells;
                keep.push(request.target_sheet.to_owned());
            }
        }
    }

    let unrouted = keep.len() == 1;
    if !request.target_sheet.is_empty() || request.options.prune_unrouted {
        report.removed_sheets = prune_sheets(book, &keep)?;
    }
    let dropped_reference = report
        .removed_sheets
        .iter()
        .any(|s| s == DIRECTORY_SHEET || s == ROUTE_SHEET);
    if unrouted && dropped_reference {
        report.diagnostics.push(Diagnostic::new(
            DiagnosticCode::ReferenceSheetsDropped,
            None,
            format!(
                "no route sheet to keep; exported workbook contains only {FORM_SHEET:?} \
                 (removed: {})",
                report.removed_sheets.join(", ")
            ),
        ));
    }

    report.kept_sheets = sheet_names(book);
    Ok(report)
}

/// Serializes the workbook as `.xlsx` bytes.
///
/// # Errors
///
/// Returns [`ExcelError::Write`] if the writer fails.
pub fn to_bytes(book: &Spreadsheet) -> Result<Vec<u8>, ExcelError> {
    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut out).map_err(|e| {
        ExcelError::Write {
            detail: e.to_string(),
        }
    })?;
    Ok(out.into_inner())
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Step 1: blanks every cell of the line-item block, keeping styles.
pub fn clear_line_items(form: &mut Worksheet) {
    for (col, row) in LINE_ITEM_REGION.cells() {
        if form.get_cell((col, row)).is_some() {
            blank(form.get_cell_mut((col, row)));
        }
    }
}

/// Step 2: writes line items from the first row of the block.
///
/// Rows past the end of the block are still written.
pub fn write_line_items(form: &mut Worksheet, items: &[LineItem]) {
    for (row, item) in (LINE_ITEM_REGION.first_row..).zip(items) {
        for (col, field) in (LINE_ITEM_REGION.first_col..).zip(item.fields()) {
            write_value(form.get_cell_mut((col, row)), &CellValue::text(field));
        }
    }
}

/// Step 3: replaces placeholder tokens in the header block.
///
/// Only plain string cells are touched; numbers, booleans and formulas are
/// left alone. Returns the number of cells changed.
pub fn substitute_header(form: &mut Worksheet, substitutions: &HeaderSubstitutions) -> usize {
    let mut replaced = 0;
    for (col, row) in HEADER_REGION.cells() {
        let Some(text) = form.get_cell((col, row)).and_then(string_content) else {
            continue;
        };
        if let Some(next) = substitutions.apply(&text) {
            form.get_cell_mut((col, row)).set_value_string(next);
            replaced += 1;
        }
    }
    replaced
}

/// Step 4: writes the creation date into both footer cells.
pub fn write_footer_dates(form: &mut Worksheet, date: &str) {
    for (col, row) in FOOTER_DATE_CELLS {
        let cell = form.get_cell_mut((col, row));
        cell.get_cell_value_mut().remove_formula();
        cell.set_value_string(date);
    }
}

enum TargetOutcome {
    Missing,
    Written { created: bool, cells: usize },
}

/// Step 5: overwrites the route-key sheet cell by cell.
fn write_target_sheet(
    book: &mut Spreadsheet,
    name: &str,
    grid: &EditedGrid,
) -> Result<TargetOutcome, ExcelError> {
    let exists = book.get_sheet_by_name(name).is_some();
    if !exists && grid.is_empty() {
        return Ok(TargetOutcome::Missing);
    }
    if !exists {
        book.new_sheet(name).map_err(|e| ExcelError::SheetEdit {
            sheet: name.to_owned(),
            detail: e.to_string(),
        })?;
    }
    let sheet = book
        .get_sheet_by_name_mut(name)
        .ok_or_else(|| ExcelError::MissingSheet {
            sheet: name.to_owned(),
        })?;
    let cells = write_grid(sheet, grid);
    Ok(TargetOutcome::Written {
        created: !exists,
        cells,
    })
}

/// Writes every grid cell at its 1-based position; returns cells written.
pub fn write_grid(sheet: &mut Worksheet, grid: &EditedGrid) -> usize {
    let mut written = 0;
    for (r, c, value) in grid.cells() {
        let (Ok(row), Ok(col)) = (u32::try_from(r + 1), u32::try_from(c + 1)) else {
            continue;
        };
        write_value(sheet.get_cell_mut((col, row)), value);
        written += 1;
    }
    written
}

/// Step 6: deletes every sheet not named in `keep`; returns the deleted names.
fn prune_sheets(book: &mut Spreadsheet, keep: &[String]) -> Result<Vec<String>, ExcelError> {
    let doomed: Vec<String> = sheet_names(book)
        .into_iter()
        .filter(|name| !keep.contains(name))
        .collect();
    for name in &doomed {
        book.remove_sheet_by_name(name)
            .map_err(|e| ExcelError::SheetEdit {
                sheet: name.clone(),
                detail: e.to_string(),
            })?;
    }
    if !doomed.is_empty() {
        activate_form(book);
    }
    Ok(doomed)
}

/// Points the workbook's active tab at `Form`; the stored index may refer to
/// a deleted sheet.
fn activate_form(book: &mut Spreadsheet) {
    let index = sheet_names(book)
        .iter()
        .position(|name| name == FORM_SHEET)
        .and_then(|i| u32::try_from(i).ok())
        .unwrap_or(0);
    book.get_workbook_view_mut().set_active_tab(index);
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// Writes a value after coercion: numbers as numbers, `=...` as a formula,
/// `""` as a blank cell, anything else as a string.
pub fn write_value(cell: &mut Cell, value: &CellValue) {
    match coerce(value) {
        CellValue::Empty => blank(cell),
        CellValue::Bool(b) => {
            cell.get_cell_value_mut().remove_formula();
            cell.set_value_bool(b);
        }
        CellValue::Number(n) => {
            cell.get_cell_value_mut().remove_formula();
            cell.set_value_number(n);
        }
        CellValue::Text(s) if s.is_empty() => blank(cell),
        CellValue::Text(s) => match s.strip_prefix('=') {
            Some(formula) => {
                cell.set_formula(formula);
                cell.set_formula_result_default("");
            }
            None => {
                cell.get_cell_value_mut().remove_formula();
                cell.set_value_string(s);
            }
        },
    }
}

fn blank(cell: &mut Cell) {
    cell.get_cell_value_mut().remove_formula();
    cell.set_blank();
}

/// The text of a plain string cell; `None` for formulas and non-text values.
#[allow(clippy::wildcard_enum_match_arm)]
fn string_content(cell: &Cell) -> Option<String> {
    if cell.is_formula() {
        return None;
    }
    match cell.get_cell_value().get_raw_value() {
        CellRawValue::Numeric(_) | CellRawValue::Bool(_) | CellRawValue::Empty => None,
        _ => Some(cell.get_value().into_owned()),
    }
}
