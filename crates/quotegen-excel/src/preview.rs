/// Loads the route-key sheet as an editable grid.
///
/// The grid is read from the formula view, so formula cells come through as
/// `=...` text and survive an unedited round trip back into the workbook.
use umya_spreadsheet::{Cell, CellRawValue, Spreadsheet};

use quotegen_core::{CellValue, EditedGrid};

/// Reads the used range of `sheet_name` (from A1) into a grid.
///
/// Returns `None` when the sheet does not exist.
pub fn preview_sheet(book: &Spreadsheet, sheet_name: &str) -> Option<EditedGrid> {
    if sheet_name.is_empty() {
        return None;
    }
    let sheet = book.get_sheet_by_name(sheet_name)?;
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let rows = (1..=max_row)
        .map(|row| {
            (1..=max_col)
                .map(|col| sheet.get_cell((col, row)).map_or(CellValue::Empty, read_cell))
                .collect()
        })
        .collect();
    Some(EditedGrid::from_rows(rows))
}

/// Converts a formula-view cell to a [`CellValue`].
#[allow(clippy::wildcard_enum_match_arm)]
pub fn read_cell(cell: &Cell) -> CellValue {
    if cell.is_formula() {
        return CellValue::Text(format!("={}", cell.get_formula()));
    }
    match cell.get_cell_value().get_raw_value() {
        CellRawValue::Numeric(n) => CellValue::Number(*n),
        CellRawValue::Bool(b) => CellValue::Bool(*b),
        CellRawValue::Empty => CellValue::Empty,
        _ => CellValue::Text(cell.get_value().into_owned()),
    }
}
