/// The two parsed views of one uploaded template.
///
/// The same bytes are parsed twice:
///
/// | View | Library | Used for |
/// |---|---|---|
/// | values | `calamine` | directory and route lookups (cached formula results) |
/// | formulas | `umya-spreadsheet` | preview, rewriting and export (formulas and styles intact) |
///
/// Only the formula view is ever mutated or serialized.
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use umya_spreadsheet::Spreadsheet;

use quotegen_core::layout::{DIRECTORY_SHEET, ROUTE_SHEET};

use crate::error::ExcelError;

/// Computed-value view of the reference sheets.
#[derive(Debug, Clone, Default)]
pub struct ValueView {
    sheet_names: Vec<String>,
    directory: Option<Range<Data>>,
    route: Option<Range<Data>>,
}

impl ValueView {
    /// Parses the workbook with calamine and extracts the reference sheets.
    ///
    /// # Errors
    ///
    /// Returns [`ExcelError::Unreadable`] if the bytes are not an `.xlsx`
    /// workbook or a present reference sheet cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExcelError> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(
            |e: calamine::XlsxError| ExcelError::Unreadable {
                detail: e.to_string(),
            },
        )?;
        let sheet_names = workbook.sheet_names();
        let directory = read_optional(&mut workbook, &sheet_names, DIRECTORY_SHEET)?;
        let route = read_optional(&mut workbook, &sheet_names, ROUTE_SHEET)?;
        Ok(Self {
            sheet_names,
            directory,
            route,
        })
    }

    /// Builds a view from already-decoded ranges.
    pub fn from_ranges(
        sheet_names: Vec<String>,
        directory: Option<Range<Data>>,
        route: Option<Range<Data>>,
    ) -> Self {
        Self {
            sheet_names,
            directory,
            route,
        }
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// The `Data Base` sheet, if present.
    pub fn directory(&self) -> Option<&Range<Data>> {
        self.directory.as_ref()
    }

    /// The `POL-POD` sheet, if present.
    pub fn route(&self) -> Option<&Range<Data>> {
        self.route.as_ref()
    }
}

fn read_optional(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    sheet_names: &[String],
    name: &str,
) -> Result<Option<Range<Data>>, ExcelError> {
    if !sheet_names.iter().any(|s| s == name) {
        return Ok(None);
    }
    workbook
        .worksheet_range(name)
        .map(Some)
        .map_err(|e| ExcelError::Unreadable {
            detail: format!("failed to read sheet {name:?}: {e}"),
        })
}

/// One uploaded template: the value view plus the formula-preserving workbook.
#[derive(Debug, Clone)]
pub struct TemplateWorkbook {
    values: ValueView,
    formulas: Spreadsheet,
}

impl TemplateWorkbook {
    /// Parses `bytes` into both views.
    ///
    /// # Errors
    ///
    /// Returns [`ExcelError::Unreadable`] if either library rejects the bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExcelError> {
        let values = ValueView::from_bytes(bytes)?;
        let formulas = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
            .map_err(|e| ExcelError::Unreadable {
                detail: e.to_string(),
            })?;
        Ok(Self { values, formulas })
    }

    /// The computed-value view.
    pub fn values(&self) -> &ValueView {
        &self.values
    }

    /// The formula-preserving workbook.
    pub fn formulas(&self) -> &Spreadsheet {
        &self.formulas
    }

    /// Consumes the template, keeping only the workbook to be rewritten.
    pub fn into_formulas(self) -> Spreadsheet {
        self.formulas
    }
}

/// Sheet names of a formula-view workbook, in order.
pub fn sheet_names(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_collection_no_check()
        .iter()
        .map(|ws| ws.get_name().to_owned())
        .collect()
}
