/// Errors produced while reading or rewriting a quotation workbook.
use thiserror::Error;

/// All hard failures of the workbook layer.
///
/// Recoverable conditions (missing reference sheets, unknown routes) are not
/// errors; they are reported as [`quotegen_core::Diagnostic`]s next to the
/// result.
#[derive(Debug, Error)]
pub enum ExcelError {
    /// The uploaded bytes could not be parsed as an `.xlsx` workbook.
    #[error("unreadable workbook: {detail}")]
    Unreadable {
        /// Human-readable description from the spreadsheet library.
        detail: String,
    },

    /// A sheet the operation cannot do without is absent.
    #[error("missing required sheet: {sheet:?}")]
    MissingSheet {
        /// Name of the required sheet.
        sheet: String,
    },

    /// A sheet could not be created or deleted.
    #[error("failed to update sheet {sheet:?}: {detail}")]
    SheetEdit {
        /// Name of the sheet.
        sheet: String,
        /// Description from the spreadsheet library.
        detail: String,
    },

    /// The rewritten workbook could not be serialized.
    #[error("failed to write workbook: {detail}")]
    Write {
        /// Description from the spreadsheet library.
        detail: String,
    },

    /// Export was requested before any company and route were loaded.
    #[error("no quotation loaded; load a company and route before exporting")]
    NotLoaded,
}
