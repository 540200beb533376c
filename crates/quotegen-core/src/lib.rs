#![deny(clippy::print_stdout, clippy::print_stderr)]
//! Mapping rules for the freight quotation template generator.
//!
//! This crate holds everything that does not need a workbook library:
//! value coercion, route key derivation, line-item and header types, file
//! naming and diagnostics. Reading and rewriting workbooks lives in
//! `quotegen-excel`.

pub mod coerce;
pub mod dates;
pub mod diagnostics;
pub mod filename;
pub mod grid;
pub mod header;
pub mod layout;
pub mod line_item;
pub mod route;

pub use coerce::{CellValue, coerce, coerce_str};
pub use dates::{format_form_date, parse_form_date};
pub use diagnostics::{Diagnostic, DiagnosticCode, Reported, Severity};
pub use filename::{XLSX_MIME, clean_filename, export_file_name};
pub use grid::EditedGrid;
pub use header::{HeaderFields, HeaderSubstitutions, Placeholder};
pub use line_item::{DirectoryEntry, LineItem};
pub use route::{RouteGroup, classify, derive_route_key, pol_pod_from_job, route_rows};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
