#![deny(clippy::print_stdout, clippy::print_stderr)]
//! Workbook layer for the freight quotation template generator.
//!
//! Reads an uploaded `.xlsx` template, maps a company and route onto
//! quotation line items, and rewrites the template into the exported
//! quotation. The `calamine` and `umya-spreadsheet` dependencies are
//! confined to this crate.
//!
//! # Template layout
//!
//! | Sheet | Purpose |
//! |---|---|
//! | Form | Quotation form; header `A1:J7`, line items `A8:H20`, footer dates `F40`/`H40` |
//! | Data Base | Company directory, one company per row from row 2 |
//! | POL-POD | Route charges; rows grouped by destination region |
//! | *route key* (e.g. `BKK`) | Editable route sheet, kept in the export |
//!
//! # Flow
//!
//! 1. [`QuoteSession::open`] parses the bytes into a value view and a
//!    formula view ([`TemplateWorkbook`]).
//! 2. [`QuoteSession::load`] maps the company and job onto line items and
//!    previews the route-key sheet.
//! 3. [`QuoteSession::edit_grid`] replaces the previewed grid.
//! 4. [`QuoteSession::export`] rewrites the formula view and serializes it.

pub mod error;
pub mod mapper;
pub mod preview;
pub mod reference;
pub mod rewrite;
pub mod session;
mod sheet;
pub mod template;

pub use error::ExcelError;
pub use mapper::{MappedItems, map_line_items};
pub use preview::preview_sheet;
pub use reference::{DirectoryLookup, list_entities, lookup_entity};
pub use rewrite::{ExportOptions, RewriteReport, RewriteRequest, rewrite, to_bytes};
pub use session::{ExportArtifact, MappedQuote, QuoteSession, ShipmentDetails};
pub use template::{TemplateWorkbook, ValueView, sheet_names};
