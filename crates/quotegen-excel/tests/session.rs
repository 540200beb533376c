//! End-to-end tests for the quotation session over an in-memory template.
#![allow(clippy::expect_used)]

use std::io::Cursor;

use chrono::NaiveDate;
use umya_spreadsheet::{CellRawValue, Spreadsheet};

use quotegen_core::diagnostics::has_code;
use quotegen_core::{CellValue, DiagnosticCode, EditedGrid, RouteGroup, XLSX_MIME};
use quotegen_excel::{ExcelError, ExportOptions, QuoteSession, ShipmentDetails, TemplateWorkbook};

/// A template with a form, both reference sheets, a `BKK` route sheet and
/// an unrelated `Notes` sheet.
fn template_book() -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    let form = book.new_sheet("Form").expect("Form");
    form.get_cell_mut("A1").set_value_string("QUOTATION");
    form.get_cell_mut("B2").set_value_string("Job: {{job_id}}");
    form.get_cell_mut("B3").set_value_string("To: {{company}} ({{attn}})");
    form.get_cell_mut("B4").set_value_string("Route: {{pol_pod}}  ETD: {{ETD}}");
    form.get_cell_mut("B5").set_value_string("{{com}} / {{volume}}");
    form.get_cell_mut("G6").set_value_string("Date: {{date}}");
    for row in 8..=20u32 {
        form.get_cell_mut((2, row)).set_value_string("stale");
    }
    form.get_cell_mut("A21").set_value_string("Total");
    form.get_cell_mut("F40").set_value_string("01-Jan-20");

    let directory = book.new_sheet("Data Base").expect("Data Base");
    for (col, title) in ["No", "Company", "Description", "Rate", "Unit", "Currency"]
        .iter()
        .enumerate()
    {
        let col = u32::try_from(col).expect("col") + 1;
        directory.get_cell_mut((col, 1)).set_value_string(*title);
    }
    let rows = [
        ("Zeta Lines", "Handling fee", 40),
        ("ACME Trading", "Documentation fee", 35),
    ];
    for (i, (name, desc, rate)) in rows.iter().enumerate() {
        let row = u32::try_from(i).expect("row") + 2;
        directory.get_cell_mut((2, row)).set_value_string(*name);
        directory.get_cell_mut((3, row)).set_value_string(*desc);
        directory.get_cell_mut((4, row)).set_value_number(*rate);
        directory.get_cell_mut((5, row)).set_value_string("BL");
        directory.get_cell_mut((6, row)).set_value_string("USD");
        directory.get_cell_mut((7, row)).set_value_string("N");
        directory.get_cell_mut((8, row)).set_value_string("PP");
    }

    let route = book.new_sheet("POL-POD").expect("POL-POD");
    for row in 1..=16u32 {
        route
            .get_cell_mut((2, row))
            .set_value_string(format!("Charge {row}"));
        route.get_cell_mut((3, row)).set_value_number(row * 10);
        route.get_cell_mut((4, row)).set_value_string("CNTR");
        route.get_cell_mut((5, row)).set_value_string("USD");
    }

    let bkk = book.new_sheet("BKK").expect("BKK");
    bkk.get_cell_mut("A1").set_value_string("Local charges BKK");
    bkk.get_cell_mut("A2").set_value_string("THC");
    bkk.get_cell_mut("B2").set_value_number(120);
    bkk.get_cell_mut("C2").set_formula("B2*2");

    let notes = book.new_sheet("Notes").expect("Notes");
    notes.get_cell_mut("A1").set_value_string("internal");

    book
}

fn template_bytes() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&template_book(), &mut out).expect("write");
    out.into_inner()
}

fn details() -> ShipmentDetails {
    ShipmentDetails {
        commodity: "Furniture".to_owned(),
        volume: "1x40HC".to_owned(),
        etd: NaiveDate::from_ymd_opt(2026, 11, 2).expect("date"),
        attn: "Ms. Linh".to_owned(),
        tel: "+84 28 1234".to_owned(),
        sop: "SOP-7".to_owned(),
        date: NaiveDate::from_ymd_opt(2026, 10, 19).expect("date"),
    }
}

fn reopen(bytes: &[u8]) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).expect("reopen")
}

fn text(book: &Spreadsheet, sheet: &str, addr: &str) -> String {
    book.get_sheet_by_name(sheet)
        .expect("sheet")
        .get_cell(addr)
        .map(|c| c.get_value().into_owned())
        .unwrap_or_default()
}

#[test]
fn template_parses_into_both_views() {
    let template = TemplateWorkbook::from_bytes(&template_bytes()).expect("parse");
    assert_eq!(
        template.values().sheet_names(),
        ["Form", "Data Base", "POL-POD", "BKK", "Notes"]
    );
    assert!(template.values().directory().is_some());
    assert!(template.formulas().get_sheet_by_name("BKK").is_some());
}

#[test]
fn garbage_bytes_are_unreadable() {
    let err = QuoteSession::open(b"not a workbook").expect_err("garbage");
    assert!(matches!(err, ExcelError::Unreadable { .. }));
}

#[test]
fn entities_are_sorted() {
    let session = QuoteSession::open(&template_bytes()).expect("open");
    let listed = session.entities();
    assert_eq!(listed.value, vec!["ACME Trading", "Zeta Lines"]);
    assert!(listed.diagnostics.is_empty());
}

#[test]
fn load_maps_asia_route_to_seven_items() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    let mapped = session.load("ACME Trading", "hcmbkk0425");
    assert_eq!(mapped.job_id, "HCMBKK0425");
    assert_eq!(mapped.pol_pod, "HCM-BKK");
    assert_eq!(mapped.route_key, "BKK");
    assert_eq!(mapped.group, Some(RouteGroup::Asia));
    assert_eq!(mapped.line_items.len(), 7);
    assert_eq!(
        mapped.line_items.first().map(|i| i.description.as_str()),
        Some("Documentation fee")
    );
    assert_eq!(
        mapped.line_items.get(1).map(|i| i.description.as_str()),
        Some("Charge 3")
    );
    assert_eq!(mapped.grid.get(1, 1), Some(&CellValue::Number(120.0)));
    assert_eq!(mapped.grid.get(1, 2), Some(&CellValue::text("=B2*2")));
    assert!(mapped.diagnostics.is_empty());
}

#[test]
fn export_before_load_fails() {
    let session = QuoteSession::open(&template_bytes()).expect("open");
    let err = session
        .export(&details(), ExportOptions::default())
        .expect_err("not loaded");
    assert!(matches!(err, ExcelError::NotLoaded));
}

#[test]
fn edit_before_load_fails() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    let err = session.edit_grid(EditedGrid::new()).expect_err("not loaded");
    assert!(matches!(err, ExcelError::NotLoaded));
}

#[test]
fn export_keeps_form_and_route_sheet() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    session.load("ACME Trading", "HCMBKK0425");
    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");

    assert_eq!(artifact.file_name, "QUO HCMBKK0425 ACME Trading.xlsx");
    assert_eq!(artifact.mime, XLSX_MIME);
    assert_eq!(artifact.sheet_names, vec!["Form", "BKK"]);

    let book = reopen(&artifact.bytes);
    let names: Vec<String> = book
        .get_sheet_collection_no_check()
        .iter()
        .map(|ws| ws.get_name().to_owned())
        .collect();
    assert_eq!(names, vec!["Form", "BKK"]);
}

#[test]
fn pruning_moves_active_tab_to_form() {
    for (job, active, kept) in [("HCMBKK", 3, 2), ("HCM", 4, 1)] {
        let mut book = template_book();
        book.get_workbook_view_mut().set_active_tab(active);
        let mut bytes = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut bytes).expect("write");

        let mut session = QuoteSession::open(&bytes.into_inner()).expect("open");
        session.load("ACME Trading", job);
        let artifact = session
            .export(&details(), ExportOptions::default())
            .expect("export");
        assert_eq!(artifact.sheet_names.len(), kept, "{job}");

        let exported = reopen(&artifact.bytes);
        let tab = *exported.get_workbook_view().get_active_tab();
        assert!(usize::try_from(tab).expect("tab") < kept, "{job}: active tab {tab}");
        assert_eq!(tab, 0, "{job}: Form is the first sheet");
    }
}

#[test]
fn export_rewrites_form() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    session.load("ACME Trading", "HCMBKK0425");
    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");
    let book = reopen(&artifact.bytes);

    assert_eq!(text(&book, "Form", "A1"), "QUOTATION");
    assert_eq!(text(&book, "Form", "B2"), "Job: HCMBKK0425");
    assert_eq!(text(&book, "Form", "B3"), "To: ACME Trading (Ms. Linh)");
    assert_eq!(text(&book, "Form", "B4"), "Route: HCM-BKK  ETD: 02-Nov-26");
    assert_eq!(text(&book, "Form", "B5"), "Furniture / 1x40HC");
    assert_eq!(text(&book, "Form", "G6"), "Date: 19-Oct-26");

    assert_eq!(text(&book, "Form", "B8"), "Documentation fee");
    assert_eq!(text(&book, "Form", "B9"), "Charge 3");
    assert_eq!(text(&book, "Form", "B14"), "Charge 8");
    assert_eq!(text(&book, "Form", "B15"), "");
    assert_eq!(text(&book, "Form", "B20"), "");
    assert_eq!(text(&book, "Form", "A21"), "Total");

    let rate = book
        .get_sheet_by_name("Form")
        .and_then(|s| s.get_cell("C8"))
        .expect("C8");
    assert!(matches!(
        rate.get_cell_value().get_raw_value(),
        CellRawValue::Numeric(n) if (*n - 35.0).abs() < f64::EPSILON
    ));

    assert_eq!(text(&book, "Form", "F40"), "19-Oct-26");
    assert_eq!(text(&book, "Form", "H40"), "19-Oct-26");
}

#[test]
fn edited_grid_lands_in_route_sheet() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    let mut grid = session.load("ACME Trading", "HCMBKK0425").grid.clone();
    grid.set(1, 1, CellValue::text("1,500"));
    grid.set(3, 0, CellValue::text("Surcharge"));
    grid.set(3, 1, CellValue::text("=B2+10"));
    session.edit_grid(grid).expect("edit");

    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");
    let book = reopen(&artifact.bytes);
    let bkk = book.get_sheet_by_name("BKK").expect("BKK");

    assert!(matches!(
        bkk.get_cell("B2").expect("B2").get_cell_value().get_raw_value(),
        CellRawValue::Numeric(n) if (*n - 1500.0).abs() < f64::EPSILON
    ));
    assert_eq!(bkk.get_cell("C2").expect("C2").get_formula(), "B2*2");
    assert_eq!(text(&book, "BKK", "A4"), "Surcharge");
    assert_eq!(bkk.get_cell("B4").expect("B4").get_formula(), "B2+10");
}

#[test]
fn unrouted_job_exports_form_only() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    let mapped = session.load("ACME Trading", "HCM");
    assert_eq!(mapped.route_key, "");
    assert_eq!(mapped.line_items.len(), 1);
    assert!(has_code(&mapped.diagnostics, DiagnosticCode::RouteUnclassified));

    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");
    assert_eq!(artifact.sheet_names, vec!["Form"]);
    assert!(has_code(
        &artifact.diagnostics,
        DiagnosticCode::ReferenceSheetsDropped
    ));
}

#[test]
fn unrouted_job_can_keep_every_sheet() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    session.load("ACME Trading", "HCM");
    let artifact = session
        .export(
            &details(),
            ExportOptions {
                prune_unrouted: false,
            },
        )
        .expect("export");
    assert_eq!(
        artifact.sheet_names,
        vec!["Form", "Data Base", "POL-POD", "BKK", "Notes"]
    );
    assert!(!has_code(
        &artifact.diagnostics,
        DiagnosticCode::ReferenceSheetsDropped
    ));
}

#[test]
fn missing_route_sheet_is_created_from_edits() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    let mapped = session.load("ACME Trading", "HCMSHA01");
    assert_eq!(mapped.route_key, "SHA");
    assert!(mapped.grid.is_empty());
    assert!(has_code(&mapped.diagnostics, DiagnosticCode::TargetSheetMissing));

    session
        .edit_grid(EditedGrid::from_rows(vec![vec![
            CellValue::text("THC"),
            CellValue::text("95"),
        ]]))
        .expect("edit");
    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");
    assert_eq!(artifact.sheet_names, vec!["Form", "SHA"]);
    assert!(has_code(&artifact.diagnostics, DiagnosticCode::TargetSheetCreated));
    assert_eq!(text(&reopen(&artifact.bytes), "SHA", "A1"), "THC");
}

#[test]
fn missing_route_sheet_without_edits_exports_form_only() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    session.load("ACME Trading", "HCMSHA01");
    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");
    assert_eq!(artifact.sheet_names, vec!["Form"]);
}

#[test]
fn unknown_company_uses_placeholder_row() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    let mapped = session.load("Nobody Ltd", "HCMINC");
    assert_eq!(mapped.group, Some(RouteGroup::Subcontinent));
    assert_eq!(mapped.line_items.len(), 6);
    assert_eq!(
        mapped.line_items.first().map(|i| i.fields()),
        Some(["1", "Nobody Ltd", "", "", "", "", "", ""])
    );
    assert!(has_code(&mapped.diagnostics, DiagnosticCode::EntityNotFound));
}

#[test]
fn file_name_is_sanitized() {
    let mut session = QuoteSession::open(&template_bytes()).expect("open");
    session.load("A/B: \"Trading\"", "HCMBKK");
    let artifact = session
        .export(&details(), ExportOptions::default())
        .expect("export");
    assert_eq!(artifact.file_name, "QUO HCMBKK AB Trading.xlsx");
}
