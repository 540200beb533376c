//! Shared helpers for `quotegen` integration tests.
#![allow(clippy::expect_used, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use umya_spreadsheet::Spreadsheet;

/// Path to the compiled `quotegen` binary.
pub fn quotegen_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("quotegen");
    path
}

/// Runs `quotegen` with `args`, colors off.
pub fn run(args: &[&str]) -> Output {
    Command::new(quotegen_bin())
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("QUOTEGEN_MAX_FILE_SIZE")
        .output()
        .expect("run quotegen")
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).expect("UTF-8 stdout")
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8(out.stderr.clone()).expect("UTF-8 stderr")
}

/// A template with the form, both reference sheets, a `BKK` route sheet and
/// a `Notes` sheet.
pub fn template_book() -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    let form = book.new_sheet("Form").expect("Form");
    form.get_cell_mut("A1").set_value_string("QUOTATION {{job_id}}");
    form.get_cell_mut("B3").set_value_string("To: {{company}}");
    form.get_cell_mut("B4").set_value_string("ETD: {{ETD}}");
    form.get_cell_mut("B8").set_value_string("stale");

    let directory = book.new_sheet("Data Base").expect("Data Base");
    directory.get_cell_mut("B1").set_value_string("Company");
    for (row, name) in [(2, "Zeta Lines"), (3, "ACME Trading")] {
        directory.get_cell_mut((2, row)).set_value_string(name);
        directory
            .get_cell_mut((3, row))
            .set_value_string("Documentation fee");
        directory.get_cell_mut((4, row)).set_value_number(35);
        directory.get_cell_mut((6, row)).set_value_string("USD");
    }

    let route = book.new_sheet("POL-POD").expect("POL-POD");
    for row in 1..=16u32 {
        route
            .get_cell_mut((2, row))
            .set_value_string(format!("Charge {row}"));
        route.get_cell_mut((3, row)).set_value_number(row * 10);
    }

    let bkk = book.new_sheet("BKK").expect("BKK");
    bkk.get_cell_mut("A1").set_value_string("THC");
    bkk.get_cell_mut("B1").set_value_number(120);
    bkk.get_cell_mut("C1").set_formula("B1*2");

    book.new_sheet("Notes").expect("Notes");
    book
}

/// Writes [`template_book`] into `dir` and returns its path.
pub fn write_template(dir: &Path) -> PathBuf {
    let path = dir.join("template.xlsx");
    umya_spreadsheet::writer::xlsx::write(&template_book(), &path).expect("write template");
    path
}

/// Opens an exported workbook.
pub fn read_book(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).expect("read workbook")
}

/// Sheet names of a workbook, in order.
pub fn sheet_names(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_collection_no_check()
        .iter()
        .map(|ws| ws.get_name().to_owned())
        .collect()
}

/// Display value of a cell, `""` when absent.
pub fn cell_text(book: &Spreadsheet, sheet: &str, addr: &str) -> String {
    book.get_sheet_by_name(sheet)
        .expect("sheet")
        .get_cell(addr)
        .map(|c| c.get_value().into_owned())
        .unwrap_or_default()
}
