//! Integration tests for `quotegen companies`.
#![allow(clippy::expect_used)]

mod common;

use common::{quotegen_bin, run, stderr, stdout, write_template};

#[test]
fn lists_companies_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write_template(dir.path());
    let out = run(&["companies", template.to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "ACME Trading\nZeta Lines\n");
    assert!(stderr(&out).is_empty());
}

#[test]
fn json_is_an_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write_template(dir.path());
    let out = run(&[
        "companies",
        template.to_str().expect("path"),
        "--format",
        "json",
    ]);
    assert_eq!(out.status.code(), Some(0));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    assert_eq!(parsed, serde_json::json!(["ACME Trading", "Zeta Lines"]));
}

#[test]
fn missing_file_exits_2() {
    let out = run(&["companies", "/no/such/template.xlsx"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("file not found"));
}

#[test]
fn non_workbook_exits_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.xlsx");
    std::fs::write(&path, b"just text").expect("write");
    let out = run(&["companies", path.to_str().expect("path")]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("not a readable workbook"));
}

#[test]
fn oversized_template_exits_2() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write_template(dir.path());
    let out = run(&[
        "companies",
        template.to_str().expect("path"),
        "--max-file-size",
        "16",
    ]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("too large"));
}

#[test]
fn any_no_color_value_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write_template(dir.path());
    for value in ["1", "yes", "true", ""] {
        let out = std::process::Command::new(quotegen_bin())
            .args(["companies", template.to_str().expect("path")])
            .env("NO_COLOR", value)
            .output()
            .expect("run quotegen");
        assert_eq!(
            out.status.code(),
            Some(0),
            "NO_COLOR={value:?}: {}",
            stderr(&out)
        );
        assert_eq!(stdout(&out), "ACME Trading\nZeta Lines\n");
    }
}
