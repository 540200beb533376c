//! Export file naming.
use std::sync::LazyLock;

use regex::Regex;

/// MIME type of the exported workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

static ILLEGAL_PATH_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/*?:"<>|]"#).unwrap_or_else(|_| {
        // Never reached: the pattern above is always valid.
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

/// Removes characters that are illegal in file names: `\ / * ? : " < > |`.
///
/// Nothing is substituted in their place.
pub fn clean_filename(text: &str) -> String {
    ILLEGAL_PATH_CHARS.replace_all(text, "").into_owned()
}

/// Builds the download name `QUO {job} {company}.xlsx` from sanitized parts.
pub fn export_file_name(job_id: &str, company: &str) -> String {
    format!(
        "QUO {} {}.xlsx",
        clean_filename(job_id),
        clean_filename(company)
    )
}
