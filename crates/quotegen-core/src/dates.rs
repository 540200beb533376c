//! Date rendering and parsing for the quotation form.
use chrono::NaiveDate;

/// Format used in the header and footer cells, e.g. `19-Oct-26`.
pub const FORM_DATE_FORMAT: &str = "%d-%b-%y";

/// Renders a date as `DD-MMM-YY`.
pub fn format_form_date(date: NaiveDate) -> String {
    date.format(FORM_DATE_FORMAT).to_string()
}

/// Parses a user-entered date, accepting `YYYY-MM-DD` or `DD/MM/YYYY`.
///
/// Returns `None` when neither format matches.
pub fn parse_form_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}
