/// Cell values and best-effort numeric coercion.
///
/// Every value that flows between the reference tables, the edited grid and
/// the output workbook is a [`CellValue`]. [`coerce`] turns numeric-looking
/// text into numbers right before a cell is written, so the exported
/// quotation contains real numbers where the template had free text.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar cell value.
///
/// Serialized untagged so that a JSON grid of `null`, booleans, numbers and
/// strings maps onto the variants directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A blank cell.
    #[default]
    Empty,
    /// A boolean cell.
    Bool(bool),
    /// A numeric cell.
    Number(f64),
    /// A text cell. Text starting with `=` is a formula.
    Text(String),
}

impl CellValue {
    /// Builds a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns `true` for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this is text beginning with `=` (after trimming).
    pub fn is_formula(&self) -> bool {
        match self {
            Self::Text(s) => s.trim_start().starts_with('='),
            Self::Empty | Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Renders the value the way it is shown in a line item.
    ///
    /// Whole numbers below 1e15 render without a fractional part, so a rate
    /// of `1500.0` becomes `"1500"`. Blank renders as the empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_owned(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Converts free text into a number when that is safe.
///
/// - Non-text values are returned unchanged.
/// - Whitespace-only text is returned unchanged.
/// - Formula text (leading `=`) is returned trimmed, never parsed.
/// - Otherwise thousands separators (`,`) are stripped and the remainder is
///   parsed as `f64`; a finite result becomes [`CellValue::Number`], anything
///   else falls back to the trimmed text.
///
/// This never fails.
pub fn coerce(value: &CellValue) -> CellValue {
    let CellValue::Text(raw) = value else {
        return value.clone();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return value.clone();
    }
    if trimmed.starts_with('=') {
        return CellValue::Text(trimmed.to_owned());
    }
    match trimmed.replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        Ok(_) | Err(_) => CellValue::Text(trimmed.to_owned()),
    }
}

/// Convenience wrapper over [`coerce`] for string input.
pub fn coerce_str(s: &str) -> CellValue {
    coerce(&CellValue::text(s))
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn format_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
