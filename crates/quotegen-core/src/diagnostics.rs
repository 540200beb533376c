/// Recoverable conditions reported alongside mapping and export results.
///
/// None of these stop processing. They are collected and returned with the
/// result so the caller can show them to the operator.
use std::fmt;

use serde::Serialize;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The result is unusable for its intended purpose.
    Error,
    /// The result was produced in a degraded form.
    Warning,
    /// Something the operator may want to know.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
            Self::Info => f.write_str("info"),
        }
    }
}

/// Stable identifiers for each condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// The `Data Base` sheet is absent; the company list is empty.
    DirectorySheetMissing,
    /// The `POL-POD` sheet is absent; no route rows were mapped.
    RouteSheetMissing,
    /// The company was not in the directory; a placeholder row was used.
    EntityNotFound,
    /// The route key matched no route group.
    RouteUnclassified,
    /// The route-key sheet does not exist and there was nothing to create it from.
    TargetSheetMissing,
    /// The route-key sheet was created during export.
    TargetSheetCreated,
    /// Reference sheets were deleted from the exported workbook.
    ReferenceSheetsDropped,
}

impl DiagnosticCode {
    /// The code as printed in diagnostics output.
    pub const fn code(self) -> &'static str {
        match self {
            Self::DirectorySheetMissing => "DIRECTORY_SHEET_MISSING",
            Self::RouteSheetMissing => "ROUTE_SHEET_MISSING",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::RouteUnclassified => "ROUTE_UNCLASSIFIED",
            Self::TargetSheetMissing => "TARGET_SHEET_MISSING",
            Self::TargetSheetCreated => "TARGET_SHEET_CREATED",
            Self::ReferenceSheetsDropped => "REFERENCE_SHEETS_DROPPED",
        }
    }

    /// The default severity for this code.
    pub const fn severity(self) -> Severity {
        match self {
            Self::EntityNotFound | Self::TargetSheetCreated => Severity::Info,
            Self::DirectorySheetMissing
            | Self::RouteSheetMissing
            | Self::RouteUnclassified
            | Self::TargetSheetMissing
            | Self::ReferenceSheetsDropped => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single reported condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What happened.
    pub code: DiagnosticCode,
    /// How serious it is.
    pub severity: Severity,
    /// The sheet concerned, if any.
    pub sheet: Option<String>,
    /// A human-readable explanation.
    pub message: String,
}

impl Diagnostic {
    /// Constructs a diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, sheet: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            sheet: sheet.map(str::to_owned),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "E",
            Severity::Warning => "W",
            Severity::Info => "I",
        };
        match &self.sheet {
            Some(sheet) => write!(f, "[{tag}] {}  {sheet}: {}", self.code, self.message),
            None => write!(f, "[{tag}] {}  {}", self.code, self.message),
        }
    }
}

/// A value together with the diagnostics raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reported<T> {
    /// The produced value.
    pub value: T,
    /// Conditions met along the way, in the order they were raised.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Reported<T> {
    /// A value with no diagnostics.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// A value with a single diagnostic.
    pub fn with(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value,
            diagnostics: vec![diagnostic],
        }
    }
}

/// Returns `true` if any diagnostic has the given code.
pub fn has_code(diagnostics: &[Diagnostic], code: DiagnosticCode) -> bool {
    diagnostics.iter().any(|d| d.code == code)
}
