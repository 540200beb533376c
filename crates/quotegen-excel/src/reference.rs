/// Company directory reader.
///
/// The `Data Base` sheet has a header in row 1 and one company per row
/// from row 2: B = name, C..H = description, rate, unit, currency, VAT,
/// PP/CC. Names may repeat; the first matching row wins.
use std::collections::BTreeSet;

use calamine::{Data, Range};

use quotegen_core::layout::{
    DIRECTORY_FIELD_COLS, DIRECTORY_FIRST_ROW, DIRECTORY_NAME_COL, DIRECTORY_SHEET,
};
use quotegen_core::{Diagnostic, DiagnosticCode, DirectoryEntry, LineItem, Reported};

use crate::sheet::{cell_string, last_row};
use crate::template::ValueView;

/// Lists every company in the directory, de-duplicated and sorted.
///
/// A missing directory sheet yields an empty list and a
/// [`DiagnosticCode::DirectorySheetMissing`] warning.
pub fn list_entities(view: &ValueView) -> Reported<Vec<String>> {
    let Some(sheet) = view.directory() else {
        return Reported::with(Vec::new(), directory_missing());
    };
    let names: BTreeSet<String> = data_rows(sheet)
        .map(|row| cell_string(sheet, row, DIRECTORY_NAME_COL))
        .filter(|name| !name.is_empty())
        .collect();
    Reported::clean(names.into_iter().collect())
}

/// Outcome of looking a company up in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryLookup {
    /// The first row whose name matched.
    Found(DirectoryEntry),
    /// No row matched; carries the name that was searched for.
    NotFound(String),
}

impl DirectoryLookup {
    /// Line item 1 for the quotation: the entry's fields, or the fixed
    /// placeholder row when the company was not found.
    pub fn to_line_item(&self) -> LineItem {
        match self {
            Self::Found(entry) => LineItem::from(entry),
            Self::NotFound(name) => LineItem::placeholder(name),
        }
    }

    /// Returns `true` for [`DirectoryLookup::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Finds the first directory row whose name equals `name` exactly.
///
/// Never fails: a missing sheet or an unknown name both give
/// [`DirectoryLookup::NotFound`], with a diagnostic saying which.
pub fn lookup_entity(view: &ValueView, name: &str) -> Reported<DirectoryLookup> {
    let Some(sheet) = view.directory() else {
        return Reported::with(DirectoryLookup::NotFound(name.to_owned()), directory_missing());
    };
    let found = data_rows(sheet)
        .find(|row| cell_string(sheet, *row, DIRECTORY_NAME_COL) == name)
        .map(|row| read_entry(sheet, row));
    match found {
        Some(entry) => Reported::clean(DirectoryLookup::Found(entry)),
        None => Reported::with(
            DirectoryLookup::NotFound(name.to_owned()),
            Diagnostic::new(
                DiagnosticCode::EntityNotFound,
                Some(DIRECTORY_SHEET),
                format!("company {name:?} not found; using a placeholder row"),
            ),
        ),
    }
}

fn data_rows(sheet: &Range<Data>) -> impl Iterator<Item = u32> {
    DIRECTORY_FIRST_ROW..=last_row(sheet)
}

fn read_entry(sheet: &Range<Data>, row: u32) -> DirectoryEntry {
    let [description, rate, unit, currency, vat, payment_term] =
        DIRECTORY_FIELD_COLS.map(|col| cell_string(sheet, row, col));
    DirectoryEntry {
        name: cell_string(sheet, row, DIRECTORY_NAME_COL),
        description,
        rate,
        unit,
        currency,
        vat,
        payment_term,
    }
}

fn directory_missing() -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::DirectorySheetMissing,
        Some(DIRECTORY_SHEET),
        "directory sheet is missing; no companies available",
    )
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Range};

    use super::*;

    fn directory(rows: &[(&str, &str)]) -> Range<Data> {
        let height = u32::try_from(rows.len()).unwrap_or(0);
        let mut range = Range::new((0, 0), (height, 7));
        range.set_value((0, 1), Data::String("Company".to_owned()));
        for (i, (name, desc)) in rows.iter().enumerate() {
            let r = u32::try_from(i).unwrap_or(0) + 1;
            if !name.is_empty() {
                range.set_value((r, 1), Data::String((*name).to_owned()));
            }
            range.set_value((r, 2), Data::String((*desc).to_owned()));
            range.set_value((r, 3), Data::Float(25.0));
            range.set_value((r, 5), Data::String("USD".to_owned()));
        }
        range
    }

    fn view(rows: &[(&str, &str)]) -> ValueView {
        ValueView::from_ranges(vec!["Data Base".to_owned()], Some(directory(rows)), None)
    }

    #[test]
    fn entities_are_sorted_and_unique() {
        let v = view(&[
            ("Zeta Lines", "a"),
            ("ACME", "b"),
            ("Zeta Lines", "c"),
            ("", "d"),
            ("Maersk", "e"),
        ]);
        let listed = list_entities(&v);
        assert_eq!(listed.value, vec!["ACME", "Maersk", "Zeta Lines"]);
        assert!(listed.diagnostics.is_empty());
    }

    #[test]
    fn header_row_is_skipped() {
        let v = view(&[("ACME", "a")]);
        assert!(!list_entities(&v).value.contains(&"Company".to_owned()));
    }

    #[test]
    fn missing_directory_is_a_warning() {
        let v = ValueView::from_ranges(vec!["Form".to_owned()], None, None);
        let listed = list_entities(&v);
        assert!(listed.value.is_empty());
        assert_eq!(
            listed.diagnostics.first().map(|d| d.code),
            Some(DiagnosticCode::DirectorySheetMissing)
        );
    }

    #[test]
    fn lookup_takes_first_match() {
        let v = view(&[("ACME", "first"), ("ACME", "second")]);
        let found = lookup_entity(&v, "ACME");
        match found.value {
            DirectoryLookup::Found(entry) => {
                assert_eq!(entry.description, "first");
                assert_eq!(entry.rate, "25");
                assert_eq!(entry.unit, "");
                assert_eq!(entry.currency, "USD");
            }
            DirectoryLookup::NotFound(_) => unreachable!("ACME is in the directory"),
        }
    }

    #[test]
    fn lookup_is_exact() {
        let v = view(&[("ACME", "a")]);
        assert!(!lookup_entity(&v, "acme").value.is_found());
        assert!(!lookup_entity(&v, "ACME ").value.is_found());
    }

    #[test]
    fn unknown_company_gets_placeholder_row() {
        let v = view(&[("ACME", "a")]);
        let looked = lookup_entity(&v, "Nobody Ltd");
        assert_eq!(
            looked.value.to_line_item().fields(),
            ["1", "Nobody Ltd", "", "", "", "", "", ""]
        );
        assert_eq!(
            looked.diagnostics.first().map(|d| d.code),
            Some(DiagnosticCode::EntityNotFound)
        );
    }
}
