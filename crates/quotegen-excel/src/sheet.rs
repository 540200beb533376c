/// Shared helpers for reading calamine ranges with 1-based coordinates.
use calamine::{Data, Range};

use quotegen_core::CellValue;

/// Converts a `calamine::Data` cell to a [`CellValue`].
///
/// Error cells read as blank, like empty ones.
pub fn data_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

/// Reads the cell at 1-based `(row, col)`; outside the used range is blank.
pub fn cell_value(sheet: &Range<Data>, row: u32, col: u32) -> CellValue {
    if row == 0 || col == 0 {
        return CellValue::Empty;
    }
    sheet
        .get_value((row - 1, col - 1))
        .map_or(CellValue::Empty, data_to_value)
}

/// Reads a cell as display text, with blanks as `""`.
pub fn cell_string(sheet: &Range<Data>, row: u32, col: u32) -> String {
    cell_value(sheet, row, col).to_display_string()
}

/// The last used 1-based row, or 0 for an empty sheet.
pub fn last_row(sheet: &Range<Data>) -> u32 {
    sheet.end().map_or(0, |(row, _)| row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Range<Data> {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 1), Data::String("Company".to_owned()));
        range.set_value((1, 1), Data::String("ACME".to_owned()));
        range.set_value((1, 2), Data::Float(1500.0));
        range.set_value((2, 2), Data::Int(7));
        range
    }

    #[test]
    fn reads_one_based_coordinates() {
        let range = sample();
        assert_eq!(cell_string(&range, 1, 2), "Company");
        assert_eq!(cell_string(&range, 2, 2), "ACME");
        assert_eq!(cell_value(&range, 2, 3), CellValue::Number(1500.0));
    }

    #[test]
    fn whole_floats_display_without_fraction() {
        let range = sample();
        assert_eq!(cell_string(&range, 2, 3), "1500");
        assert_eq!(cell_string(&range, 3, 3), "7");
    }

    #[test]
    fn outside_range_is_blank() {
        let range = sample();
        assert_eq!(cell_value(&range, 40, 1), CellValue::Empty);
        assert_eq!(cell_value(&range, 0, 1), CellValue::Empty);
    }

    #[test]
    fn last_row_is_one_based() {
        assert_eq!(last_row(&sample()), 3);
        assert_eq!(last_row(&Range::<Data>::empty()), 0);
    }
}
