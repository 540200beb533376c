//! Fixed coordinates of the quotation template.
//!
//! All rows and columns are 1-based, matching spreadsheet notation.
//!
//! | Sheet | Layout |
//! |---|---|
//! | `Data Base` | header in row 1; B = company, C..H = description, rate, unit, currency, VAT, PP/CC |
//! | `POL-POD` | B..G = description, rate, unit, currency, VAT, PP/CC; row ranges per route group |
//! | `Form` | header A1:J7 with placeholders, line items A8:H20, footer dates F40 and H40 |

/// The quotation form; always survives export.
pub const FORM_SHEET: &str = "Form";
/// The company directory sheet.
pub const DIRECTORY_SHEET: &str = "Data Base";
/// The route pricing sheet.
pub const ROUTE_SHEET: &str = "POL-POD";

/// First data row of the directory sheet (row 1 is the header).
pub const DIRECTORY_FIRST_ROW: u32 = 2;
/// Company name column in the directory sheet (B).
pub const DIRECTORY_NAME_COL: u32 = 2;
/// Description..PP/CC columns in the directory sheet (C..H).
pub const DIRECTORY_FIELD_COLS: [u32; 6] = [3, 4, 5, 6, 7, 8];

/// Description..PP/CC columns in the route sheet (B..G).
pub const ROUTE_FIELD_COLS: [u32; 6] = [2, 3, 4, 5, 6, 7];

/// A rectangular block of cells, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRegion {
    /// First row.
    pub first_row: u32,
    /// Last row.
    pub last_row: u32,
    /// First column.
    pub first_col: u32,
    /// Last column.
    pub last_col: u32,
}

impl CellRegion {
    /// Iterates `(col, row)` pairs row by row.
    pub fn cells(self) -> impl Iterator<Item = (u32, u32)> {
        (self.first_row..=self.last_row)
            .flat_map(move |row| (self.first_col..=self.last_col).map(move |col| (col, row)))
    }

    /// Number of rows in the region.
    pub fn height(self) -> u32 {
        self.last_row + 1 - self.first_row
    }

    /// Number of columns in the region.
    pub fn width(self) -> u32 {
        self.last_col + 1 - self.first_col
    }
}

/// Line-item block of the form: A8:H20.
pub const LINE_ITEM_REGION: CellRegion = CellRegion {
    first_row: 8,
    last_row: 20,
    first_col: 1,
    last_col: 8,
};

/// Header block scanned for placeholders: A1:J7.
pub const HEADER_REGION: CellRegion = CellRegion {
    first_row: 1,
    last_row: 7,
    first_col: 1,
    last_col: 10,
};

/// Footer cells that receive the creation date, as `(col, row)`: F40 and H40.
pub const FOOTER_DATE_CELLS: [(u32, u32); 2] = [(6, 40), (8, 40)];

/// Column captions for a line item, in field order.
pub const LINE_ITEM_COLUMNS: [&str; 8] = [
    "No",
    "Description",
    "Rate",
    "Unit",
    "Cur",
    "Amount",
    "VAT",
    "PP/CC",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_region_is_13_by_8() {
        assert_eq!(LINE_ITEM_REGION.height(), 13);
        assert_eq!(LINE_ITEM_REGION.width(), 8);
        assert_eq!(LINE_ITEM_REGION.cells().count(), 104);
    }

    #[test]
    fn header_region_is_7_by_10() {
        assert_eq!(HEADER_REGION.height(), 7);
        assert_eq!(HEADER_REGION.width(), 10);
    }

    #[test]
    fn region_iterates_row_major() {
        let region = CellRegion {
            first_row: 2,
            last_row: 3,
            first_col: 1,
            last_col: 2,
        };
        let cells: Vec<_> = region.cells().collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
    }
}
