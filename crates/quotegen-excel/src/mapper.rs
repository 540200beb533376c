/// Builds the quotation line items for a company and route.
///
/// Line item 1 always comes from the directory (or is the placeholder row);
/// items 2..N are the route-sheet rows of the route key's group, in row
/// order. Every item has the same eight fields and a blank amount.
use serde::Serialize;

use quotegen_core::layout::{ROUTE_FIELD_COLS, ROUTE_SHEET};
use quotegen_core::{
    Diagnostic, DiagnosticCode, LineItem, RouteGroup, classify, derive_route_key,
};

use crate::reference::lookup_entity;
use crate::sheet::cell_string;
use crate::template::ValueView;

/// Result of mapping a company and route onto line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedItems {
    /// Ordered line items, directory row first.
    pub line_items: Vec<LineItem>,
    /// Derived route key; empty when the route code has no separator.
    pub route_key: String,
    /// Group the key classified into, if any.
    pub group: Option<RouteGroup>,
    /// Recoverable conditions met while mapping.
    pub diagnostics: Vec<Diagnostic>,
}

/// Maps `entity` and `route_code` (a POL/POD string such as `HCM-BKK`) to
/// line items.
///
/// With a route sheet present the output has `1 + rows(group)` items.
/// Without one, only the directory row is produced and a
/// [`DiagnosticCode::RouteSheetMissing`] warning is raised.
pub fn map_line_items(view: &ValueView, entity: &str, route_code: &str) -> MappedItems {
    let lookup = lookup_entity(view, entity);
    let mut diagnostics = lookup.diagnostics;
    let mut line_items = vec![lookup.value.to_line_item()];

    let route_key = derive_route_key(route_code).to_owned();
    let group = classify(&route_key);

    match (group, view.route()) {
        (None, _) => diagnostics.push(Diagnostic::new(
            DiagnosticCode::RouteUnclassified,
            None,
            format!("route key {route_key:?} matches no route group; no route rows mapped"),
        )),
        (Some(_), None) => diagnostics.push(Diagnostic::new(
            DiagnosticCode::RouteSheetMissing,
            Some(ROUTE_SHEET),
            "route sheet is missing; no route rows mapped",
        )),
        (Some(group), Some(sheet)) => {
            for (offset, row) in group.rows().enumerate() {
                let fields = ROUTE_FIELD_COLS.map(|col| cell_string(sheet, row, col));
                line_items.push(LineItem::new(offset + 2, fields));
            }
        }
    }

    MappedItems {
        line_items,
        route_key,
        group,
        diagnostics,
    }
}
