use tracing::debug;

use crate::koperasi::passbook::extract::adjust::HEADER_RULES;
use crate::koperasi::passbook::extract::diagnostics::Diagnostics;
use crate::koperasi::passbook::layout::{
    TRANSACTION_HEADERS, TX_HEADER_ROWS, stacked_header, transaction_header,
};
use crate::koperasi::passbook::model::{Cell, RowIndex, Table};

/// Resolved position of a logical field within the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLocation {
    pub column: String,
    /// Row holding the header (the second line for stacked headers).
    pub row: RowIndex,
    /// Rows between the header and the first data row.
    pub offset: RowIndex,
}

impl FieldLocation {
    pub fn new(column: impl Into<String>, row: RowIndex) -> Self {
        Self {
            column: column.into(),
            row,
            offset: 1,
        }
    }
}

/// Logical transaction header → location, first match wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    entries: Vec<(&'static str, FieldLocation)>,
}

impl HeaderMap {
    /// Records a location unless the header is already placed. Returns
    /// whether the location was stored.
    pub fn insert_if_absent(&mut self, label: &'static str, location: FieldLocation) -> bool {
        if self.contains(label) {
            return false;
        }
        self.entries.push((label, location));
        true
    }

    pub fn get(&self, label: &str) -> Option<&FieldLocation> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == label)
            .map(|(_, location)| location)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First row below every located header.
    pub fn data_start_row(&self) -> Option<RowIndex> {
        self.entries
            .iter()
            .map(|(_, location)| location.row + location.offset)
            .max()
    }

    /// Headers in output order: the canonical transaction headers first,
    /// then derived columns in the order they were registered.
    pub fn output_order(&self) -> Vec<(&'static str, &FieldLocation)> {
        let canonical = TRANSACTION_HEADERS
            .iter()
            .filter_map(|label| self.get(label).map(|location| (*label, location)));
        let derived = self
            .entries
            .iter()
            .filter(|(label, _)| !TRANSACTION_HEADERS.contains(label))
            .map(|(label, location)| (*label, location));
        canonical.chain(derived).collect()
    }
}

/// Scans the typical header rows of every column for transaction headers,
/// then applies the header adjustment rules.
pub fn locate_headers(table: &Table, diagnostics: &mut Diagnostics) -> HeaderMap {
    let mut headers = HeaderMap::default();

    for (name, column) in table.columns() {
        for row in TX_HEADER_ROWS {
            let Some(text) = column.get(&row).and_then(Cell::as_str) else {
                continue;
            };
            let text = text.trim();

            if let Some(header) = transaction_header(text) {
                if headers.insert_if_absent(header, FieldLocation::new(name, row)) {
                    debug!(header, column = name, row, "located transaction header");
                }
            } else if let Some(options) = stacked_header(text) {
                let second_row = row + 1;
                let second_line = column
                    .get(&second_row)
                    .and_then(Cell::as_str)
                    .map(str::trim)
                    .unwrap_or_default();
                for (token, header) in options {
                    if second_line == *token
                        && headers.insert_if_absent(*header, FieldLocation::new(name, second_row))
                    {
                        debug!(header, column = name, row = second_row, "located stacked header");
                    }
                }
            }
        }
    }

    for rule in HEADER_RULES {
        for (label, location) in (rule.apply)(&headers, diagnostics) {
            debug!(rule = rule.name, header = label, column = %location.column, "derived column");
            headers.insert_if_absent(label, location);
        }
    }

    headers
}
