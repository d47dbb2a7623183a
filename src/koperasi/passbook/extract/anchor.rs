use crate::koperasi::passbook::error::{PassbookError, Result};
use crate::koperasi::passbook::layout::ANCHOR_COLUMN;
use crate::koperasi::passbook::model::{Column, Table};

/// Finds the anchor column, ignoring whitespace around its name.
pub fn locate_anchor(table: &Table) -> Result<&Column> {
    table
        .columns()
        .find(|(name, _)| name.trim() == ANCHOR_COLUMN)
        .map(|(_, column)| column)
        .ok_or_else(|| PassbookError::AnchorNotFound(ANCHOR_COLUMN.to_string()))
}
