use tracing::debug;

use crate::koperasi::passbook::dates::{DateResolution, DateStyle, resolve_date};
use crate::koperasi::passbook::extract::diagnostics::{Diagnostic, Diagnostics};
use crate::koperasi::passbook::extract::headers::{FieldLocation, HeaderMap};
use crate::koperasi::passbook::layout::{TX_DATE, TX_DESCRIPTION};
use crate::koperasi::passbook::model::{Cell, RowIndex, Table, Transaction};

/// Extracts one transaction per populated row below the headers.
///
/// Candidate rows are the `TARIKH` column's rows below the lowest header. A
/// row is kept when its date renders non-empty or it has a description.
pub fn extract_transactions(
    table: &Table,
    headers: &HeaderMap,
    diagnostics: &mut Diagnostics,
) -> Vec<Transaction> {
    let Some(date_location) = headers.get(TX_DATE) else {
        diagnostics.record(Diagnostic::TarikhHeaderNotFound);
        return Vec::new();
    };
    let (Some(start), Some(date_column)) =
        (headers.data_start_row(), table.column(&date_location.column))
    else {
        return Vec::new();
    };
    debug!(column = %date_location.column, start, "scanning transaction rows");

    let fields = headers.output_order();
    date_column
        .range(start..)
        .filter_map(|(row, _)| build_transaction(table, &fields, *row, diagnostics))
        .collect()
}

fn build_transaction(
    table: &Table,
    fields: &[(&'static str, &FieldLocation)],
    row: RowIndex,
    diagnostics: &mut Diagnostics,
) -> Option<Transaction> {
    let mut transaction = Transaction::new();
    let mut has_date = false;

    for (label, location) in fields {
        let Some(value) = table.cell(&location.column, row) else {
            continue;
        };
        if *label == TX_DATE {
            let resolution = resolve_date(value);
            if let DateResolution::Unparsed(raw) = &resolution {
                diagnostics.record(Diagnostic::DateParseFailure {
                    field: TX_DATE,
                    raw: raw.clone(),
                });
            }
            let rendered = resolution.render(DateStyle::Transaction);
            has_date = !rendered.is_empty();
            transaction.insert(*label, Cell::Text(rendered));
        } else {
            transaction.insert(*label, value.clone());
        }
    }

    let has_description = transaction
        .get(TX_DESCRIPTION)
        .is_some_and(Cell::is_truthy);
    if has_date || has_description {
        Some(transaction)
    } else {
        debug!(row, "dropping row without date or description");
        None
    }
}
