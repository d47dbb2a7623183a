use std::collections::HashMap;
use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::koperasi::passbook::error::{PassbookError, Result};
use crate::koperasi::passbook::model::synthetic_column_name;

/// Days between the Excel epoch (1899-12-30) and the Unix epoch.
const EXCEL_UNIX_EPOCH_OFFSET_DAYS: f64 = 25_569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Largest float that still represents every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Reads one worksheet into the raw `{column: {row: cell}}` table document.
///
/// The first used row is the header row. Empty header cells become
/// `Unnamed: N` with `N` the absolute column position, repeated names get
/// `.1`, `.2`, … suffixes, and data rows are numbered from zero below the
/// header. Empty cells are kept as `null` so the document reflects the sheet
/// exactly; the cleaner removes them later.
pub fn read_sheet_table(path: &Path, identifier: &str) -> Result<Value> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let sheet = resolve_sheet_name(&sheet_names, identifier)
        .ok_or_else(|| sheet_not_found(identifier, &sheet_names))?
        .to_string();
    debug!(sheet = %sheet, identifier, "resolved worksheet");

    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| sheet_not_found(identifier, &sheet_names))?
        .map_err(PassbookError::from)?;
    Ok(range_to_table(&range))
}

/// Resolves a sheet identifier: exact name, then the first name starting
/// with the identifier, then the identifier's leading digits as an exact
/// name and finally as a prefix.
pub fn resolve_sheet_name<'a>(sheet_names: &'a [String], identifier: &str) -> Option<&'a str> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return None;
    }

    let names = || sheet_names.iter().map(String::as_str);

    if let Some(name) = names().find(|name| *name == identifier) {
        return Some(name);
    }
    if let Some(name) = names().find(|name| name.starts_with(identifier)) {
        return Some(name);
    }

    let digits: String = identifier
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    names()
        .find(|name| name.trim() == digits)
        .or_else(|| names().find(|name| name.starts_with(digits.as_str())))
}

fn sheet_not_found(identifier: &str, sheet_names: &[String]) -> PassbookError {
    PassbookError::SheetNotFound {
        identifier: identifier.to_string(),
        available: sheet_names.to_vec(),
    }
}

fn range_to_table(range: &Range<DataType>) -> Value {
    let Some((_, start_col)) = range.start() else {
        return Value::Object(Map::new());
    };
    let leading = start_col as usize;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Value::Object(Map::new());
    };

    let width = leading + header.len();
    let header_cells = (0..width).map(|position| {
        position
            .checked_sub(leading)
            .and_then(|offset| header.get(offset))
    });
    let names = column_names(header_cells);

    let mut columns: Vec<Map<String, Value>> = vec![Map::new(); width];
    for (row_index, row) in rows.enumerate() {
        let key = row_index.to_string();
        for (position, column) in columns.iter_mut().enumerate() {
            let cell = position
                .checked_sub(leading)
                .and_then(|offset| row.get(offset));
            column.insert(key.clone(), cell.map(cell_to_json).unwrap_or(Value::Null));
        }
    }

    let document: Map<String, Value> = names
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| (name, Value::Object(cells)))
        .collect();
    Value::Object(document)
}

fn column_names<'a>(header: impl Iterator<Item = Option<&'a DataType>>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .enumerate()
        .map(|(position, cell)| {
            let base = cell
                .and_then(header_text)
                .unwrap_or_else(|| synthetic_column_name(position));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn header_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(value) if value.is_empty() => None,
        DataType::String(value) => Some(value.clone()),
        DataType::Int(value) => Some(value.to_string()),
        // f64 Display already omits the trailing ".0" of integral values.
        DataType::Float(value) => Some(value.to_string()),
        DataType::Bool(value) => Some(value.to_string()),
        DataType::Empty | DataType::Error(_) => None,
        other => Some(other.to_string()),
    }
}

fn cell_to_json(cell: &DataType) -> Value {
    match cell {
        DataType::Int(value) => Value::from(*value),
        DataType::Float(value) => float_to_json(*value),
        DataType::String(value) if value.is_empty() => Value::Null,
        DataType::String(value) => Value::String(value.clone()),
        DataType::Bool(value) => Value::Bool(*value),
        DataType::DateTime(serial) => {
            let millis = (serial - EXCEL_UNIX_EPOCH_OFFSET_DAYS) * MILLIS_PER_DAY;
            Value::from(millis.round() as i64)
        }
        DataType::Empty | DataType::Error(_) => Value::Null,
        other => Value::String(other.to_string()),
    }
}

/// Whole numbers are exported as integers, matching how spreadsheet readers
/// hand back numeric cells that were typed without decimals.
fn float_to_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
