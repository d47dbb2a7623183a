//! Data representations shared by the loader, the cleaner, and the extractor.
//!
//! A [`Table`] mirrors the `{column: {row: cell}}` JSON document produced when
//! a worksheet is exported column by column. Row keys are kept as integers so
//! that lookups and ordering are numeric (`"9"` sorts before `"10"`).

mod statement;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::koperasi::passbook::error::{PassbookError, Result};

pub use statement::{MemberRecord, NomineeRecord, Record, Statement, Transaction};

/// Zero-based row position within a column, relative to the header row.
pub type RowIndex = u32;

/// Sparse row → cell mapping for a single column.
pub type Column = BTreeMap<RowIndex, Cell>;

/// Prefix given to columns whose header cell is empty.
pub const SYNTHETIC_COLUMN_PREFIX: &str = "Unnamed:";

/// A single non-empty cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// Text literal.
    Text(String),
    /// Boolean literal.
    Bool(bool),
}

impl Cell {
    /// Returns the text content when the cell holds a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer content. Floats and booleans are not integers here.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether the value counts as "present" (non-empty text, non-zero number,
    /// `true`).
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Int(value) => *value != 0,
            Cell::Float(value) => *value != 0.0,
            Cell::Text(value) => !value.is_empty(),
            Cell::Bool(value) => *value,
        }
    }

    /// Converts the cell into its JSON representation.
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Int(value) => Value::from(*value),
            Cell::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Cell::Text(value) => Value::String(value.clone()),
            Cell::Bool(value) => Value::Bool(*value),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// Column-oriented worksheet table. Column order follows the source document
/// and defines scan order for every heuristic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a column, replacing any existing column with the same name in
    /// place.
    pub fn insert_column(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = column,
            None => self.columns.push((name, column)),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, column)| column)
    }

    pub fn cell(&self, column: &str, row: RowIndex) -> Option<&Cell> {
        self.column(column).and_then(|cells| cells.get(&row))
    }

    /// Iterates over `(name, column)` pairs in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns
            .iter()
            .map(|(name, column)| (name.as_str(), column))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Builds a table from a `{column: {row: cell}}` JSON document.
    ///
    /// Null cells are skipped and row keys that are not plain non-negative
    /// integers are ignored, since no lookup can ever address them.
    pub fn from_json(document: &Value) -> Result<Self> {
        let object = document.as_object().ok_or_else(|| {
            PassbookError::InvalidTable("expected a JSON object of columns".into())
        })?;

        let mut table = Table::new();
        for (name, cells) in object {
            let cells = cells.as_object().ok_or_else(|| {
                PassbookError::InvalidTable(format!("column '{name}' is not a JSON object"))
            })?;
            table.insert_column(name.clone(), parse_column(name, cells)?);
        }
        Ok(table)
    }

    /// Serialises the table back into the `{column: {row: cell}}` shape.
    pub fn to_json(&self) -> Value {
        let mut document = Map::new();
        for (name, column) in &self.columns {
            let cells: Map<String, Value> = column
                .iter()
                .map(|(row, cell)| (row.to_string(), cell.to_json()))
                .collect();
            document.insert(name.clone(), Value::Object(cells));
        }
        Value::Object(document)
    }
}

fn parse_column(name: &str, cells: &Map<String, Value>) -> Result<Column> {
    let mut column = Column::new();
    for (key, value) in cells {
        let Some(row) = parse_row_key(key) else {
            tracing::debug!(column = name, key = key.as_str(), "ignoring non-numeric row key");
            continue;
        };
        let cell = match value {
            Value::Null => continue,
            Value::Bool(value) => Cell::Bool(*value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => Cell::Int(value),
                None => Cell::Float(number.as_f64().ok_or_else(|| {
                    PassbookError::InvalidTable(format!(
                        "invalid number literal in column '{name}' row {key}"
                    ))
                })?),
            },
            Value::String(value) => Cell::Text(value.clone()),
            Value::Array(_) | Value::Object(_) => {
                return Err(PassbookError::InvalidTable(format!(
                    "nested value in column '{name}' row {key}"
                )));
            }
        };
        column.insert(row, cell);
    }
    Ok(column)
}

/// Parses a row key made only of ASCII digits.
pub fn parse_row_key(key: &str) -> Option<RowIndex> {
    if key.is_empty() || !key.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Builds the synthetic name used for a column without a header.
pub fn synthetic_column_name(position: usize) -> String {
    format!("{SYNTHETIC_COLUMN_PREFIX} {position}")
}

/// Whether the column name is a synthetic placeholder.
pub fn is_synthetic_column(name: &str) -> bool {
    name.starts_with(SYNTHETIC_COLUMN_PREFIX)
}

/// Extracts `N` from a synthetic `"Unnamed: N"` column name.
pub fn synthetic_column_position(name: &str) -> Option<usize> {
    name.strip_prefix(SYNTHETIC_COLUMN_PREFIX)?
        .trim()
        .parse()
        .ok()
}
