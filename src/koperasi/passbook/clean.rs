//! Recursive removal of empty noise from exported tables.
//!
//! Spreadsheet exports fill every untouched cell with `null` and many
//! formula cells with `0`. Both are removed before extraction so that "value
//! present" checks only see real data.

use serde_json::{Map, Value};

/// Cleans a JSON tree:
///
/// * object entries whose value is `null` or the number zero are dropped,
/// * object entries and list items that, once cleaned, are non-empty lists of
///   only zeros are dropped,
/// * `null` list items are dropped.
///
/// Zeros inside lists are kept unless the whole list is zeros. `false` is
/// never treated as zero.
pub fn clean_tree(value: Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(clean_object(entries)),
        Value::Array(items) => Value::Array(clean_array(items)),
        other => other,
    }
}

fn clean_object(entries: Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = Map::with_capacity(entries.len());
    for (key, value) in entries {
        if value.is_null() || is_zero(&value) {
            continue;
        }
        let value = clean_tree(value);
        if is_zero_list(&value) {
            continue;
        }
        cleaned.insert(key, value);
    }
    cleaned
}

fn clean_array(items: Vec<Value>) -> Vec<Value> {
    items
        .into_iter()
        .filter(|item| !item.is_null())
        .map(clean_tree)
        .filter(|item| !is_zero_list(item))
        .collect()
}

fn is_zero(value: &Value) -> bool {
    value.as_f64().is_some_and(|number| number == 0.0)
}

fn is_zero_list(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items.iter().all(is_zero),
        _ => false,
    }
}
