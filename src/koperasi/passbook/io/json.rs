use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::koperasi::passbook::error::{PassbookError, Result};

/// Reads and parses a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(PassbookError::MissingInput(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Serialises a value, compact when `indent` is `None`, otherwise pretty
/// printed with `indent` spaces per level.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, indent: Option<usize>) -> Result<String> {
    let Some(width) = indent else {
        return Ok(serde_json::to_string(value)?);
    };

    let indent = b" ".repeat(width);
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer)
        .map_err(|err| PassbookError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

/// Serialises the whole document before touching the file, so a failure
/// never leaves a partial output behind.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: Option<usize>) -> Result<()> {
    let rendered = to_json_string(value, indent)?;
    fs::write(path, rendered)?;
    Ok(())
}
