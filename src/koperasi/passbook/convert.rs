use std::path::Path;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::koperasi::passbook::clean::clean_tree;
use crate::koperasi::passbook::error::{PassbookError, Result};
use crate::koperasi::passbook::extract::{Extraction, extract_statement};
use crate::koperasi::passbook::io::{excel_read, json};
use crate::koperasi::passbook::layout::MEMBER_NUMBER;
use crate::koperasi::passbook::model::{Statement, Table};

/// Cleans a raw table document and extracts the statement from it.
pub fn statement_from_document(document: Value) -> Result<Extraction> {
    let cleaned = clean_tree(document);
    let table = Table::from_json(&cleaned)?;
    extract_statement(&table)
}

/// A statement without a member number identifies nobody and is not written.
pub fn ensure_essential_fields(statement: &Statement) -> Result<()> {
    if statement.member.contains(MEMBER_NUMBER) {
        Ok(())
    } else {
        Err(PassbookError::MissingEssentialField(MEMBER_NUMBER.to_string()))
    }
}

/// Converts one worksheet of a passbook workbook into a statement file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), sheet = %sheet, output = %output.display())
)]
pub fn excel_to_statement(
    input: &Path,
    sheet: &str,
    output: &Path,
    indent: Option<usize>,
) -> Result<Extraction> {
    ensure_exists(input)?;
    let document = excel_read::read_sheet_table(input, sheet)?;
    info!(columns = column_count(&document), "read worksheet table");
    write_statement(statement_from_document(document)?, output, indent)
}

/// Converts a raw or cleaned table JSON file into a statement file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn table_json_to_statement(
    input: &Path,
    output: &Path,
    indent: Option<usize>,
) -> Result<Extraction> {
    let document = json::read_json(input)?;
    info!(columns = column_count(&document), "read table document");
    write_statement(statement_from_document(document)?, output, indent)
}

/// Writes the cleaned form of any JSON file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn clean_json_file(input: &Path, output: &Path, indent: Option<usize>) -> Result<()> {
    let document = json::read_json(input)?;
    json::write_json(output, &clean_tree(document), indent)
}

/// Writes a worksheet as a raw table document, nulls included.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), sheet = %sheet, output = %output.display())
)]
pub fn excel_to_table_json(
    input: &Path,
    sheet: &str,
    output: &Path,
    indent: Option<usize>,
) -> Result<()> {
    ensure_exists(input)?;
    let document = excel_read::read_sheet_table(input, sheet)?;
    info!(columns = column_count(&document), "read worksheet table");
    json::write_json(output, &document, indent)
}

fn write_statement(extraction: Extraction, output: &Path, indent: Option<usize>) -> Result<Extraction> {
    let warnings = extraction
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.is_warning())
        .count();
    if warnings > 0 {
        warn!(warnings, "statement extracted with layout warnings");
    }

    ensure_essential_fields(&extraction.statement)?;
    json::write_json(output, &extraction.statement, indent)?;
    info!(
        transactions = extraction.statement.transactions.len(),
        "statement written"
    );
    Ok(extraction)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(PassbookError::MissingInput(path.to_path_buf()))
    }
}

fn column_count(document: &Value) -> usize {
    document.as_object().map_or(0, |columns| columns.len())
}
