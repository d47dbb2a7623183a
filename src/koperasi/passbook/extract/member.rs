use tracing::debug;

use crate::koperasi::passbook::dates::{DateResolution, DateStyle, resolve_date};
use crate::koperasi::passbook::extract::adjust::MEMBER_ROW_RULES;
use crate::koperasi::passbook::extract::diagnostics::{Diagnostic, Diagnostics};
use crate::koperasi::passbook::layout::{
    FALLBACK_VALUE_COLUMNS, MEMBER_FIELDS, MEMBER_NAME, MEMBER_NUMBER, MEMBER_NUMBER_RANGE,
    MemberField, MemberFieldKind, PREFERRED_VALUE_COLUMNS, member_field,
};
use crate::koperasi::passbook::model::{
    Cell, Column, MemberRecord, RowIndex, Table, is_synthetic_column,
};

/// The column holding member field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueColumn {
    pub name: String,
    /// Row and value of the member number, when it was found by search.
    pub member_number: Option<(RowIndex, i64)>,
}

impl ValueColumn {
    fn is_member_number_cell(&self, row: RowIndex) -> bool {
        self.member_number
            .is_some_and(|(number_row, _)| number_row == row)
    }
}

/// Member fields plus the raw nominee inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberExtraction {
    pub record: MemberRecord,
    pub nominee_identity: Option<Cell>,
    pub nominee_phone: Option<Cell>,
    pub value_column: Option<ValueColumn>,
}

/// Whether the anchor column carries `field`'s label at its expected row.
pub fn has_label(anchor: &Column, field: &MemberField) -> bool {
    anchor
        .get(&field.row)
        .and_then(Cell::as_str)
        .is_some_and(|text| text.trim() == field.label)
}

/// Finds the member value column.
///
/// The member number row and its neighbours are searched across the
/// preferred columns, then every other synthetic column, for a plausible
/// member number. When none turns up, the first fallback column with a value
/// on the name row is used.
pub fn resolve_value_column(
    table: &Table,
    anchor: &Column,
    diagnostics: &mut Diagnostics,
) -> Option<ValueColumn> {
    if let Some(found) = search_member_number(table, anchor) {
        debug!(column = %found.name, member_number = ?found.member_number, "value column located");
        return Some(found);
    }

    let name_row = member_field(MEMBER_NAME)?.row;
    let fallback = FALLBACK_VALUE_COLUMNS
        .iter()
        .find(|column| table.cell(column, name_row).is_some_and(Cell::is_truthy));
    match fallback {
        Some(column) => {
            diagnostics.record(Diagnostic::ValueColumnFallback {
                column: column.to_string(),
            });
            Some(ValueColumn {
                name: column.to_string(),
                member_number: None,
            })
        }
        None => {
            diagnostics.record(Diagnostic::ValueColumnUndetermined);
            None
        }
    }
}

fn search_member_number(table: &Table, anchor: &Column) -> Option<ValueColumn> {
    let field = member_field(MEMBER_NUMBER)?;
    if !has_label(anchor, field) {
        return None;
    }

    let rows = [Some(field.row), field.row.checked_add(1), field.row.checked_sub(1)];
    let mut candidates: Vec<&str> = PREFERRED_VALUE_COLUMNS.to_vec();
    candidates.extend(table.columns().map(|(name, _)| name).filter(|name| {
        is_synthetic_column(name) && !PREFERRED_VALUE_COLUMNS.iter().any(|preferred| preferred == name)
    }));

    for row in rows.into_iter().flatten() {
        for column in &candidates {
            let number = table.cell(column, row).and_then(Cell::as_int);
            if let Some(number) = number.filter(|number| MEMBER_NUMBER_RANGE.contains(number)) {
                return Some(ValueColumn {
                    name: column.to_string(),
                    member_number: Some((row, number)),
                });
            }
        }
    }
    None
}

/// Extracts every member field the anchor column labels.
pub fn extract_member_fields(
    table: &Table,
    anchor: &Column,
    diagnostics: &mut Diagnostics,
) -> MemberExtraction {
    let value_column = resolve_value_column(table, anchor, diagnostics);
    let mut extraction = MemberExtraction::default();

    if let Some((_, number)) = value_column.as_ref().and_then(|column| column.member_number) {
        extraction.record.insert(MEMBER_NUMBER, Cell::Int(number));
    }

    for field in &MEMBER_FIELDS {
        if extraction.record.contains(field.label) {
            continue;
        }
        if !has_label(anchor, field) {
            diagnostics.record(Diagnostic::MemberLabelMissing {
                label: field.label,
                row: field.row,
            });
            continue;
        }
        let Some(value_column) = value_column.as_ref() else {
            continue;
        };
        let Some(value) = read_member_value(table, value_column, field, diagnostics) else {
            continue;
        };

        match field.kind {
            MemberFieldKind::Plain => extraction.record.insert(field.label, value),
            MemberFieldKind::Date => {
                let resolution = resolve_date(&value);
                if let DateResolution::Unparsed(raw) = &resolution {
                    diagnostics.record(Diagnostic::DateParseFailure {
                        field: field.label,
                        raw: raw.clone(),
                    });
                }
                extraction
                    .record
                    .insert(field.label, Cell::Text(resolution.render(DateStyle::Member)));
            }
            MemberFieldKind::NomineeIdentity => extraction.nominee_identity = Some(value),
            MemberFieldKind::NomineePhone => extraction.nominee_phone = Some(value),
        }
    }

    extraction.value_column = value_column;
    extraction
}

/// Reads a field from its own row, then from rows proposed by the adjustment
/// rules. The member number cell is never read for another field.
fn read_member_value(
    table: &Table,
    value_column: &ValueColumn,
    field: &MemberField,
    diagnostics: &mut Diagnostics,
) -> Option<Cell> {
    let read = |row: RowIndex| {
        if value_column.is_member_number_cell(row) {
            return None;
        }
        table.cell(&value_column.name, row).cloned()
    };

    if let Some(value) = read(field.row) {
        return Some(value);
    }

    MEMBER_ROW_RULES.iter().find_map(|rule| {
        let row = (rule.apply)(field, value_column)?;
        diagnostics.record(Diagnostic::RowAdjusted {
            rule: rule.name,
            label: field.label,
            from: field.row,
            to: row,
        });
        read(row)
    })
}
