//! Layout corrections for known bad exports.
//!
//! Each rule is a plain function registered in a list, so a new export
//! variant adds a rule here instead of touching the member or header scans.

use crate::koperasi::passbook::extract::diagnostics::{Diagnostic, Diagnostics};
use crate::koperasi::passbook::extract::headers::{FieldLocation, HeaderMap};
use crate::koperasi::passbook::extract::member::ValueColumn;
use crate::koperasi::passbook::layout::{
    ADDITIONAL_DATA_HEADERS, FALLBACK_VALUE_COLUMNS, MEMBER_NUMBER, MEMBER_TITLE, MemberField,
    TX_TOTAL_BALANCE, member_field,
};
use crate::koperasi::passbook::model::{
    RowIndex, is_synthetic_column, synthetic_column_name, synthetic_column_position,
};

/// A named adjustment rule.
#[derive(Clone, Copy)]
pub struct Rule<F> {
    pub name: &'static str,
    pub apply: F,
}

/// Proposes another row to read when a member field's own row is empty.
pub type MemberRowRule = fn(&MemberField, &ValueColumn) -> Option<RowIndex>;

/// Adds logical transaction columns derived from the located headers.
pub type HeaderRule = fn(&HeaderMap, &mut Diagnostics) -> Vec<(&'static str, FieldLocation)>;

pub const MEMBER_ROW_RULES: &[Rule<MemberRowRule>] = &[Rule {
    name: "gelaran-transposed",
    apply: gelaran_transposed,
}];

pub const HEADER_RULES: &[Rule<HeaderRule>] = &[Rule {
    name: "additional-data-after-balance",
    apply: additional_data_after_balance,
}];

/// Some exports swap the GELARAN value with the member number: the number
/// sits one row below its label and the title one row above its own. Only
/// seen with `Unnamed: 4` as the value column.
pub fn gelaran_transposed(field: &MemberField, value_column: &ValueColumn) -> Option<RowIndex> {
    if field.label != MEMBER_TITLE || value_column.name != FALLBACK_VALUE_COLUMNS[0] {
        return None;
    }
    let number_label_row = member_field(MEMBER_NUMBER)?.row;
    let (number_row, _) = value_column.member_number?;
    if number_row != number_label_row + 1 {
        return None;
    }
    field.row.checked_sub(1)
}

/// Registers `ADDITIONAL_DATA_1..3` in the three synthetic columns right of
/// `BAKI SEMUA`, sharing its header row.
pub fn additional_data_after_balance(
    headers: &HeaderMap,
    diagnostics: &mut Diagnostics,
) -> Vec<(&'static str, FieldLocation)> {
    let Some(balance) = headers.get(TX_TOTAL_BALANCE) else {
        return Vec::new();
    };
    if !is_synthetic_column(&balance.column) {
        return Vec::new();
    }
    let Some(position) = synthetic_column_position(&balance.column) else {
        diagnostics.record(Diagnostic::AdditionalDataUnresolved {
            column: balance.column.clone(),
        });
        return Vec::new();
    };

    ADDITIONAL_DATA_HEADERS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let location = FieldLocation {
                column: synthetic_column_name(position + index + 1),
                row: balance.row,
                offset: balance.offset,
            };
            (*label, location)
        })
        .collect()
}
