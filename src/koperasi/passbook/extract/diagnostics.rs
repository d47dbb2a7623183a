use std::fmt;

use tracing::{debug, warn};

use crate::koperasi::passbook::model::RowIndex;

/// A heuristic miss or correction observed while extracting a statement.
/// None of these stop the extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The anchor column does not hold the expected label at its row.
    MemberLabelMissing { label: &'static str, row: RowIndex },
    /// No plausible member number was found; a fallback column was used.
    ValueColumnFallback { column: String },
    /// Neither the member number nor a fallback column could be found.
    ValueColumnUndetermined,
    /// An adjustment rule redirected a read to another row.
    RowAdjusted {
        rule: &'static str,
        label: &'static str,
        from: RowIndex,
        to: RowIndex,
    },
    /// An adjustment rule could not place columns relative to a header.
    AdditionalDataUnresolved { column: String },
    /// No `TARIKH` transaction header was found.
    TarikhHeaderNotFound,
    /// A date cell could not be interpreted and was kept as text.
    DateParseFailure { field: &'static str, raw: String },
}

impl Diagnostic {
    /// Warnings point at layout problems; the rest are expected corrections.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::ValueColumnFallback { .. }
                | Diagnostic::ValueColumnUndetermined
                | Diagnostic::AdditionalDataUnresolved { .. }
                | Diagnostic::TarikhHeaderNotFound
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MemberLabelMissing { label, row } => {
                write!(f, "member label '{label}' not found at row {row}")
            }
            Diagnostic::ValueColumnFallback { column } => {
                write!(f, "member number not found, using fallback value column '{column}'")
            }
            Diagnostic::ValueColumnUndetermined => {
                write!(f, "could not identify the member value column")
            }
            Diagnostic::RowAdjusted {
                rule,
                label,
                from,
                to,
            } => write!(f, "rule '{rule}' moved '{label}' from row {from} to row {to}"),
            Diagnostic::AdditionalDataUnresolved { column } => write!(
                f,
                "could not place additional data columns relative to '{column}'"
            ),
            Diagnostic::TarikhHeaderNotFound => {
                write!(f, "TARIKH transaction header not found")
            }
            Diagnostic::DateParseFailure { field, raw } => {
                write!(f, "could not read '{raw}' in '{field}' as a date")
            }
        }
    }
}

/// Collects diagnostics and mirrors each one to the log as it is recorded.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            warn!(%diagnostic, "extraction diagnostic");
        } else {
            debug!(%diagnostic, "extraction diagnostic");
        }
        self.entries.push(diagnostic);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
