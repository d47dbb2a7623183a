//! Layout inference and statement extraction.
//!
//! The extractor never trusts absolute positions alone: it locates the anchor
//! column, searches around the expected member rows for the value column,
//! scans a small window for transaction headers, and only then reads data.
//! Misses degrade the output and are reported as [`Diagnostic`]s; only a
//! missing anchor column stops extraction.

pub mod adjust;
pub mod anchor;
pub mod diagnostics;
pub mod headers;
pub mod member;
pub mod nominee;
pub mod transactions;

use tracing::{info, instrument};

use crate::koperasi::passbook::error::Result;
use crate::koperasi::passbook::model::{Statement, Table};

pub use diagnostics::{Diagnostic, Diagnostics};
pub use headers::{FieldLocation, HeaderMap};

/// A statement together with everything the heuristics had to work around.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub statement: Statement,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a [`Statement`] from a cleaned table.
#[instrument(level = "debug", skip_all, fields(columns = table.len()))]
pub fn extract_statement(table: &Table) -> Result<Extraction> {
    let mut diagnostics = Diagnostics::default();

    let anchor = anchor::locate_anchor(table)?;
    let member = member::extract_member_fields(table, anchor, &mut diagnostics);
    let nominee = nominee::build_nominee(member.nominee_identity.as_ref(), member.nominee_phone);

    let headers = headers::locate_headers(table, &mut diagnostics);
    let transactions = transactions::extract_transactions(table, &headers, &mut diagnostics);

    info!(
        member_fields = member.record.len(),
        headers = headers.len(),
        transactions = transactions.len(),
        "statement extracted"
    );

    Ok(Extraction {
        statement: Statement {
            member: member.record,
            nominee,
            transactions,
        },
        diagnostics: diagnostics.into_vec(),
    })
}
