use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, PassbookError>;

/// Exit code reported when a sheet is skipped rather than converted.
pub const EXIT_SKIPPED: i32 = 1;
/// Exit code reported for unexpected failures.
pub const EXIT_FAILED: i32 = 2;

/// Error type covering the different failure cases that can occur when a
/// passbook sheet is loaded, cleaned, or converted into a statement.
#[derive(Debug, Error)]
pub enum PassbookError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the spreadsheet reader.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Raised when the requested sheet identifier does not resolve to a sheet.
    #[error("sheet '{identifier}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        identifier: String,
        available: Vec<String>,
    },

    /// Raised when the anchor column is missing from the table.
    #[error("anchor column '{0}' not found in table")]
    AnchorNotFound(String),

    /// Raised when a statement was produced without a field the output needs.
    #[error("statement is missing essential field '{0}'")]
    MissingEssentialField(String),

    /// Raised when the input JSON does not have the column → row → cell shape.
    #[error("invalid table structure: {0}")]
    InvalidTable(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl PassbookError {
    /// Whether the error means "nothing to convert here" rather than a fault.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            PassbookError::SheetNotFound { .. }
                | PassbookError::AnchorNotFound(_)
                | PassbookError::MissingEssentialField(_)
        )
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_skip() {
            EXIT_SKIPPED
        } else {
            EXIT_FAILED
        }
    }
}
