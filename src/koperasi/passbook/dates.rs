//! Date normalisation for passbook cells.
//!
//! Dates reach the extractor in three shapes: free text typed into the sheet,
//! Excel serial day counts, and Unix millisecond timestamps produced when a
//! date-typed cell is exported to JSON. All three are rendered into one
//! upper-case display format; anything unrecognised is passed through as text.

use chrono::{DateTime, Days, NaiveDate};

use crate::koperasi::passbook::model::Cell;

/// Text formats tried in order; the first full match wins.
pub const TEXT_DATE_FORMATS: [&str; 7] = [
    "%d-%m-%y", "%d/%m/%y", "%d-%b-%y", "%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%d/%m/%Y",
];

/// Integer values read as Excel serial day counts.
pub const EXCEL_SERIAL_RANGE: std::ops::RangeInclusive<i64> = 10_000..=70_000;

/// Timestamps must exceed one day in milliseconds to be read as Unix time.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Display format applied to a recognised date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `01-JAN-13`, used for member details.
    Member,
    /// `01-01-13`, used for transaction rows.
    Transaction,
}

impl DateStyle {
    pub fn pattern(self) -> &'static str {
        match self {
            DateStyle::Member => "%d-%b-%y",
            DateStyle::Transaction => "%d-%m-%y",
        }
    }
}

/// Outcome of interpreting a cell as a date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateResolution {
    /// The cell was recognised as a calendar date.
    Parsed(NaiveDate),
    /// The cell could not be read as a date; holds its text form.
    Unparsed(String),
}

impl DateResolution {
    pub fn is_parsed(&self) -> bool {
        matches!(self, DateResolution::Parsed(_))
    }

    /// Renders the resolution in the given style, upper-cased.
    pub fn render(&self, style: DateStyle) -> String {
        match self {
            DateResolution::Parsed(date) => date.format(style.pattern()).to_string().to_uppercase(),
            DateResolution::Unparsed(text) => text.to_uppercase(),
        }
    }
}

/// Normalises a cell into the display form for `style`.
pub fn normalize_date(value: &Cell, style: DateStyle) -> String {
    resolve_date(value).render(style)
}

/// Interprets a cell as a date.
///
/// Numbers are tried as an Excel serial first and as Unix milliseconds
/// second. The ranges do not overlap today, but the order is kept explicit in
/// case the serial range is ever widened.
pub fn resolve_date(value: &Cell) -> DateResolution {
    match value {
        Cell::Text(text) => parse_text_date(text)
            .map(DateResolution::Parsed)
            .unwrap_or_else(|| DateResolution::Unparsed(text.clone())),
        Cell::Int(number) => resolve_integer(*number),
        Cell::Float(number) => resolve_float(*number),
        Cell::Bool(flag) => DateResolution::Unparsed(flag.to_string()),
    }
}

fn parse_text_date(text: &str) -> Option<NaiveDate> {
    TEXT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn resolve_integer(number: i64) -> DateResolution {
    let parsed = if EXCEL_SERIAL_RANGE.contains(&number) {
        from_excel_serial(number)
    } else if number.unsigned_abs() > MILLIS_PER_DAY as u64 {
        from_unix_millis(number)
    } else {
        None
    };
    parsed
        .map(DateResolution::Parsed)
        .unwrap_or_else(|| DateResolution::Unparsed(number.to_string()))
}

fn resolve_float(number: f64) -> DateResolution {
    let parsed = if !number.is_finite() {
        None
    } else if number.fract() == 0.0 && EXCEL_SERIAL_RANGE.contains(&(number as i64)) {
        from_excel_serial(number as i64)
    } else if number.abs() > MILLIS_PER_DAY as f64 && number.abs() < i64::MAX as f64 {
        from_unix_millis(number.round() as i64)
    } else {
        None
    };
    // f64 Display already omits the trailing ".0" of integral values.
    parsed
        .map(DateResolution::Parsed)
        .unwrap_or_else(|| DateResolution::Unparsed(number.to_string()))
}

fn from_excel_serial(days: i64) -> Option<NaiveDate> {
    let offset = u64::try_from(days).ok()?;
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(offset))
}

fn from_unix_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|instant| instant.date_naive())
}
