//! Constant description of the passbook worksheet layout.
//!
//! Every position here was observed in real exports. The extractor treats
//! these tables as configuration: it scans around them, it never hard-codes
//! them inline.

use crate::koperasi::passbook::model::RowIndex;

/// Header text of the column whose cells hold the member-detail labels.
/// Some exports pad it with leading spaces, so it is compared trimmed.
pub const ANCHOR_COLUMN: &str = "KOPERASI PERMODALAN DAN PERUSAHAAN MELAYU NEGERI SEMBILAN BERHAD";

/// What a member field turns into once its value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFieldKind {
    /// Stored as-is under the output label.
    Plain,
    /// Normalised through the member date format.
    Date,
    /// Raw nominee string handed to the nominee parser.
    NomineeIdentity,
    /// Raw nominee phone merged into the nominee record.
    NomineePhone,
}

/// One member-detail label and where the anchor column is expected to hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberField {
    pub label: &'static str,
    pub row: RowIndex,
    pub kind: MemberFieldKind,
}

impl MemberField {
    const fn new(label: &'static str, row: RowIndex, kind: MemberFieldKind) -> Self {
        Self { label, row, kind }
    }
}

pub const MEMBER_NUMBER: &str = "NO. ANGGOTA";
pub const MEMBER_TITLE: &str = "GELARAN";
pub const MEMBER_NAME: &str = "NAMA";

/// Member fields in output order.
pub const MEMBER_FIELDS: [MemberField; 13] = [
    MemberField::new(MEMBER_NUMBER, 5, MemberFieldKind::Plain),
    MemberField::new(MEMBER_TITLE, 6, MemberFieldKind::Plain),
    MemberField::new(MEMBER_NAME, 7, MemberFieldKind::Plain),
    MemberField::new("NO. K/P", 8, MemberFieldKind::Plain),
    MemberField::new("TARIKH LAHIR", 9, MemberFieldKind::Date),
    MemberField::new("ALAMAT TETAP", 10, MemberFieldKind::Plain),
    MemberField::new("ALAMAT SURAT MENYURAT", 11, MemberFieldKind::Plain),
    MemberField::new("NO. TELEFON ANGGOTA", 12, MemberFieldKind::Plain),
    MemberField::new("PERKERJAAN", 13, MemberFieldKind::Plain),
    MemberField::new("PENAMA / K.P", 14, MemberFieldKind::NomineeIdentity),
    MemberField::new("NO. TELEFON PENAMA", 15, MemberFieldKind::NomineePhone),
    MemberField::new("TARIKH MASUK", 16, MemberFieldKind::Date),
    MemberField::new("TARIKH LULUS ALK", 17, MemberFieldKind::Date),
];

/// Looks up a member field by label.
pub fn member_field(label: &str) -> Option<&'static MemberField> {
    MEMBER_FIELDS.iter().find(|field| field.label == label)
}

/// Value columns tried first when looking for the member number, in order.
pub const PREFERRED_VALUE_COLUMNS: [&str; 2] = ["Unnamed: 3", "Unnamed: 4"];

/// Column used when the member number is missing but the name is present.
/// Checked in this order.
pub const FALLBACK_VALUE_COLUMNS: [&str; 2] = ["Unnamed: 4", "Unnamed: 3"];

/// Plausible member numbers.
pub const MEMBER_NUMBER_RANGE: std::ops::RangeInclusive<i64> = 1000..=99999;

pub const TX_DATE: &str = "TARIKH";
pub const TX_DESCRIPTION: &str = "PERKARA";
pub const TX_TOTAL_BALANCE: &str = "BAKI SEMUA";

/// Single-line transaction headers in output order.
pub const TRANSACTION_HEADERS: [&str; 10] = [
    TX_DATE,
    TX_DESCRIPTION,
    "NO.RESIT",
    "TAHUN",
    "WANG MASUK",
    "WANG KELUAR",
    "BAKI SYER",
    "BAKI BONUS",
    TX_TOTAL_BALANCE,
    "CATATAN",
];

/// Headers split over two rows: first-line token → (second-line token, header).
pub const STACKED_HEADERS: [(&str, &[(&str, &str)]); 2] = [
    ("WANG", &[("MASUK", "WANG MASUK")]),
    (
        "BAKI",
        &[
            ("SYER", "BAKI SYER"),
            ("BONUS", "BAKI BONUS"),
            ("SEMUA", TX_TOTAL_BALANCE),
        ],
    ),
];

/// Unlabelled trailing columns to the right of `BAKI SEMUA`.
pub const ADDITIONAL_DATA_HEADERS: [&str; 3] =
    ["ADDITIONAL_DATA_1", "ADDITIONAL_DATA_2", "ADDITIONAL_DATA_3"];

/// Rows that hold transaction headers in every known export.
pub const TX_HEADER_ROWS: [RowIndex; 2] = [19, 20];

/// Resolves a single-line header label to its canonical `'static` form.
pub fn transaction_header(label: &str) -> Option<&'static str> {
    TRANSACTION_HEADERS
        .iter()
        .copied()
        .find(|header| *header == label)
}

/// Second-line options for a stacked header's first token.
pub fn stacked_header(first_line: &str) -> Option<&'static [(&'static str, &'static str)]> {
    STACKED_HEADERS
        .iter()
        .find(|(token, _)| *token == first_line)
        .map(|(_, options)| *options)
}
