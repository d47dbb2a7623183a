#![allow(dead_code)]

use serde_json::{Value, json};

/// Anchor header as it appears in one historical export, padded on the left.
pub const PADDED_ANCHOR: &str =
    "              KOPERASI PERMODALAN DAN PERUSAHAAN MELAYU NEGERI SEMBILAN BERHAD";

/// Member labels in the anchor column, keyed by row.
pub fn anchor_labels() -> Value {
    json!({
        "0": "PENYATA AKAUN ANGGOTA",
        "5": "NO. ANGGOTA",
        "6": "GELARAN",
        "7": "NAMA",
        "8": "NO. K/P",
        "9": "TARIKH LAHIR",
        "10": "ALAMAT TETAP",
        "11": "ALAMAT SURAT MENYURAT",
        "12": "NO. TELEFON ANGGOTA",
        "13": "PERKERJAAN",
        "14": "PENAMA / K.P",
        "15": "NO. TELEFON PENAMA ",
        "16": "TARIKH MASUK",
        "17": "TARIKH LULUS ALK",
        "18": null
    })
}

/// A complete passbook sheet as exported, nulls and zeros included.
pub fn passbook_document() -> Value {
    json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 1": { "5": null, "6": null },
        "Unnamed: 2": {
            "5": ":",
            "19": "TARIKH",
            "21": 41275,
            "22": "15-02-13",
            "23": "",
            "24": 41400,
            "25": "B/F"
        },
        "Unnamed: 3": {
            "5": 12345,
            "6": "ENCIK",
            "7": "AHMAD BIN ALI",
            "8": "800101-05-1234",
            "9": 29221,
            "10": "NO 1, JALAN SATU, SEREMBAN",
            "11": "NO 1, JALAN SATU, SEREMBAN",
            "12": "012-3456789",
            "13": "GURU",
            "14": "SITI BINTI AHMAD (ANAK/900202055678)",
            "15": "013-9876543",
            "16": "2005-03-15",
            "17": 1262304000000i64
        },
        "Unnamed: 5": { "19": "PERKARA", "21": "B/F", "22": "SYER", "23": null, "24": "DIVIDEN", "25": "BAKI DIBAWA" },
        "Unnamed: 6": { "19": "NO.RESIT", "22": "R001" },
        "Unnamed: 7": { "19": "WANG", "20": "MASUK", "21": 0, "22": 50.5 },
        "Unnamed: 8": { "19": "WANG KELUAR", "21": 0.0, "22": 0 },
        "Unnamed: 9": { "19": "BAKI", "20": "SYER", "21": 1000 },
        "Unnamed: 10": { "19": "BAKI", "20": "BONUS", "24": 20 },
        "Unnamed: 11": { "19": "BAKI", "20": "SEMUA", "21": 1000, "22": 1050.5 },
        "Unnamed: 12": { "22": 3 },
        "Unnamed: 13": { "21": null },
        "Unnamed: 14": {},
        "Unnamed: 15": { "19": "CATATAN" }
    })
}

/// Statement expected from [`passbook_document`].
pub fn expected_statement() -> Value {
    json!({
        "NO. ANGGOTA": 12345,
        "GELARAN": "ENCIK",
        "NAMA": "AHMAD BIN ALI",
        "NO. K/P": "800101-05-1234",
        "TARIKH LAHIR": "01-JAN-80",
        "ALAMAT TETAP": "NO 1, JALAN SATU, SEREMBAN",
        "ALAMAT SURAT MENYURAT": "NO 1, JALAN SATU, SEREMBAN",
        "NO. TELEFON ANGGOTA": "012-3456789",
        "PERKERJAAN": "GURU",
        "TARIKH MASUK": "15-MAR-05",
        "TARIKH LULUS ALK": "01-JAN-10",
        "NOMINEE": {
            "NAME": "SITI BINTI AHMAD",
            "RELATIONSHIP": "ANAK",
            "IC": "900202055678",
            "PHONE": "013-9876543"
        },
        "TRANSACTIONS": [
            { "TARIKH": "01-01-13", "PERKARA": "B/F", "BAKI SYER": 1000, "BAKI SEMUA": 1000 },
            {
                "TARIKH": "15-02-13",
                "PERKARA": "SYER",
                "NO.RESIT": "R001",
                "WANG MASUK": 50.5,
                "BAKI SEMUA": 1050.5,
                "ADDITIONAL_DATA_1": 3
            },
            { "TARIKH": "06-05-13", "PERKARA": "DIVIDEN", "BAKI BONUS": 20 },
            { "TARIKH": "B/F", "PERKARA": "BAKI DIBAWA" }
        ]
    })
}

/// Object keys in document order.
pub fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}
