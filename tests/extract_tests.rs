mod common;

use passbook_tools::PassbookError;
use passbook_tools::convert::{ensure_essential_fields, statement_from_document};
use passbook_tools::extract::anchor::locate_anchor;
use passbook_tools::extract::headers::{FieldLocation, locate_headers};
use passbook_tools::extract::member::resolve_value_column;
use passbook_tools::extract::{Diagnostic, Diagnostics, extract_statement};
use passbook_tools::model::{Cell, Statement, Table};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{PADDED_ANCHOR, anchor_labels, expected_statement, keys, passbook_document};

fn table(document: Value) -> Table {
    Table::from_json(&passbook_tools::clean::clean_tree(document)).expect("table parsed")
}

fn statement_json(document: Value) -> Value {
    let extraction = statement_from_document(document).expect("statement extracted");
    extraction.statement.to_json().expect("statement serialised")
}

#[test]
fn full_passbook_converts_to_expected_statement() {
    let statement = statement_json(passbook_document());
    assert_eq!(statement, expected_statement());
}

#[test]
fn statement_keys_follow_layout_order() {
    let statement = statement_json(passbook_document());
    assert_eq!(keys(&statement), keys(&expected_statement()));

    let transactions = statement["TRANSACTIONS"].as_array().expect("transaction list");
    assert_eq!(
        keys(&transactions[1]),
        vec!["TARIKH", "PERKARA", "NO.RESIT", "WANG MASUK", "BAKI SEMUA", "ADDITIONAL_DATA_1"]
    );
}

#[test]
fn anchor_header_is_matched_ignoring_surrounding_whitespace() {
    for header in [
        "KOPERASI PERMODALAN DAN PERUSAHAAN MELAYU NEGERI SEMBILAN BERHAD",
        "  KOPERASI PERMODALAN DAN PERUSAHAAN MELAYU NEGERI SEMBILAN BERHAD  ",
        PADDED_ANCHOR,
    ] {
        let table = table(json!({ header: anchor_labels() }));
        assert!(locate_anchor(&table).is_ok(), "anchor '{header}' not located");
    }
}

#[test]
fn missing_anchor_is_a_skip() {
    let document = json!({
        "SOMETHING ELSE": { "5": "NO. ANGGOTA" },
        "Unnamed: 3": { "5": 12345 }
    });
    let error = statement_from_document(document).expect_err("anchor must be required");
    assert!(matches!(error, PassbookError::AnchorNotFound(_)));
    assert!(error.is_skip());
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn member_number_is_found_in_unnamed_four_one_row_down() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": ":", "7": ":" },
        "Unnamed: 4": { "5": "ENCIK", "6": 12345, "7": "AHMAD BIN ALI" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");
    let member = &extraction.statement.member;

    assert_eq!(member.get("NO. ANGGOTA"), Some(&Cell::Int(12345)));
    assert_eq!(member.get("GELARAN"), Some(&Cell::from("ENCIK")));
    assert_eq!(member.get("NAMA"), Some(&Cell::from("AHMAD BIN ALI")));
    assert!(extraction.diagnostics.contains(&Diagnostic::RowAdjusted {
        rule: "gelaran-transposed",
        label: "GELARAN",
        from: 6,
        to: 5,
    }));
}

#[test]
fn member_number_outside_plausible_range_is_ignored() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": 999, "7": "AHMAD BIN ALI" },
        "Unnamed: 6": { "6": 100000 }
    });
    let table = table(document);
    let anchor = locate_anchor(&table).expect("anchor");
    let mut diagnostics = Diagnostics::default();

    let column = resolve_value_column(&table, anchor, &mut diagnostics).expect("fallback column");
    assert_eq!(column.name, "Unnamed: 3");
    assert_eq!(column.member_number, None);
    assert_eq!(
        diagnostics.into_vec(),
        vec![Diagnostic::ValueColumnFallback {
            column: "Unnamed: 3".to_string()
        }]
    );
}

#[test]
fn other_synthetic_columns_are_searched_after_preferred_ones() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 2": { "4": 2222 },
        "Unnamed: 3": { "7": "AHMAD BIN ALI" },
        "Unnamed: 6": { "5": 5555, "7": "NOT THE NAME" }
    });
    let table = table(document);
    let anchor = locate_anchor(&table).expect("anchor");
    let mut diagnostics = Diagnostics::default();

    let column = resolve_value_column(&table, anchor, &mut diagnostics).expect("value column");
    assert_eq!(column.name, "Unnamed: 6");
    assert_eq!(column.member_number, Some((5, 5555)));
}

#[test]
fn fallback_column_without_member_number_fails_essential_check() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 4": { "6": "PUAN", "7": "SITI BINTI ALI" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");
    let member = &extraction.statement.member;

    assert!(!member.contains("NO. ANGGOTA"));
    assert_eq!(member.get("NAMA"), Some(&Cell::from("SITI BINTI ALI")));
    let error = ensure_essential_fields(&extraction.statement).expect_err("member number required");
    assert!(matches!(error, PassbookError::MissingEssentialField(ref field) if field == "NO. ANGGOTA"));
}

#[test]
fn undetermined_value_column_leaves_member_empty() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "6": "ENCIK" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");

    assert!(extraction.statement.member.is_empty());
    assert!(extraction.diagnostics.contains(&Diagnostic::ValueColumnUndetermined));
    assert_eq!(extraction.statement.nominee, None);
    assert_eq!(
        extraction.statement.to_json().expect("serialised"),
        json!({ "NOMINEE": null, "TRANSACTIONS": [] })
    );
}

#[test]
fn missing_member_labels_are_skipped_and_reported() {
    let document = json!({
        PADDED_ANCHOR: { "5": "NO. ANGGOTA", "7": "NAMA" },
        "Unnamed: 3": { "5": 4321, "6": "ENCIK", "7": "ALI" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");

    assert_eq!(extraction.statement.member.labels(), vec!["NO. ANGGOTA", "NAMA"]);
    assert!(extraction.diagnostics.contains(&Diagnostic::MemberLabelMissing {
        label: "GELARAN",
        row: 6,
    }));
}

#[test]
fn unparseable_member_date_is_kept_upper_cased() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": 12345, "9": "sebelum merdeka" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");

    assert_eq!(
        extraction.statement.member.get("TARIKH LAHIR"),
        Some(&Cell::from("SEBELUM MERDEKA"))
    );
    assert!(extraction.diagnostics.contains(&Diagnostic::DateParseFailure {
        field: "TARIKH LAHIR",
        raw: "sebelum merdeka".to_string(),
    }));
}

#[test]
fn nominee_phone_alone_produces_nominee() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": 12345, "15": "019-1112222" }
    });
    let statement = statement_json(document);
    assert_eq!(statement["NOMINEE"], json!({ "PHONE": "019-1112222" }));
}

#[test]
fn missing_tarikh_header_yields_no_transactions() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": 12345 },
        "Unnamed: 5": { "19": "PERKARA", "21": "SYER" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");

    assert!(extraction.statement.transactions.is_empty());
    assert!(extraction.diagnostics.contains(&Diagnostic::TarikhHeaderNotFound));
}

#[test]
fn headers_on_second_row_shift_data_start() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 2": { "20": "TARIKH", "21": "01-01-13" },
        "Unnamed: 5": { "19": "PERKARA", "20": "B/F", "21": "SYER" }
    });
    let table = table(document);
    let mut diagnostics = Diagnostics::default();
    let headers = locate_headers(&table, &mut diagnostics);

    assert_eq!(headers.get("TARIKH"), Some(&FieldLocation::new("Unnamed: 2", 20)));
    assert_eq!(headers.get("PERKARA"), Some(&FieldLocation::new("Unnamed: 5", 19)));
    assert_eq!(headers.data_start_row(), Some(21));
}

#[test]
fn first_header_occurrence_wins() {
    let document = json!({
        "Unnamed: 2": { "19": "TARIKH" },
        "Unnamed: 3": { "19": "TARIKH" },
        "Unnamed: 4": { "20": "TARIKH" }
    });
    let table = table(document);
    let mut diagnostics = Diagnostics::default();
    let headers = locate_headers(&table, &mut diagnostics);

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("TARIKH"), Some(&FieldLocation::new("Unnamed: 2", 19)));
}

#[test]
fn additional_data_columns_follow_total_balance() {
    let document = json!({
        "Unnamed: 7": { "19": "BAKI", "20": "SEMUA" }
    });
    let table = table(document);
    let mut diagnostics = Diagnostics::default();
    let headers = locate_headers(&table, &mut diagnostics);

    assert_eq!(headers.get("BAKI SEMUA"), Some(&FieldLocation::new("Unnamed: 7", 20)));
    for (label, column) in [
        ("ADDITIONAL_DATA_1", "Unnamed: 8"),
        ("ADDITIONAL_DATA_2", "Unnamed: 9"),
        ("ADDITIONAL_DATA_3", "Unnamed: 10"),
    ] {
        assert_eq!(headers.get(label), Some(&FieldLocation::new(column, 20)));
    }
}

#[test]
fn named_total_balance_column_gets_no_additional_data() {
    let document = json!({
        "BALANCE": { "19": "BAKI SEMUA" }
    });
    let table = table(document);
    let mut diagnostics = Diagnostics::default();
    let headers = locate_headers(&table, &mut diagnostics);

    assert!(headers.contains("BAKI SEMUA"));
    assert!(!headers.contains("ADDITIONAL_DATA_1"));
}

#[test]
fn transaction_rows_are_visited_in_numeric_order() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": 12345 },
        "Unnamed: 2": { "19": "TARIKH", "100": "02-01-13", "99": "01-01-13", "21": "31-12-12" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");
    let dates: Vec<&Cell> = extraction
        .statement
        .transactions
        .iter()
        .filter_map(|transaction| transaction.get("TARIKH"))
        .collect();

    assert_eq!(
        dates,
        vec![
            &Cell::from("31-12-12"),
            &Cell::from("01-01-13"),
            &Cell::from("02-01-13")
        ]
    );
}

#[test]
fn rows_with_description_but_no_date_are_kept() {
    let document = json!({
        PADDED_ANCHOR: anchor_labels(),
        "Unnamed: 3": { "5": 12345 },
        "Unnamed: 2": { "19": "TARIKH", "21": "", "22": "" },
        "Unnamed: 5": { "19": "PERKARA", "21": "PINDAHAN", "22": "" }
    });
    let extraction = statement_from_document(document).expect("statement extracted");
    let transactions = &extraction.statement.transactions;

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].get("PERKARA"), Some(&Cell::from("PINDAHAN")));
    assert_eq!(transactions[0].get("TARIKH"), Some(&Cell::from("")));
}

#[test]
fn extraction_is_deterministic() {
    let table = table(passbook_document());
    let first = extract_statement(&table).expect("first run");
    let second = extract_statement(&table).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn statement_serialises_nominee_as_null_when_absent() {
    let statement = Statement::default();
    assert_eq!(
        statement.to_json().expect("serialised"),
        json!({ "NOMINEE": null, "TRANSACTIONS": [] })
    );
}

#[test]
fn table_rejects_non_object_documents() {
    for document in [json!([1, 2]), json!({ "A": [1] }), json!({ "A": { "0": { "x": 1 } } })] {
        let error = Table::from_json(&document).expect_err("invalid table");
        assert!(matches!(error, PassbookError::InvalidTable(_)));
        assert_eq!(error.exit_code(), 2);
    }
}

#[test]
fn table_ignores_non_numeric_row_keys() {
    let table = Table::from_json(&json!({ "A": { "x": 1, "-1": 2, "3": "kept" } })).expect("table");
    let column = table.column("A").expect("column A");
    assert_eq!(column.len(), 1);
    assert_eq!(table.cell("A", 3), Some(&Cell::from("kept")));
}
