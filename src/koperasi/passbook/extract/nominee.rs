use std::sync::OnceLock;

use regex::Regex;

use crate::koperasi::passbook::model::{Cell, NomineeRecord};

/// `<name> (<relationship>/<ic>)`, with the relationship ending at the first
/// slash inside the parentheses.
const NOMINEE_PATTERN: &str = r"^(.*?)\s*\((.*?)/(.*?)\)$";

fn nominee_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NOMINEE_PATTERN).expect("nominee pattern is valid"))
}

/// Parses the raw `PENAMA / K.P` cell. Strings that do not follow the
/// `name (relationship/ic)` shape become the name alone; empty or non-text
/// cells yield an empty record.
pub fn parse_nominee(raw: Option<&Cell>) -> NomineeRecord {
    let Some(text) = raw.and_then(Cell::as_str).filter(|text| !text.is_empty()) else {
        return NomineeRecord::default();
    };
    let text = text.trim();

    match nominee_pattern().captures(text) {
        Some(captures) => {
            let part = |index: usize| captures.get(index).map(|m| m.as_str().trim().to_string());
            NomineeRecord {
                name: part(1),
                relationship: part(2),
                ic: part(3),
                phone: None,
            }
        }
        None => NomineeRecord {
            name: Some(text.to_string()),
            ..NomineeRecord::default()
        },
    }
}

/// Builds the statement's nominee: parsed identity merged with the raw phone,
/// or `None` when nothing usable is present.
pub fn build_nominee(identity: Option<&Cell>, phone: Option<Cell>) -> Option<NomineeRecord> {
    let nominee = NomineeRecord {
        phone,
        ..parse_nominee(identity)
    };
    (!nominee.is_empty()).then_some(nominee)
}
